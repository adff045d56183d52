use anyhow::Result;

use fitplan_core::plans::{DietPlan, PlanSheet, WorkoutPlan};

pub(crate) fn cmd_plan_diet(id: &str, json: bool) -> Result<()> {
    let plan: DietPlan = id.parse()?;
    print_sheet(&plan.sheet(), json)
}

pub(crate) fn cmd_plan_workout(id: &str, json: bool) -> Result<()> {
    let plan: WorkoutPlan = id.parse()?;
    print_sheet(&plan.sheet(), json)
}

fn print_sheet(sheet: &PlanSheet, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(sheet)?);
    } else {
        println!("{}", sheet.title);
        for line in sheet.lines {
            println!("  {line}");
        }
    }
    Ok(())
}
