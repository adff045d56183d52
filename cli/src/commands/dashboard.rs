use anyhow::Result;

use crate::charts::Canvas;

use super::CliTracker;
use super::helpers::print_meal_table;

pub(crate) fn cmd_dashboard(tracker: &mut CliTracker<'_>, canvas: &Canvas, json: bool) -> Result<()> {
    let dashboard = tracker.dashboard()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("Meals");
    if dashboard.meals.rows.is_empty() {
        println!("  (none logged yet)");
    } else {
        print_meal_table(&dashboard.meals.rows);
    }
    canvas.print();
    Ok(())
}
