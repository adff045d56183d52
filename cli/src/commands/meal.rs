use anyhow::Result;

use crate::charts::Canvas;
use crate::reminder::{CHIME_DELAY, Chime, chime_then};

use super::{CliTracker, NotFound};
use super::helpers::{json_error, meal_index, print_meal_table};

pub(crate) async fn cmd_meal_log(
    tracker: &mut CliTracker<'_>,
    canvas: &Canvas,
    chime: Option<&dyn Chime>,
    food: &str,
    calories: &str,
    json: bool,
) -> Result<()> {
    let logged = tracker.log_meal(food, calories)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "logged": logged.record, "meals": logged.view })
        );
        return Ok(());
    }

    chime_then(chime, CHIME_DELAY, || {
        println!(
            "Logged {} ({} kcal)",
            logged.record.food_item,
            logged.record.counted_calories()
        );
    })
    .await;
    print_meal_table(&logged.view.rows);
    canvas.print();
    Ok(())
}

pub(crate) fn cmd_meal_list(tracker: &mut CliTracker<'_>, canvas: &Canvas, json: bool) -> Result<()> {
    let view = tracker.meal_view()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else if view.rows.is_empty() {
        eprintln!("No meals logged yet. Use `fitplan meal log` to add one.");
        canvas.print();
    } else {
        print_meal_table(&view.rows);
        canvas.print();
    }

    Ok(())
}

pub(crate) fn cmd_meal_delete(
    tracker: &mut CliTracker<'_>,
    canvas: &Canvas,
    number: usize,
    json: bool,
) -> Result<()> {
    let deleted = match meal_index(number) {
        Some(index) => tracker.delete_meal(index)?,
        None => None,
    };

    if let Some((meal, view)) = deleted {
        if json {
            println!(
                "{}",
                serde_json::json!({ "deleted": meal, "meals": view })
            );
        } else {
            println!("Deleted meal {number}: {}", meal.food_item);
            print_meal_table(&view.rows);
            canvas.print();
        }
        Ok(())
    } else {
        let message = format!("Meal {number} not found");
        if json {
            println!("{}", json_error(&message));
        } else {
            eprintln!("{message}");
        }
        Err(NotFound(message).into())
    }
}
