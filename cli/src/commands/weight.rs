use anyhow::Result;

use crate::charts::Canvas;
use crate::reminder::{CHIME_DELAY, Chime, chime_then};

use super::CliTracker;
use super::helpers::confirm;

pub(crate) fn cmd_weight_log(
    tracker: &mut CliTracker<'_>,
    canvas: &Canvas,
    value: &str,
    json: bool,
) -> Result<()> {
    let logged = tracker.log_weight(value)?;

    if json {
        println!(
            "{}",
            serde_json::json!({ "logged": logged.weight, "trend": logged.trend })
        );
    } else {
        println!(
            "Logged {:.1} kg (entry {} of your trend)",
            logged.weight,
            logged.trend.values.len()
        );
        canvas.print();
    }

    Ok(())
}

pub(crate) fn cmd_weight_trend(tracker: &mut CliTracker<'_>, canvas: &Canvas, json: bool) -> Result<()> {
    let trend = tracker.weight_trend()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
    } else {
        canvas.print();
        if trend.is_empty() {
            eprintln!("Use `fitplan weight log` to record your weight.");
        }
    }

    Ok(())
}

pub(crate) async fn cmd_weight_reset(
    tracker: &mut CliTracker<'_>,
    canvas: &Canvas,
    chime: Option<&dyn Chime>,
    yes: bool,
    json: bool,
) -> Result<()> {
    if !yes && !confirm("Are you sure you want to reset your weight progress?")? {
        if json {
            println!("{}", serde_json::json!({ "reset": false }));
        } else {
            eprintln!("Cancelled.");
        }
        return Ok(());
    }

    let trend = tracker.reset_weights()?;

    if json {
        println!("{}", serde_json::json!({ "reset": true, "trend": trend }));
        return Ok(());
    }

    canvas.print();
    chime_then(chime, CHIME_DELAY, || {
        println!("Weight progress has been reset.");
    })
    .await;
    Ok(())
}
