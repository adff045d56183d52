use anyhow::Result;

use super::CliTracker;

pub(crate) fn cmd_bmi(
    tracker: &CliTracker<'_>,
    height_cm: f64,
    weight_kg: Option<f64>,
    json: bool,
) -> Result<()> {
    let reading = tracker.bmi(weight_kg, height_cm)?;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "bmi": reading.rounded(),
                "category": reading.category,
                "message": reading.message,
            })
        );
    } else {
        println!(
            "Your BMI is {:.1} → {}",
            reading.value, reading.category
        );
        println!("{}", reading.message);
    }

    Ok(())
}
