use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use tracing::info;

use crate::entry_log::{EntryLog, Snapshot};
use crate::error::ValidationError;
use crate::models::{MEALS_KEY, MealRecord};
use crate::store::KeyValueStore;

/// Fixed daily calorie budget the donut chart compares against.
pub const DAILY_CALORIE_BUDGET: i64 = 2000;

/// Largest calorie count a single meal may carry.
pub const MAX_MEAL_CALORIES: i64 = 100_000;

const STAMP_FORMAT: &str = "%-m/%-d/%Y %-I:%M:%S %p (%A)";
const STAMP_PARSE_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";
const LIST_STAMP_FORMAT: &str = "%d %b, %H:%M";

pub struct MealLog<'s> {
    log: EntryLog<'s, MealRecord>,
}

impl<'s> MealLog<'s> {
    pub fn new(store: &'s dyn KeyValueStore) -> Self {
        Self {
            log: EntryLog::new(store, MEALS_KEY),
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot<MealRecord>> {
        self.log.snapshot()
    }

    pub fn list(&self) -> Result<Vec<MealRecord>> {
        self.log.load()
    }

    pub fn log_meal(&self, food_item: &str, calories: &str) -> Result<MealRecord> {
        self.log_meal_at(food_item, calories, Local::now().naive_local())
    }

    pub fn log_meal_at(
        &self,
        food_item: &str,
        calories: &str,
        at: NaiveDateTime,
    ) -> Result<MealRecord> {
        let food_item = food_item.trim();
        if food_item.is_empty() || calories.trim().is_empty() {
            return Err(ValidationError::new("Please enter a food item and calories!").into());
        }
        let calories = parse_calories(calories)?;

        let record = MealRecord {
            food_item: food_item.to_string(),
            calories: Some(calories.into()),
            date: format_stamp(at),
        };
        self.log.append(record.clone())?;
        info!(food = %record.food_item, calories, "logged meal");
        Ok(record)
    }

    /// Removes the meal at `index` in insertion order. Out of range is a no-op.
    pub fn delete(&self, index: usize) -> Result<Option<MealRecord>> {
        let removed = self.log.remove_at(index)?;
        if let Some(meal) = &removed {
            info!(index, food = %meal.food_item, "deleted meal");
        }
        Ok(removed)
    }
}

/// Parses calorie text the way an integer-prefix parser would: leading
/// whitespace, an optional sign, then digits; anything after the digits is
/// ignored (`"300.9"` and `"300 kcal"` give 300).
pub fn parse_calories(raw: &str) -> Result<i64, ValidationError> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return Err(ValidationError::new(format!(
            "Calories must be a number (got '{}')",
            raw.trim()
        )));
    }
    let value: i64 = digits
        .parse()
        .map_err(|_| ValidationError::new(format!("Calories value '{digits}' is too large")))?;
    if negative && value != 0 {
        return Err(ValidationError::new("Calories must not be negative"));
    }
    if value > MAX_MEAL_CALORIES {
        return Err(ValidationError::new(format!(
            "Calories must be at most {MAX_MEAL_CALORIES}"
        )));
    }
    Ok(value)
}

#[must_use]
pub fn format_stamp(at: NaiveDateTime) -> String {
    at.format(STAMP_FORMAT).to_string()
}

/// Re-renders a stored stamp as `19 Oct, 15:04` for the meal list.
#[must_use]
pub fn format_list_stamp(stamp: &str) -> String {
    let without_weekday = stamp
        .split_once(" (")
        .map_or(stamp, |(head, _)| head)
        .trim();
    match NaiveDateTime::parse_from_str(without_weekday, STAMP_PARSE_FORMAT) {
        Ok(at) => at.format(LIST_STAMP_FORMAT).to_string(),
        Err(_) => "Invalid Date".to_string(),
    }
}

#[must_use]
pub fn total_calories(meals: &[MealRecord]) -> i64 {
    meals
        .iter()
        .map(MealRecord::counted_calories)
        .fold(0, i64::saturating_add)
}

#[must_use]
pub fn remaining_calories(total: i64) -> i64 {
    (DAILY_CALORIE_BUDGET - total).max(0)
}
