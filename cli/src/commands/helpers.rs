use anyhow::{Context, Result};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};

use fitplan_core::view::MealRow;

/// Ask a yes/no question on stderr and read the answer from stdin.
pub(crate) fn confirm(question: &str) -> Result<bool> {
    eprint!("{question} [y/N]: ");
    io::stderr().flush()?;
    let stdin = io::stdin();
    let line = stdin.lock().lines().next().context("No input")??;
    Ok(is_yes(&line))
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Positions are shown 1-based; the log is 0-based.
pub(crate) fn meal_index(number: usize) -> Option<usize> {
    number.checked_sub(1)
}

pub(crate) fn print_meal_table(rows: &[MealRow]) {
    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "#")]
        number: usize,
        #[tabled(rename = "Food")]
        food: String,
        #[tabled(rename = "Calories")]
        calories: String,
        #[tabled(rename = "When")]
        when: String,
    }

    let rows: Vec<Row> = rows
        .iter()
        .map(|r| Row {
            number: r.index + 1,
            food: truncate(&r.food_item, 35),
            calories: r.calories.map_or("-".into(), |c| format!("{c} kcal")),
            when: r.stamp.clone(),
        })
        .collect();

    let table = Table::new(&rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::single(2)).with(Alignment::right()))
        .to_string();
    println!("{table}");
}

pub(crate) fn json_error(message: &str) -> String {
    #[derive(Serialize)]
    struct CliError<'a> {
        error: &'a str,
    }
    serde_json::to_string(&CliError { error: message })
        .unwrap_or_else(|_| format!("{{\"error\":\"{message}\"}}"))
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let end = s.char_indices().nth(max - 3).map_or(s.len(), |(i, _)| i);
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes(" YES \n"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("yep"));
    }

    #[test]
    fn test_meal_index() {
        assert_eq!(meal_index(1), Some(0));
        assert_eq!(meal_index(3), Some(2));
        assert_eq!(meal_index(0), None);
    }

    #[test]
    fn test_json_error() {
        assert_eq!(
            json_error("Meal 4 not found"),
            r#"{"error":"Meal 4 not found"}"#
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world this is long", 10), "hello w...");
    }

    #[test]
    fn test_truncate_utf8() {
        assert_eq!(truncate("Crème fraîche", 10), "Crème f...");
        assert_eq!(truncate("Müsli", 10), "Müsli");
    }
}
