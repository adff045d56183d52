use anyhow::Result;
use serde::Serialize;

use crate::chart::{CalorieProjection, ChartBackend, ChartProjector, ChartSlot, WeightTrend};
use crate::meals::format_list_stamp;
use crate::models::MealRecord;

/// One line of the meal list. `index` is the position `delete` expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealRow {
    pub index: usize,
    pub food_item: String,
    pub calories: Option<i64>,
    pub stamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealView {
    pub rows: Vec<MealRow>,
    pub calories: CalorieProjection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub meals: MealView,
    pub weight_trend: WeightTrend,
}

/// Rows in insertion order; the row order is the deletion index order.
#[must_use]
pub fn meal_rows(meals: &[MealRecord]) -> Vec<MealRow> {
    meals
        .iter()
        .enumerate()
        .map(|(index, meal)| MealRow {
            index,
            food_item: meal.food_item.clone(),
            calories: meal.calorie_value(),
            stamp: format_list_stamp(&meal.date),
        })
        .collect()
}

pub struct ViewRenderer<B: ChartBackend> {
    charts: ChartProjector<B>,
}

impl<B: ChartBackend> ViewRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            charts: ChartProjector::new(backend),
        }
    }

    /// Rebuilds the meal list and redraws the calorie chart.
    pub fn render_meals(&mut self, meals: &[MealRecord]) -> Result<MealView> {
        let rows = meal_rows(meals);
        let calories = self.charts.render_calories(meals)?;
        Ok(MealView { rows, calories })
    }

    pub fn render_weights(&mut self, weights: &[f64]) -> Result<WeightTrend> {
        self.charts.render_weight_trend(weights)
    }

    /// Drops the current trend chart and draws an empty one in its place.
    pub fn reset_weights(&mut self) -> Result<WeightTrend> {
        self.charts.clear_weight_trend()
    }

    pub fn render(&mut self, meals: &[MealRecord], weights: &[f64]) -> Result<Dashboard> {
        let meals = self.render_meals(meals)?;
        let weight_trend = self.render_weights(weights)?;
        Ok(Dashboard {
            meals,
            weight_trend,
        })
    }

    #[must_use]
    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.charts.is_live(slot)
    }

    pub fn close(&mut self) {
        self.charts.dispose_all();
    }
}
