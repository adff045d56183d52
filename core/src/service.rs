use anyhow::Result;

use crate::bmi::{BmiReading, compute_bmi};
use crate::chart::{ChartBackend, ChartSlot, WeightTrend};
use crate::meals::MealLog;
use crate::models::MealRecord;
use crate::store::KeyValueStore;
use crate::users::UserDirectory;
use crate::view::{Dashboard, MealView, ViewRenderer};
use crate::weights::WeightLog;

/// A freshly stored meal plus the list and chart redrawn after it.
#[derive(Debug, Clone, PartialEq)]
pub struct MealLogged {
    pub record: MealRecord,
    pub view: MealView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightLogged {
    pub weight: f64,
    pub trend: WeightTrend,
}

/// Wires the logs to the renderer: every mutation persists first, then the
/// affected views are re-derived from a fresh read of the store.
pub struct Tracker<'s, B: ChartBackend> {
    meals: MealLog<'s>,
    weights: WeightLog<'s>,
    users: UserDirectory<'s>,
    view: ViewRenderer<B>,
}

impl<'s, B: ChartBackend> Tracker<'s, B> {
    pub fn new(store: &'s dyn KeyValueStore, backend: B) -> Self {
        Self {
            meals: MealLog::new(store),
            weights: WeightLog::new(store),
            users: UserDirectory::new(store),
            view: ViewRenderer::new(backend),
        }
    }

    /// Startup render: meal list, calorie chart and weight trend.
    pub fn dashboard(&mut self) -> Result<Dashboard> {
        let meals = self.meals.list()?;
        let weights = self.weights.list()?;
        self.view.render(&meals, &weights)
    }

    // --- Meals ---

    pub fn meal_view(&mut self) -> Result<MealView> {
        let meals = self.meals.list()?;
        self.view.render_meals(&meals)
    }

    pub fn log_meal(&mut self, food_item: &str, calories: &str) -> Result<MealLogged> {
        let record = self.meals.log_meal(food_item, calories)?;
        let view = self.meal_view()?;
        Ok(MealLogged { record, view })
    }

    /// Deletes by position and redraws. `None` when `index` was out of range.
    pub fn delete_meal(&mut self, index: usize) -> Result<Option<(MealRecord, MealView)>> {
        let Some(removed) = self.meals.delete(index)? else {
            return Ok(None);
        };
        let view = self.meal_view()?;
        Ok(Some((removed, view)))
    }

    // --- Weights ---

    pub fn weight_trend(&mut self) -> Result<WeightTrend> {
        let weights = self.weights.list()?;
        self.view.render_weights(&weights)
    }

    pub fn log_weight(&mut self, raw: &str) -> Result<WeightLogged> {
        let weight = self.weights.log_weight(raw)?;
        let trend = self.weight_trend()?;
        Ok(WeightLogged { weight, trend })
    }

    pub fn reset_weights(&mut self) -> Result<WeightTrend> {
        self.weights.reset()?;
        self.view.reset_weights()
    }

    // --- BMI ---

    /// Uses `weight_kg` when given, otherwise the most recent logged weight.
    pub fn bmi(&self, weight_kg: Option<f64>, height_cm: f64) -> Result<BmiReading> {
        let weight = match weight_kg {
            Some(w) => w,
            None => self.weights.latest()?.unwrap_or(f64::NAN),
        };
        Ok(compute_bmi(weight, height_cm)?)
    }

    // --- Accounts ---

    #[must_use]
    pub fn users(&self) -> &UserDirectory<'s> {
        &self.users
    }

    #[must_use]
    pub fn is_live(&self, slot: ChartSlot) -> bool {
        self.view.is_live(slot)
    }

    /// Releases every chart the renderer still holds.
    pub fn close(&mut self) {
        self.view.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiCategory;
    use crate::chart::testing::{Event, RecordingBackend, destroy_count};
    use crate::error::is_validation;
    use crate::models::{MEALS_KEY, WEIGHTS_KEY};
    use crate::store::{MemoryStore, SqliteStore};
    use std::rc::Rc;

    #[test]
    fn test_log_meal_redraws_calories() {
        let store = MemoryStore::new();
        let mut tracker = Tracker::new(&store, RecordingBackend::default());

        tracker.log_meal("Oats", "300").unwrap();
        let logged = tracker.log_meal("Pasta", "700").unwrap();

        assert_eq!(logged.record.food_item, "Pasta");
        assert_eq!(logged.view.rows.len(), 2);
        assert_eq!(logged.view.calories.consumed, 1000);
        assert_eq!(logged.view.calories.remaining, 1000);
        assert!(tracker.is_live(ChartSlot::Calories));
    }

    #[test]
    fn test_invalid_meal_leaves_log_and_chart_untouched() {
        let store = MemoryStore::new();
        let backend = RecordingBackend::default();
        let events = Rc::clone(&backend.events);
        let mut tracker = Tracker::new(&store, backend);

        assert!(is_validation(&tracker.log_meal("", "300").unwrap_err()));
        assert!(is_validation(&tracker.log_meal("Toast", "").unwrap_err()));
        assert!(store.get(MEALS_KEY).unwrap().is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_delete_meal_by_position() {
        let store = MemoryStore::new();
        let mut tracker = Tracker::new(&store, RecordingBackend::default());
        tracker.log_meal("Oats", "300").unwrap();
        tracker.log_meal("Salad", "400").unwrap();
        tracker.log_meal("Pasta", "700").unwrap();

        let (removed, view) = tracker.delete_meal(1).unwrap().unwrap();
        assert_eq!(removed.food_item, "Salad");
        let names: Vec<_> = view.rows.iter().map(|r| r.food_item.as_str()).collect();
        assert_eq!(names, vec!["Oats", "Pasta"]);
        assert_eq!(view.calories.consumed, 1000);

        assert!(tracker.delete_meal(5).unwrap().is_none());
        assert_eq!(tracker.meal_view().unwrap().rows.len(), 2);
    }

    #[test]
    fn test_log_weight_updates_trend() {
        let store = MemoryStore::new();
        let mut tracker = Tracker::new(&store, RecordingBackend::default());
        tracker.log_weight("60").unwrap();
        tracker.log_weight("61").unwrap();
        let logged = tracker.log_weight("60.5").unwrap();

        assert!((logged.weight - 60.5).abs() < f64::EPSILON);
        assert_eq!(logged.trend.labels, vec!["Day 1", "Day 2", "Day 3"]);
        assert_eq!(logged.trend.values, vec![60.0, 61.0, 60.5]);
        assert_eq!(
            store.get(WEIGHTS_KEY).unwrap().as_deref(),
            Some("[60,61,60.5]")
        );
    }

    #[test]
    fn test_reset_weights_destroys_prior_chart_once() {
        let store = MemoryStore::new();
        let backend = RecordingBackend::default();
        let events = Rc::clone(&backend.events);
        let mut tracker = Tracker::new(&store, backend);

        tracker.log_weight("80").unwrap();
        let trend = tracker.reset_weights().unwrap();
        assert!(trend.is_empty());
        assert!(tracker.weight_trend().unwrap().is_empty());
        assert!(store.get(WEIGHTS_KEY).unwrap().is_none());

        tracker.close();
        let events = events.borrow();
        assert_eq!(destroy_count(&events, 0), 1);
        assert_eq!(destroy_count(&events, 1), 1);
        assert_eq!(destroy_count(&events, 2), 1);
        assert!(matches!(
            events[1],
            Event::Destroyed { id: 0 }
        ));
    }

    #[test]
    fn test_bmi_defaults_to_latest_weight() {
        let store = MemoryStore::new();
        let mut tracker = Tracker::new(&store, RecordingBackend::default());

        assert!(is_validation(&tracker.bmi(None, 175.0).unwrap_err()));

        tracker.log_weight("90").unwrap();
        tracker.log_weight("70").unwrap();
        let reading = tracker.bmi(None, 175.0).unwrap();
        assert_eq!(reading.category, BmiCategory::Healthy);

        let reading = tracker.bmi(Some(45.0), 175.0).unwrap();
        assert_eq!(reading.category, BmiCategory::Underweight);
    }

    #[test]
    fn test_dashboard_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fitplan.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            let mut tracker = Tracker::new(&store, RecordingBackend::default());
            tracker.log_meal("Oats", "350").unwrap();
            tracker.log_weight("72.5").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let mut tracker = Tracker::new(&store, RecordingBackend::default());
        let dashboard = tracker.dashboard().unwrap();
        assert_eq!(dashboard.meals.rows[0].food_item, "Oats");
        assert_eq!(dashboard.meals.calories.consumed, 350);
        assert_eq!(dashboard.weight_trend.values, vec![72.5]);
    }

    #[test]
    fn test_users_share_the_store() {
        let store = MemoryStore::new();
        let tracker = Tracker::new(&store, RecordingBackend::default());
        tracker
            .users()
            .register("Ada", "ada@example.com", "pw")
            .unwrap();
        assert!(tracker.users().login("ada@example.com", "pw").is_ok());
    }
}
