use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::meals::{remaining_calories, total_calories};
use crate::models::MealRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSlot {
    Calories,
    WeightTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStyle {
    pub background_colors: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<&'static str>,
    pub fill: bool,
    pub tension: f64,
    pub point_radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    pub data: Vec<f64>,
    pub style: DatasetStyle,
}

/// Everything a rendering backend needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    /// Per-point value label; `None` draws the point unlabeled.
    pub value_labels: Vec<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_title: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_title: Option<&'static str>,
}

/// A drawn chart. Destroying consumes the handle, so it can only happen once.
pub trait ChartHandle {
    fn destroy(self);
}

/// The rendering sink: draws a chart and hands back its instance.
pub trait ChartBackend {
    type Handle: ChartHandle;

    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<Self::Handle>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalorieProjection {
    pub consumed: i64,
    pub remaining: i64,
}

impl CalorieProjection {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_spec(self) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Doughnut,
            labels: vec!["Consumed".to_string(), "Remaining".to_string()],
            datasets: vec![Dataset {
                label: None,
                data: vec![self.consumed as f64, self.remaining as f64],
                style: DatasetStyle {
                    background_colors: vec!["#ff9a8b", "#d3f8e2"],
                    border_color: None,
                    fill: true,
                    tension: 0.0,
                    point_radius: 0,
                },
            }],
            // Only the consumed slice carries a number
            value_labels: vec![Some(format!("{} kcal", self.consumed)), None],
            center_text: Some(format!("{} kcal", self.consumed)),
            x_title: None,
            y_title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightTrend {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl WeightTrend {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn to_spec(&self) -> ChartSpec {
        ChartSpec {
            kind: ChartKind::Line,
            labels: self.labels.clone(),
            datasets: vec![Dataset {
                label: Some("Weight (kg)"),
                data: self.values.clone(),
                style: DatasetStyle {
                    background_colors: vec!["rgba(0, 0, 255, 0.1)"],
                    border_color: Some("blue"),
                    fill: true,
                    tension: 0.3,
                    point_radius: 5,
                },
            }],
            value_labels: vec![None; self.values.len()],
            center_text: None,
            x_title: Some("Days"),
            y_title: Some("Weight (kg)"),
        }
    }
}

#[must_use]
pub fn project_calories(meals: &[MealRecord]) -> CalorieProjection {
    let consumed = total_calories(meals);
    CalorieProjection {
        consumed,
        remaining: remaining_calories(consumed),
    }
}

/// Labels are positional: the i-th weight is "Day i+1" whatever the
/// calendar gap between entries.
#[must_use]
pub fn project_weight_trend(weights: &[f64]) -> WeightTrend {
    WeightTrend {
        labels: (1..=weights.len()).map(|day| format!("Day {day}")).collect(),
        values: weights.to_vec(),
    }
}

/// Owns at most one live chart per slot. Every redraw disposes the previous
/// instance before asking the backend for a new one.
pub struct ChartProjector<B: ChartBackend> {
    backend: B,
    calories: Option<B::Handle>,
    weight_trend: Option<B::Handle>,
}

impl<B: ChartBackend> ChartProjector<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            calories: None,
            weight_trend: None,
        }
    }

    #[must_use]
    pub fn is_live(&self, slot: ChartSlot) -> bool {
        match slot {
            ChartSlot::Calories => self.calories.is_some(),
            ChartSlot::WeightTrend => self.weight_trend.is_some(),
        }
    }

    pub fn render_calories(&mut self, meals: &[MealRecord]) -> Result<CalorieProjection> {
        let projection = project_calories(meals);
        self.replace(ChartSlot::Calories, &projection.to_spec())?;
        Ok(projection)
    }

    pub fn render_weight_trend(&mut self, weights: &[f64]) -> Result<WeightTrend> {
        let trend = project_weight_trend(weights);
        self.replace(ChartSlot::WeightTrend, &trend.to_spec())?;
        Ok(trend)
    }

    /// Redraws the trend with an explicit empty dataset.
    pub fn clear_weight_trend(&mut self) -> Result<WeightTrend> {
        self.render_weight_trend(&[])
    }

    pub fn dispose(&mut self, slot: ChartSlot) -> bool {
        match self.slot_mut(slot).take() {
            Some(handle) => {
                handle.destroy();
                debug!(?slot, "disposed chart");
                true
            }
            None => false,
        }
    }

    pub fn dispose_all(&mut self) {
        self.dispose(ChartSlot::Calories);
        self.dispose(ChartSlot::WeightTrend);
    }

    fn replace(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<()> {
        self.dispose(slot);
        let handle = self.backend.create(slot, spec)?;
        *self.slot_mut(slot) = Some(handle);
        debug!(?slot, points = spec.labels.len(), "created chart");
        Ok(())
    }

    fn slot_mut(&mut self, slot: ChartSlot) -> &mut Option<B::Handle> {
        match slot {
            ChartSlot::Calories => &mut self.calories,
            ChartSlot::WeightTrend => &mut self.weight_trend,
        }
    }
}

impl<B: ChartBackend> Drop for ChartProjector<B> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Result, bail};

    use super::{ChartBackend, ChartHandle, ChartSlot, ChartSpec};

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Event {
        Created { id: usize, slot: ChartSlot },
        Destroyed { id: usize },
    }

    /// Backend that records every create/destroy for lifecycle assertions.
    #[derive(Default)]
    pub(crate) struct RecordingBackend {
        pub(crate) events: Rc<RefCell<Vec<Event>>>,
        pub(crate) specs: Rc<RefCell<Vec<ChartSpec>>>,
        pub(crate) fail_next: bool,
        pub(crate) next_id: usize,
    }

    pub(crate) struct RecordedChart {
        id: usize,
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl ChartHandle for RecordedChart {
        fn destroy(self) {
            self.events
                .borrow_mut()
                .push(Event::Destroyed { id: self.id });
        }
    }

    impl ChartBackend for RecordingBackend {
        type Handle = RecordedChart;

        fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<RecordedChart> {
            if self.fail_next {
                self.fail_next = false;
                bail!("canvas unavailable");
            }
            let id = self.next_id;
            self.next_id += 1;
            self.events.borrow_mut().push(Event::Created { id, slot });
            self.specs.borrow_mut().push(spec.clone());
            Ok(RecordedChart {
                id,
                events: Rc::clone(&self.events),
            })
        }
    }

    pub(crate) fn destroy_count(events: &[Event], id: usize) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, Event::Destroyed { id: d } if *d == id))
            .count()
    }
}
