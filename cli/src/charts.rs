use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use anyhow::{Result, bail};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Columns},
};
use tracing::debug;

use fitplan_core::chart::{ChartBackend, ChartHandle, ChartKind, ChartSlot, ChartSpec};

const BAR_WIDTH: usize = 30;

type Frames = Rc<RefCell<BTreeMap<usize, String>>>;

/// Terminal rendering sink. Each created chart becomes a text frame on a
/// shared canvas; destroying the handle erases the frame, so only live charts
/// are printed when the command finishes.
#[derive(Default)]
pub(crate) struct TerminalCharts {
    frames: Frames,
    next_id: usize,
}

pub(crate) struct TerminalChart {
    id: usize,
    frames: Frames,
}

impl ChartHandle for TerminalChart {
    fn destroy(self) {
        self.frames.borrow_mut().remove(&self.id);
        debug!(id = self.id, "erased chart frame");
    }
}

impl ChartBackend for TerminalCharts {
    type Handle = TerminalChart;

    fn create(&mut self, slot: ChartSlot, spec: &ChartSpec) -> Result<TerminalChart> {
        let frame = match spec.kind {
            ChartKind::Doughnut => draw_proportion(spec)?,
            ChartKind::Line => draw_trend(spec),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.frames.borrow_mut().insert(id, frame);
        debug!(id, ?slot, "drew chart frame");
        Ok(TerminalChart {
            id,
            frames: Rc::clone(&self.frames),
        })
    }
}

impl TerminalCharts {
    /// A handle on the canvas that outlives the backend once it moves into a
    /// tracker.
    pub(crate) fn canvas(&self) -> Canvas {
        Canvas {
            frames: Rc::clone(&self.frames),
        }
    }
}

pub(crate) struct Canvas {
    frames: Frames,
}

impl Canvas {
    /// Prints every live frame in creation order.
    pub(crate) fn print(&self) {
        for frame in self.frames.borrow().values() {
            println!("\n{frame}");
        }
    }

    #[cfg(test)]
    fn live(&self) -> Vec<String> {
        self.frames.borrow().values().cloned().collect()
    }
}

/// Two-slice donut as a horizontal proportion bar.
#[allow(clippy::cast_precision_loss, clippy::cast_sign_loss)]
fn draw_proportion(spec: &ChartSpec) -> Result<String> {
    let Some(dataset) = spec.datasets.first() else {
        bail!("proportion chart needs a dataset");
    };
    let [filled, rest] = dataset.data.as_slice() else {
        bail!("proportion chart needs exactly two slices");
    };
    let total = filled + rest;
    let share = if total > 0.0 { filled / total } else { 0.0 };
    let cells = (share * BAR_WIDTH as f64).round() as usize;
    let cells = cells.min(BAR_WIDTH);

    let mut out = String::new();
    let centre = spec.center_text.as_deref().unwrap_or_default();
    out.push_str(&format!(
        "[{}{}] {centre}\n",
        "█".repeat(cells),
        "░".repeat(BAR_WIDTH - cells)
    ));
    for (i, label) in spec.labels.iter().enumerate() {
        let marker = if i == 0 { "█" } else { "░" };
        match spec.value_labels.get(i).and_then(Option::as_deref) {
            Some(value) => out.push_str(&format!("  {marker} {label}: {value}\n")),
            None => out.push_str(&format!("  {marker} {label}\n")),
        }
    }
    Ok(out.trim_end().to_string())
}

/// Line chart as a table with a bar per point scaled between the min and
/// max of the series.
fn draw_trend(spec: &ChartSpec) -> String {
    #[derive(Tabled)]
    struct PointRow {
        #[tabled(rename = "Day")]
        day: String,
        #[tabled(rename = "Weight (kg)")]
        value: String,
        #[tabled(rename = "")]
        bar: String,
    }

    let values = spec
        .datasets
        .first()
        .map(|d| d.data.as_slice())
        .unwrap_or_default();
    if values.is_empty() {
        return "No weights logged yet.".to_string();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let rows: Vec<PointRow> = spec
        .labels
        .iter()
        .zip(values)
        .map(|(label, v)| PointRow {
            day: label.clone(),
            value: format!("{v:.1}"),
            bar: "▇".repeat(bar_cells(*v, min, max)),
        })
        .collect();

    let mut table = Table::new(&rows);
    table
        .with(Style::rounded())
        .with(Modify::new(Columns::single(1)).with(Alignment::right()));
    match spec.y_title {
        Some(title) => format!("{title}\n{table}"),
        None => table.to_string(),
    }
}

#[allow(clippy::cast_sign_loss)]
fn bar_cells(value: f64, min: f64, max: f64) -> usize {
    const SPAN: f64 = 20.0;
    if max - min < f64::EPSILON {
        return SPAN as usize / 2;
    }
    1 + ((value - min) / (max - min) * (SPAN - 1.0)).round() as usize
}
