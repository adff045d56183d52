use anyhow::Result;
use tracing::info;

use crate::entry_log::{EntryLog, Snapshot};
use crate::error::ValidationError;
use crate::models::{Kilograms, WEIGHTS_KEY};
use crate::store::KeyValueStore;

pub struct WeightLog<'s> {
    log: EntryLog<'s, Kilograms>,
}

impl<'s> WeightLog<'s> {
    pub fn new(store: &'s dyn KeyValueStore) -> Self {
        Self {
            log: EntryLog::new(store, WEIGHTS_KEY),
        }
    }

    pub fn snapshot(&self) -> Result<Snapshot<Kilograms>> {
        self.log.snapshot()
    }

    /// All weights in the order they were logged.
    pub fn list(&self) -> Result<Vec<f64>> {
        Ok(self.log.load()?.into_iter().map(Kilograms::value).collect())
    }

    /// Most recent usable weight; legacy `null` entries are skipped.
    pub fn latest(&self) -> Result<Option<f64>> {
        Ok(self
            .log
            .load()?
            .iter()
            .rev()
            .map(|kg| kg.value())
            .find(|v| v.is_finite()))
    }

    pub fn log_weight(&self, raw: &str) -> Result<f64> {
        let weight = parse_weight(raw)?;
        self.log.append(Kilograms(weight))?;
        info!(weight, "logged weight");
        Ok(weight)
    }

    /// Forgets every logged weight.
    pub fn reset(&self) -> Result<()> {
        self.log.clear()?;
        info!("weight log reset");
        Ok(())
    }
}

pub fn parse_weight(raw: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::new("Please enter a valid number for weight!");
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }
    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }
    Ok(value)
}
