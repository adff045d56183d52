use std::marker::PhantomData;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::store::KeyValueStore;

/// Where the records of a [`Snapshot`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Decoded from the stored value.
    Stored,
    /// Nothing stored under the key yet (or it was cleared).
    Absent,
    /// A value is stored but does not decode; treated as empty.
    Corrupt,
}

/// The fully decoded copy of a log at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub records: Vec<T>,
    pub origin: Origin,
}

impl<T> Snapshot<T> {
    fn empty(origin: Origin) -> Self {
        Self {
            records: Vec::new(),
            origin,
        }
    }

    #[must_use]
    pub fn is_corrupt(&self) -> bool {
        self.origin == Origin::Corrupt
    }
}

/// Ordered records persisted as one JSON array under `key`.
///
/// Every mutation is a full read-modify-write of the array; there is no
/// cached copy that could drift from what is stored.
pub struct EntryLog<'s, T> {
    store: &'s dyn KeyValueStore,
    key: &'static str,
    _record: PhantomData<T>,
}

impl<'s, T> EntryLog<'s, T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: &'s dyn KeyValueStore, key: &'static str) -> Self {
        Self {
            store,
            key,
            _record: PhantomData,
        }
    }

    #[must_use]
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn snapshot(&self) -> Result<Snapshot<T>> {
        let Some(raw) = self.store.get(self.key)? else {
            return Ok(Snapshot::empty(Origin::Absent));
        };

        // A stored `null` decodes to an empty log, same as an absent key.
        match serde_json::from_str::<Option<Vec<T>>>(&raw) {
            Ok(records) => Ok(Snapshot {
                records: records.unwrap_or_default(),
                origin: Origin::Stored,
            }),
            Err(err) => {
                warn!(key = self.key, error = %err, "stored log does not decode, treating as empty");
                Ok(Snapshot::empty(Origin::Corrupt))
            }
        }
    }

    pub fn load(&self) -> Result<Vec<T>> {
        Ok(self.snapshot()?.records)
    }

    pub fn append(&self, record: T) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        self.write(&records)?;
        debug!(key = self.key, len = records.len(), "appended record");
        Ok(())
    }

    /// Removes the record at `index`. Out of range is a no-op and writes
    /// nothing.
    pub fn remove_at(&self, index: usize) -> Result<Option<T>> {
        let mut records = self.load()?;
        if index >= records.len() {
            debug!(key = self.key, index, len = records.len(), "remove_at out of range");
            return Ok(None);
        }
        let removed = records.remove(index);
        self.write(&records)?;
        debug!(key = self.key, index, len = records.len(), "removed record");
        Ok(Some(removed))
    }

    /// Drops the key; the next load sees an absent log.
    pub fn clear(&self) -> Result<bool> {
        let removed = self.store.remove(self.key)?;
        debug!(key = self.key, removed, "cleared log");
        Ok(removed)
    }

    fn write(&self, records: &[T]) -> Result<()> {
        let payload = serde_json::to_string(records)
            .with_context(|| format!("Failed to encode log '{}'", self.key))?;
        self.store.set(self.key, &payload)
    }
}
