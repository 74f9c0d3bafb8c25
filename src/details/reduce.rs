//! Deduplication of repaired detail entries into an ordered table.

use super::split::split;
use super::{DetailEntry, RawDetailEntry};
use std::collections::HashMap;
use tracing::debug;

/// Raw key of the feature list, which is rendered separately.
pub const KEY_FEATURES: &str = "Key Features";

/// Ordered key/value table with unique keys.
///
/// Entries keep the position where their key first appeared.
#[derive(Debug, Clone, Default)]
pub struct DetailsTable {
    entries: Vec<DetailEntry>,
    index: HashMap<String, usize>,
}

impl DetailsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry.
    ///
    /// Empty keys are dropped. A repeated key only replaces the stored value
    /// when that value is empty and the new one is not.
    pub fn insert(&mut self, entry: DetailEntry) {
        if entry.key.is_empty() {
            return;
        }

        match self.index.get(&entry.key) {
            Some(&pos) => {
                let existing = &mut self.entries[pos];
                if existing.value.is_empty() && !entry.value.is_empty() {
                    existing.value = entry.value;
                }
            }
            None => {
                self.index.insert(entry.key.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(|&pos| self.entries[pos].value.as_str())
    }

    pub fn entries(&self) -> &[DetailEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<DetailEntry> {
        self.entries
    }
}

/// Builds a [`DetailsTable`] from raw backend entries.
#[derive(Debug, Clone)]
pub struct DetailsReducer {
    exclude_key: String,
}

impl Default for DetailsReducer {
    fn default() -> Self {
        Self { exclude_key: KEY_FEATURES.to_string() }
    }
}

impl DetailsReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a different raw key to leave out of the table.
    pub fn excluding(mut self, key: impl Into<String>) -> Self {
        self.exclude_key = key.into();
        self
    }

    /// Repairs and deduplicates `entries` in order.
    ///
    /// The excluded key is matched exactly against the raw key, before any
    /// normalization.
    pub fn reduce<'a, I>(&self, entries: I) -> DetailsTable
    where
        I: IntoIterator<Item = &'a RawDetailEntry>,
    {
        let mut table = DetailsTable::new();
        let mut seen = 0usize;

        for raw in entries {
            if raw.key == self.exclude_key {
                continue;
            }
            seen += 1;
            table.insert(split(&raw.key, &raw.value));
        }

        debug!("Reduced {} detail entries to {}", seen, table.len());
        table
    }
}
