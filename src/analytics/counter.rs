//! Order-preserving occurrence counter
//!
//! Counts are kept in a vector in the order each `(day, value)` pair was
//! first seen, with a per-day hash index pointing into it. Index keys and
//! entries share one allocation per value. The ranker relies on the entry
//! order to break ties between equal counts.

use std::collections::HashMap;
use std::sync::Arc;

use crate::analytics::models::CountEntry;
use crate::models::DayKey;

#[derive(Debug, Default)]
pub struct DayCounter {
    /// Position of each value's entry, grouped by day
    index: HashMap<DayKey, HashMap<Arc<str>, usize>>,
    /// Entries in first-seen order
    entries: Vec<CountEntry>,
}

impl DayCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `value` on `day`
    pub fn increment(&mut self, day: DayKey, value: &str) {
        let values = self.index.entry(day).or_default();

        if let Some(&idx) = values.get(value) {
            self.entries[idx].count += 1;
            return;
        }

        let value: Arc<str> = Arc::from(value);
        values.insert(Arc::clone(&value), self.entries.len());
        self.entries.push(CountEntry {
            day,
            value,
            count: 1,
        });
    }

    /// Current count for a pair, `None` if it was never seen
    pub fn get(&self, day: DayKey, value: &str) -> Option<u64> {
        self.index
            .get(&day)
            .and_then(|values| values.get(value))
            .map(|&idx| self.entries[idx].count)
    }

    /// All entries in first-seen order
    pub fn entries(&self) -> &[CountEntry] {
        &self.entries
    }

    /// Consume the counter, returning entries in first-seen order
    pub fn into_entries(self) -> Vec<CountEntry> {
        self.entries
    }

    /// Number of distinct days observed
    pub fn days(&self) -> usize {
        self.index.len()
    }

    /// Number of distinct `(day, value)` pairs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
