//! Data models for per-day rankings

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::models::DayKey;

/// Occurrence count of one value on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub day: DayKey,
    /// Shared with the counter's lookup index
    pub value: Arc<str>,
    pub count: u64,
}

/// A ranked value within a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub value: String,
    pub count: u64,
}

/// Top entries for a single day, highest count first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRanking {
    pub day: DayKey,
    pub entries: Vec<RankedEntry>,
}

/// Per-day rankings in chronological order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedResult {
    pub days: Vec<DayRanking>,
}

impl RankedResult {
    /// Ranking for a specific day, if that day produced any entries
    pub fn get(&self, day: DayKey) -> Option<&DayRanking> {
        self.days
            .binary_search_by(|ranking| ranking.day.cmp(&day))
            .ok()
            .map(|idx| &self.days[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayRanking> {
        self.days.iter()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
