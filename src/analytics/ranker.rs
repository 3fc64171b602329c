//! Per-day top-N ranking
//!
//! Entries are grouped by day, stably sorted by count descending and cut
//! to the first `n`. Equal counts keep the order in which their pairs
//! were first seen. Days left with no entries (only possible when
//! `n == 0`) are omitted from the result.

use std::collections::BTreeMap;

use crate::analytics::counter::DayCounter;
use crate::analytics::models::{CountEntry, DayRanking, RankedEntry, RankedResult};
use crate::models::DayKey;

/// Rank the counts held by a counter
pub fn rank(counts: &DayCounter, n: usize) -> RankedResult {
    rank_entries(counts.entries(), n)
}

/// Rank entries given in first-seen order
pub fn rank_entries(entries: &[CountEntry], n: usize) -> RankedResult {
    if n == 0 {
        return RankedResult::default();
    }

    let mut by_day: BTreeMap<DayKey, Vec<&CountEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| entry.count > 0) {
        by_day.entry(entry.day).or_default().push(entry);
    }

    let days = by_day
        .into_iter()
        .map(|(day, mut group)| {
            // sort_by is stable, so ties stay in first-seen order
            group.sort_by(|a, b| b.count.cmp(&a.count));
            let entries = group
                .into_iter()
                .take(n)
                .map(|entry| RankedEntry {
                    value: entry.value.to_string(),
                    count: entry.count,
                })
                .collect();
            DayRanking { day, entries }
        })
        .filter(|ranking| !ranking.entries.is_empty())
        .collect();

    RankedResult { days }
}
