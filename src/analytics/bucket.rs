use crate::models::{DayKey, LogRecord};

/// Truncate a record's timestamp to its calendar day
///
/// The day is taken in the offset embedded in the timestamp; records are
/// not normalized to a common zone.
pub fn bucket(record: &LogRecord) -> DayKey {
    DayKey(record.timestamp.date_naive())
}
