use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed access log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Requesting host or IP address
    pub client: String,

    /// Request time in the offset the log was written with
    pub timestamp: DateTime<FixedOffset>,

    /// Raw request line (method, path and protocol as one field)
    pub request: String,

    /// HTTP status code as written in the log
    pub response_code: String,

    /// Response size as written in the log (`-` when unknown)
    pub size: String,
}

impl LogRecord {
    /// Returns the value this record contributes to the given dimension
    pub fn value(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Clients => &self.client,
            Dimension::Requests => &self.request,
        }
    }

    pub fn size_bytes(&self) -> Option<u64> {
        self.size.parse().ok()
    }
}

/// Calendar day a record falls on, taken in the record's own offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(pub NaiveDate);

impl DayKey {
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Aggregation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Clients,
    Requests,
}

impl Dimension {
    /// Column heading used when rendering results
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Clients => "client",
            Dimension::Requests => "request",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Clients => f.write_str("clients"),
            Dimension::Requests => f.write_str("requests"),
        }
    }
}
