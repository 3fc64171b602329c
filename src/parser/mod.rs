//! Access log line parser
//!
//! Lines follow the common log layout:
//!
//! ```text
//! 199.72.81.55 - - [01/Jul/1995:00:00:01 -0400] "GET /history/apollo/ HTTP/1.0" 200 6245
//! ```
//!
//! Fields are separated by runs of whitespace. A field opening with a
//! double quote runs to the closing quote, so the request line stays a
//! single field. The bracketed timestamp is split in two by the space
//! before the offset and is rejoined before parsing.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use crate::models::LogRecord;

/// Minimum number of fields a usable line carries
pub const MIN_FIELDS: usize = 8;

/// Layout of the rejoined `fields[3] + fields[4]` timestamp
pub const TIMESTAMP_FORMAT: &str = "[%d/%b/%Y:%H:%M:%S%z]";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected at least 8 fields with a non-empty client, found {fields}")]
    Malformed { fields: usize },
    #[error("timestamp {value:?} does not match [dd/Mon/yyyy:HH:MM:SS ±HHMM]")]
    BadTimestamp { value: String },
}

/// Parse one raw log line into a record
pub fn parse_line(line: &str) -> Result<LogRecord, ParseError> {
    let fields = split_fields(line);
    if fields.len() < MIN_FIELDS || fields[0].is_empty() {
        return Err(ParseError::Malformed {
            fields: fields.len(),
        });
    }

    let raw_timestamp = format!("{}{}", fields[3], fields[4]);
    let timestamp = parse_timestamp(&raw_timestamp)?;

    let mut fields = fields.into_iter();
    let client = fields.next().unwrap_or_default();
    let mut fields = fields.skip(4);
    let request = fields.next().unwrap_or_default();
    let response_code = fields.next().unwrap_or_default();
    let size = fields.next().unwrap_or_default();

    Ok(LogRecord {
        client,
        timestamp,
        request,
        response_code,
        size,
    })
}

/// Parse a rejoined `[dd/Mon/yyyy:HH:MM:SS±HHMM]` timestamp
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    DateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| ParseError::BadTimestamp {
        value: value.to_string(),
    })
}

/// Split a line into whitespace separated fields, keeping quoted runs whole
///
/// Quotes are only significant at the start of a field and are dropped
/// from the output. Inside a quoted run `""` stands for a literal quote.
/// An unterminated quote runs to the end of the line.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_ascii_whitespace()).is_some() {}

        let Some(first) = chars.next() else {
            break;
        };

        let mut field = String::new();
        if first == '"' {
            while let Some(c) = chars.next() {
                if c == '"' && chars.next_if_eq(&'"').is_none() {
                    break;
                }
                field.push(c);
            }
        } else {
            field.push(first);
        }

        while let Some(c) = chars.next_if(|c| !c.is_ascii_whitespace()) {
            field.push(c);
        }

        fields.push(field);
    }

    fields
}
