//! Text and JSON rendering of ranked results

use serde::{Deserialize, Serialize};

use crate::analytics::RankedResult;
use crate::models::Dimension;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(
    result: &RankedResult,
    dimension: Dimension,
    format: OutputFormat,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(text(result, dimension)),
        OutputFormat::Json => json(result),
    }
}

/// Fixed-width table, one row per ranked entry
pub fn text(result: &RankedResult, dimension: Dimension) -> String {
    if result.is_empty() {
        return format!("No {dimension} found\n");
    }

    let heading = dimension.column();
    let value_width = result
        .iter()
        .flat_map(|ranking| ranking.entries.iter())
        .map(|entry| entry.value.chars().count())
        .chain(std::iter::once(heading.len()))
        .max()
        .unwrap_or_default();

    let mut out = format!("{:<10}  {:<value_width$}  {:>8}\n", "date", heading, "count");
    out.push_str(&"-".repeat(10 + 2 + value_width + 2 + 8));
    out.push('\n');

    for ranking in result.iter() {
        let day = ranking.day.to_string();
        for (i, entry) in ranking.entries.iter().enumerate() {
            // Day is only printed on the first row of each group
            let date = if i == 0 { day.as_str() } else { "" };
            out.push_str(&format!(
                "{:<10}  {:<value_width$}  {:>8}\n",
                date, entry.value, entry.count
            ));
        }
    }

    out
}

pub fn json(result: &RankedResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
