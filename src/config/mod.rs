use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::OutputFormat;
use crate::source::http::DEFAULT_USER_AGENT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub source: SourceConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory downloaded archives are saved and extracted into
    pub data_dir: PathBuf,
    /// Archive used when no URL is given
    pub backup_archive: PathBuf,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of top entries per day when `-n` is not passed
    #[serde(default = "ReportConfig::default_top_n")]
    pub top_n: usize,
    pub output: OutputFormat,
}

impl ReportConfig {
    const fn default_top_n() -> usize {
        2
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                data_dir: PathBuf::from("data"),
                backup_archive: PathBuf::from("backup").join("backup_NASA_access_log_Jul95.gz"),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            report: ReportConfig {
                top_n: ReportConfig::default_top_n(),
                output: OutputFormat::Text,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let data_dir = lookup("LOGRANK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.source.data_dir);

        let backup_archive = lookup("LOGRANK_BACKUP_ARCHIVE")
            .map(PathBuf::from)
            .unwrap_or(defaults.source.backup_archive);

        let user_agent = lookup("LOGRANK_USER_AGENT").unwrap_or(defaults.source.user_agent);

        let top_n = match lookup("LOGRANK_TOP_N") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .with_context(|| format!("LOGRANK_TOP_N must be a non-negative integer, got '{value}'"))?,
            None => defaults.report.top_n,
        };

        let output = match lookup("LOGRANK_OUTPUT")
            .map(|v| v.to_lowercase())
            .as_deref()
        {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                tracing::warn!(
                    "Unknown LOGRANK_OUTPUT '{other}', falling back to 'text'. Supported values: text, json"
                );
                OutputFormat::Text
            }
        };

        Ok(Config {
            source: SourceConfig {
                data_dir,
                backup_archive,
                user_agent,
            },
            report: ReportConfig { top_n, output },
        })
    }
}
