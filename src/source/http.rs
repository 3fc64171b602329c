//! Archive download over HTTP(S)

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::source::{ArchiveSource, SourceError, SourceResult};

/// Some mirrors answer 406 to clients without a browser user agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:60.0) Gecko/20100101 Firefox/60.0";

/// File name used when the URL has no usable last path segment
const FALLBACK_ARCHIVE_NAME: &str = "access_log.gz";

/// Remote gzip archive
#[derive(Debug, Clone)]
pub struct HttpArchive {
    url: String,
    user_agent: String,
}

impl HttpArchive {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_user_agent(url, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Local file name for the archive: the last path segment of the URL
    /// with spaces replaced by underscores
    pub fn archive_name(&self) -> String {
        let path = self.url.split(['?', '#']).next().unwrap_or_default();
        let name = path.rsplit('/').next().unwrap_or_default();

        if name.is_empty() {
            FALLBACK_ARCHIVE_NAME.to_string()
        } else {
            name.replace(' ', "_")
        }
    }
}

#[async_trait]
impl ArchiveSource for HttpArchive {
    async fn fetch(&self, dest_dir: &Path) -> SourceResult<PathBuf> {
        tokio::fs::create_dir_all(dest_dir).await.map_err(|e| {
            SourceError::io(format!("Failed to create {}", dest_dir.display()), e)
        })?;

        let archive_path = dest_dir.join(self.archive_name());

        let http_error = |source: reqwest::Error| SourceError::Http {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::Client::builder()
            .user_agent(self.user_agent.as_str())
            .build()
            .map_err(http_error)?;

        let response = client.get(&self.url).send().await.map_err(http_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Download of {} failed with status {}", self.url, status);
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(http_error)?;
        info!("Saving {} bytes to {}", bytes.len(), archive_path.display());

        tokio::fs::write(&archive_path, &bytes).await.map_err(|e| {
            SourceError::io(format!("Failed to write {}", archive_path.display()), e)
        })?;

        Ok(archive_path)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
