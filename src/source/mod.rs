//! Access log acquisition
//!
//! An [`ArchiveSource`] yields a local gzip archive, either downloaded
//! ([`HttpArchive`]) or already on disk ([`LocalArchive`]). The archive
//! is then extracted or streamed with the helpers in [`archive`], and its
//! bytes are decoded into lines by [`Latin1Lines`].

pub mod archive;
pub mod http;
pub mod lines;
pub mod local;

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use archive::{extract_gzip, extracted_path, open_log, prepare_log};
pub use http::HttpArchive;
pub use lines::Latin1Lines;
pub use local::LocalArchive;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download failed: status code {status}\n{body}")]
    Status { status: u16, body: String },
    #[error("archive not found at {}", .0.display())]
    Missing(PathBuf),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Make the archive available locally and return its path
    ///
    /// Sources that download place the archive in `dest_dir`, creating it
    /// if needed. Sources already on disk return their own path.
    async fn fetch(&self, dest_dir: &Path) -> SourceResult<PathBuf>;

    /// Human readable origin, for logs
    fn describe(&self) -> String;
}
