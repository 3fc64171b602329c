use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::source::{ArchiveSource, SourceError, SourceResult};

/// Archive already present on disk, such as the bundled backup copy
#[derive(Debug, Clone)]
pub struct LocalArchive {
    path: PathBuf,
}

impl LocalArchive {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ArchiveSource for LocalArchive {
    async fn fetch(&self, _dest_dir: &Path) -> SourceResult<PathBuf> {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => Ok(self.path.clone()),
            Ok(_) => Err(SourceError::Missing(self.path.clone())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::Missing(self.path.clone()))
            }
            Err(e) => Err(SourceError::io(
                format!("Failed to stat {}", self.path.display()),
                e,
            )),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_archive() {
        let archive = LocalArchive::new("/nonexistent/logrank/backup.gz");
        let result = archive.fetch(Path::new("data")).await;
        assert!(matches!(result, Err(SourceError::Missing(_))));
    }

    #[tokio::test]
    async fn test_directory_is_not_an_archive() {
        let archive = LocalArchive::new(std::env::temp_dir());
        let result = archive.fetch(Path::new("data")).await;
        assert!(matches!(result, Err(SourceError::Missing(_))));
    }
}
