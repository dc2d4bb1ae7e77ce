//! File-backed text source

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{TextSource, TextSourceError};

/// Text source that re-reads a file on every capture.
///
/// Each new session picks up whatever the file contains at that
/// moment. A single trailing newline is dropped so files saved by
/// editors do not end with a stray Return keystroke.
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    /// Create a new file text source
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSource for FileTextSource {
    async fn read_text(&self) -> Result<String, TextSourceError> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            TextSourceError::ReadFailed(format!("{}: {}", self.path.display(), e))
        })?;

        let trimmed = content
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&content);

        Ok(trimmed.to_string())
    }
}
