//! Text source port interface

use async_trait::async_trait;
use thiserror::Error;

/// Text source errors
#[derive(Debug, Clone, Error)]
pub enum TextSourceError {
    #[error("Failed to read source text: {0}")]
    ReadFailed(String),
}

/// Port for fetching the text to type.
///
/// Called once per new session, when a start request arrives while
/// idle. A file-backed source re-reads on every call so edits made
/// between sessions take effect; an in-memory source returns the same
/// text every time.
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Fetch the current source text.
    async fn read_text(&self) -> Result<String, TextSourceError>;
}

/// Blanket implementation for boxed text source types
#[async_trait]
impl TextSource for Box<dyn TextSource> {
    async fn read_text(&self) -> Result<String, TextSourceError> {
        self.as_ref().read_text().await
    }
}
