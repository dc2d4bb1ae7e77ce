//! In-memory text source

use async_trait::async_trait;

use crate::application::ports::{TextSource, TextSourceError};

/// Text source that serves a string captured up front.
///
/// Used for text piped on stdin, which cannot be read twice; every
/// session types the same captured text.
pub struct MemoryTextSource {
    text: String,
}

impl MemoryTextSource {
    /// Create a new in-memory text source
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextSource for MemoryTextSource {
    async fn read_text(&self) -> Result<String, TextSourceError> {
        Ok(self.text.clone())
    }
}
