//! Keystroke port interface

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("{0} not found. Please install {0}.")]
    ToolNotFound(String),

    #[error("Failed to type character: {0}")]
    TypeFailed(String),
}

/// Port for keystroke injection.
///
/// Injection always targets whichever window currently holds OS focus;
/// pacing between characters is the caller's responsibility.
#[async_trait]
pub trait Keystroke: Send + Sync {
    /// Send one character as a keystroke.
    ///
    /// # Arguments
    /// * `c` - The character to type
    ///
    /// # Returns
    /// Ok(()) on success, error otherwise
    async fn send_char(&self, c: char) -> Result<(), KeystrokeError>;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl Keystroke for Box<dyn Keystroke> {
    async fn send_char(&self, c: char) -> Result<(), KeystrokeError> {
        self.as_ref().send_char(c).await
    }
}
