//! Focus probe port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::typing::WindowId;

/// Focus query errors
#[derive(Debug, Clone, Error)]
pub enum FocusError {
    #[error("{0} not found. Please install {0}.")]
    ToolNotFound(String),

    #[error("Failed to query focused window: {0}")]
    QueryFailed(String),
}

/// Port for querying which window currently holds OS input focus.
///
/// The probe is stateless; remembering a target identity and comparing
/// later readings against it is the caller's concern. A focus change is
/// never an error here, only a different identity.
#[async_trait]
pub trait FocusProbe: Send + Sync {
    /// Identity of the window that currently holds focus.
    ///
    /// # Returns
    /// The focused window's identity, or an error if the query itself
    /// failed
    async fn active_window(&self) -> Result<WindowId, FocusError>;
}

/// Blanket implementation for boxed focus probe types
#[async_trait]
impl FocusProbe for Box<dyn FocusProbe> {
    async fn active_window(&self) -> Result<WindowId, FocusError> {
        self.as_ref().active_window().await
    }
}
