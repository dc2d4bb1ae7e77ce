//! Fixed focus probe

use async_trait::async_trait;

use crate::application::ports::{FocusError, FocusProbe};
use crate::domain::typing::WindowId;

/// Focus probe that always reports the same window.
///
/// Used for dry runs and for environments without a usable focus tool.
/// The reported window always matches the captured target, so typing
/// never suspends on focus loss.
pub struct FixedFocus {
    id: WindowId,
}

impl FixedFocus {
    /// Create a fixed focus probe with a placeholder window id
    pub fn new() -> Self {
        Self {
            id: WindowId::new("fixed"),
        }
    }

    /// Create with a specific window id
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: WindowId::new(id),
        }
    }
}

impl Default for FixedFocus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FocusProbe for FixedFocus {
    async fn active_window(&self) -> Result<WindowId, FocusError> {
        Ok(self.id.clone())
    }
}
