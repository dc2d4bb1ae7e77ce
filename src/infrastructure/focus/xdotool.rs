//! Xdotool focus probe for X11 support

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{FocusError, FocusProbe};
use crate::domain::typing::WindowId;

/// Focus probe that asks xdotool for the active X11 window
pub struct XdotoolFocus;

impl XdotoolFocus {
    /// Create a new xdotool focus probe
    pub fn new() -> Self {
        Self
    }
}

impl Default for XdotoolFocus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FocusProbe for XdotoolFocus {
    async fn active_window(&self) -> Result<WindowId, FocusError> {
        let output = Command::new("xdotool")
            .arg("getactivewindow")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FocusError::ToolNotFound("xdotool".to_string())
                } else {
                    FocusError::QueryFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            return Err(FocusError::QueryFailed(format!(
                "xdotool exited with status: {}",
                output.status
            )));
        }

        let id = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if id.is_empty() {
            return Err(FocusError::QueryFailed(
                "no active window reported".to_string(),
            ));
        }

        Ok(WindowId::new(id))
    }
}
