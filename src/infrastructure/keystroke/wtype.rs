//! Wtype keystroke adapter for Wayland support

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{Keystroke, KeystrokeError};

/// Wtype keystroke adapter for Wayland keystroke injection
///
/// Uses the wtype tool which is a Wayland-native text input tool.
pub struct WtypeKeystroke;

impl WtypeKeystroke {
    /// Create a new wtype keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for WtypeKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for WtypeKeystroke {
    async fn send_char(&self, c: char) -> Result<(), KeystrokeError> {
        let mut buf = [0u8; 4];
        let status = Command::new("wtype")
            .arg(c.encode_utf8(&mut buf))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeystrokeError::ToolNotFound("wtype".to_string())
                } else {
                    KeystrokeError::TypeFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(KeystrokeError::TypeFailed(format!(
                "wtype exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
