//! Ydotool keystroke adapter for Wayland support

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{Keystroke, KeystrokeError};

/// Ydotool keystroke adapter for Wayland keystroke injection
///
/// Requires ydotoold daemon to be running and user to be in the input group.
pub struct YdotoolKeystroke;

impl YdotoolKeystroke {
    /// Create a new ydotool keystroke adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for YdotoolKeystroke {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Keystroke for YdotoolKeystroke {
    async fn send_char(&self, c: char) -> Result<(), KeystrokeError> {
        let mut buf = [0u8; 4];
        let status = Command::new("ydotool")
            .args(["type", "--", c.encode_utf8(&mut buf)])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    KeystrokeError::ToolNotFound("ydotool".to_string())
                } else {
                    KeystrokeError::TypeFailed(e.to_string())
                }
            })?;

        if !status.success() {
            return Err(KeystrokeError::TypeFailed(format!(
                "ydotool exited with status: {}",
                status
            )));
        }

        Ok(())
    }
}
