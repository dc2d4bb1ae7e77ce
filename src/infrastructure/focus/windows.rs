//! Windows focus probe via the Win32 foreground window

use async_trait::async_trait;

use crate::application::ports::{FocusError, FocusProbe};
use crate::domain::typing::WindowId;

/// Focus probe backed by `GetForegroundWindow`
pub struct WindowsFocus;

impl WindowsFocus {
    /// Create a new Windows focus probe
    pub fn new() -> Self {
        Self
    }
}

impl Default for WindowsFocus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FocusProbe for WindowsFocus {
    async fn active_window(&self) -> Result<WindowId, FocusError> {
        use windows_sys::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd == 0 {
            return Err(FocusError::QueryFailed(
                "no foreground window".to_string(),
            ));
        }

        Ok(WindowId::new(hwnd.to_string()))
    }
}
