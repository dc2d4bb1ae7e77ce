//! Focus probe infrastructure module
//!
//! Tracks which window the desktop considers focused, so typing can
//! suspend the moment the target loses focus.

mod factory;
mod fixed;
#[cfg(target_os = "windows")]
mod windows;
#[cfg(target_os = "linux")]
mod xdotool;

pub use factory::{
    create_focus_probe, detect_focus_tool, FocusTool, FocusToolPreference, ParseFocusToolError,
};
pub use fixed::FixedFocus;
#[cfg(target_os = "windows")]
pub use windows::WindowsFocus;
#[cfg(target_os = "linux")]
pub use xdotool::XdotoolFocus;
