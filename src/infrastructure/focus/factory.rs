//! Focus tool factory with automatic detection

use std::fmt;
use std::str::FromStr;

#[cfg(target_os = "linux")]
use std::process::Stdio;

#[cfg(target_os = "linux")]
use tokio::process::Command;

use crate::application::ports::{FocusError, FocusProbe};

use super::fixed::FixedFocus;
#[cfg(target_os = "linux")]
use super::xdotool::XdotoolFocus;
#[cfg(target_os = "windows")]
use super::windows::WindowsFocus;

/// Available focus tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTool {
    /// Linux: xdotool (X11)
    Xdotool,
    /// Windows: Win32 foreground window
    Windows,
    /// No real tracking; focus loss is never detected
    Fixed,
}

impl fmt::Display for FocusTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusTool::Xdotool => write!(f, "xdotool"),
            FocusTool::Windows => write!(f, "windows"),
            FocusTool::Fixed => write!(f, "none"),
        }
    }
}

/// User preference for focus tool selection.
///
/// `Auto` picks the platform tool and degrades to `None` when nothing
/// usable is installed. `None` disables focus tracking outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusToolPreference {
    /// Auto-detect the platform focus tool
    #[default]
    Auto,
    /// Use xdotool (Linux only, X11)
    #[cfg(target_os = "linux")]
    Xdotool,
    /// Report a fixed window, disabling focus-loss suspension
    None,
}

impl fmt::Display for FocusToolPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusToolPreference::Auto => write!(f, "auto"),
            #[cfg(target_os = "linux")]
            FocusToolPreference::Xdotool => write!(f, "xdotool"),
            FocusToolPreference::None => write!(f, "none"),
        }
    }
}

/// Error type for parsing focus tool preference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFocusToolError {
    pub value: String,
    pub valid_options: &'static str,
}

impl fmt::Display for ParseFocusToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid focus tool '{}'. Valid options: {}",
            self.value, self.valid_options
        )
    }
}

impl std::error::Error for ParseFocusToolError {}

impl FromStr for FocusToolPreference {
    type Err = ParseFocusToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(FocusToolPreference::Auto),
            #[cfg(target_os = "linux")]
            "xdotool" => Ok(FocusToolPreference::Xdotool),
            "none" => Ok(FocusToolPreference::None),
            _ => Err(ParseFocusToolError {
                value: s.to_string(),
                #[cfg(target_os = "linux")]
                valid_options: "auto, xdotool, none",
                #[cfg(not(target_os = "linux"))]
                valid_options: "auto, none",
            }),
        }
    }
}

/// Check if a tool binary is available using `which`
#[cfg(target_os = "linux")]
async fn is_tool_available(tool: &str) -> bool {
    Command::new("which")
        .arg(tool)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Detect the best available focus tool.
///
/// On Windows: the Win32 foreground window.
/// On Linux: xdotool if installed, otherwise no tracking.
pub async fn detect_focus_tool() -> FocusTool {
    #[cfg(target_os = "windows")]
    {
        return FocusTool::Windows;
    }

    #[cfg(target_os = "linux")]
    {
        if is_tool_available("xdotool").await {
            return FocusTool::Xdotool;
        }
        FocusTool::Fixed
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux")))]
    {
        FocusTool::Fixed
    }
}

/// Create a focus probe using the specified preference.
///
/// Returns the probe and the tool it is backed by, or an error if an
/// explicitly requested tool is not available.
pub async fn create_focus_probe(
    preference: FocusToolPreference,
) -> Result<(Box<dyn FocusProbe>, FocusTool), FocusError> {
    match preference {
        FocusToolPreference::Auto => {
            let tool = detect_focus_tool().await;
            Ok((create_specific_tool(tool), tool))
        }
        #[cfg(target_os = "linux")]
        FocusToolPreference::Xdotool => {
            if is_tool_available("xdotool").await {
                Ok((
                    Box::new(XdotoolFocus::new()) as Box<dyn FocusProbe>,
                    FocusTool::Xdotool,
                ))
            } else {
                Err(FocusError::ToolNotFound("xdotool".to_string()))
            }
        }
        FocusToolPreference::None => Ok((
            Box::new(FixedFocus::new()) as Box<dyn FocusProbe>,
            FocusTool::Fixed,
        )),
    }
}

/// Create a specific focus tool adapter
fn create_specific_tool(tool: FocusTool) -> Box<dyn FocusProbe> {
    match tool {
        #[cfg(target_os = "linux")]
        FocusTool::Xdotool => Box::new(XdotoolFocus::new()) as Box<dyn FocusProbe>,
        #[cfg(target_os = "windows")]
        FocusTool::Windows => Box::new(WindowsFocus::new()) as Box<dyn FocusProbe>,
        _ => Box::new(FixedFocus::new()) as Box<dyn FocusProbe>,
    }
}
