//! Keystroke infrastructure module
//!
//! Provides per-character keystroke injection using native tools on
//! Linux (ydotool, wtype, xdotool) with enigo as the cross-platform
//! fallback.

mod enigo;
mod factory;
mod noop;
mod wtype;
mod xdotool;
mod ydotool;

pub use enigo::EnigoKeystroke;
pub use factory::{
    create_keystroke, detect_keystroke_tool, KeystrokeTool, KeystrokeToolPreference,
    ParseKeystrokeToolError,
};
pub use noop::NoOpKeystroke;
pub use wtype::WtypeKeystroke;
pub use xdotool::XdotoolKeystroke;
pub use ydotool::YdotoolKeystroke;
