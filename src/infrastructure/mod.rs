//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external tools like xdotool, ydotool, and the
//! desktop notification service.

pub mod config;
pub mod focus;
pub mod keystroke;
pub mod notification;
pub mod source;

// Re-export adapters
pub use config::XdgConfigStore;
pub use focus::{create_focus_probe, FixedFocus, FocusTool, FocusToolPreference};
pub use keystroke::{create_keystroke, KeystrokeTool, KeystrokeToolPreference, NoOpKeystroke};
pub use notification::{create_notifier, NotifyRustNotifier};
pub use source::{FileTextSource, MemoryTextSource};
