//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod keystroke;
pub mod focus;
pub mod source;
pub mod progress;
pub mod notifier;
pub mod config;

// Re-export common types
pub use keystroke::{Keystroke, KeystrokeError};
pub use focus::{FocusError, FocusProbe};
pub use source::{TextSource, TextSourceError};
pub use progress::{ProgressEvent, ProgressSink};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use config::ConfigStore;
