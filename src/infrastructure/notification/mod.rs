//! Notification infrastructure module
//!
//! Provides cross-platform desktop notification support using
//! notify-rust.

mod notify_rust;

pub use notify_rust::NotifyRustNotifier;

use crate::application::ports::Notifier;

/// Create the default notifier for the current platform
pub fn create_notifier() -> Box<dyn Notifier> {
    Box::new(NotifyRustNotifier::new())
}
