//! Progress sink port interface

/// Progress notification for one character about to be typed.
///
/// `index` is the cursor position being emitted; `total` is the script
/// length, carried so a sink can render position without holding its
/// own copy of the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub index: usize,
    pub total: usize,
}

/// Port for per-character progress notifications.
///
/// The worker calls `publish` once per character, before the keystroke
/// for that character is sent, and `clear` when a stop removes any
/// visible marker. Implementations must be cheap and non-blocking; a
/// sink that drives a UI owns marshaling onto the thread that owns the
/// widget. A sink that lags the session must treat an event with
/// `index >= total` as a silent no-op rather than an error.
pub trait ProgressSink: Send + Sync {
    /// Handle a progress notification.
    fn publish(&self, event: ProgressEvent);

    /// Remove any visible progress marker.
    fn clear(&self);
}

/// Blanket implementation for boxed sink types
impl ProgressSink for Box<dyn ProgressSink> {
    fn publish(&self, event: ProgressEvent) {
        self.as_ref().publish(event)
    }

    fn clear(&self) {
        self.as_ref().clear()
    }
}
