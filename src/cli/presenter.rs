//! CLI presenter for output formatting

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::{ProgressEvent, ProgressSink};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
    is_spinner_active: Arc<AtomicBool>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self {
            spinner: None,
            is_spinner_active: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
        self.is_spinner_active.store(true, Ordering::SeqCst);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Stop spinner without status
    pub fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        self.is_spinner_active.store(false, Ordering::SeqCst);
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (machine-readable responses)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Format typing progress bar
    pub fn format_progress(&self, typed: usize, total: usize) -> String {
        let percent = if total > 0 {
            (typed as f64 / total as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        // Build progress bar
        let bar_width = 20;
        let filled = ((percent / 100.0) * bar_width as f64) as usize;
        let empty = bar_width - filled;

        format!(
            "[{}{}] {}/{}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            typed,
            total
        )
    }

    /// Show the arming countdown
    pub fn show_arming(&mut self, remaining_secs: u64) {
        self.start_spinner(&format!(
            "Starting in {}s (focus the target window)",
            remaining_secs
        ));
    }

    /// Update the arming countdown
    pub fn update_arming(&self, remaining_secs: u64) {
        self.update_spinner(&format!(
            "Starting in {}s (focus the target window)",
            remaining_secs
        ));
    }

    /// Update typing progress
    pub fn update_typing_progress(&self, typed: usize, total: usize) {
        let progress = self.format_progress(typed, total);
        self.update_spinner(&format!("Typing... {}", progress));
    }

    /// Update typing progress while suspended
    pub fn update_suspended_progress(&self, reason: &str, typed: usize, total: usize) {
        let progress = self.format_progress(typed, total);
        self.update_spinner(&format!("{}... {}", reason, progress));
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress sink that shares the newest emission position with the
/// render loop.
///
/// `publish` runs on the typing worker, so it only stores integers;
/// drawing stays on the CLI side, which polls `position` at its own
/// pace. Clones share the same counters.
#[derive(Clone, Default)]
pub struct CliProgressSink {
    index: Arc<AtomicUsize>,
    total: Arc<AtomicUsize>,
}

impl CliProgressSink {
    /// Create a new sink with no recorded progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest (characters typed, script length) pair
    pub fn position(&self) -> (usize, usize) {
        (
            self.index.load(Ordering::SeqCst),
            self.total.load(Ordering::SeqCst),
        )
    }
}

impl ProgressSink for CliProgressSink {
    fn publish(&self, event: ProgressEvent) {
        // An event past the end of the script carries nothing to draw
        if event.index >= event.total {
            return;
        }
        self.index.store(event.index, Ordering::SeqCst);
        self.total.store(event.total, Ordering::SeqCst);
    }

    fn clear(&self) {
        self.index.store(0, Ordering::SeqCst);
        self.total.store(0, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_progress_at_start() {
        let presenter = Presenter::new();
        let progress = presenter.format_progress(0, 120);
        assert!(progress.contains("0/120"));
    }

    #[test]
    fn format_progress_at_half() {
        let presenter = Presenter::new();
        let progress = presenter.format_progress(60, 120);
        assert!(progress.contains("60/120"));
    }

    #[test]
    fn format_progress_at_end() {
        let presenter = Presenter::new();
        let progress = presenter.format_progress(120, 120);
        assert!(progress.contains("120/120"));
    }

    #[test]
    fn format_progress_empty_script() {
        let presenter = Presenter::new();
        let progress = presenter.format_progress(0, 0);
        assert!(progress.contains("0/0"));
    }

    #[test]
    fn sink_records_latest_event() {
        let sink = CliProgressSink::new();
        sink.publish(ProgressEvent { index: 3, total: 10 });
        sink.publish(ProgressEvent { index: 4, total: 10 });
        assert_eq!(sink.position(), (4, 10));
    }

    #[test]
    fn sink_clear_resets_position() {
        let sink = CliProgressSink::new();
        sink.publish(ProgressEvent { index: 7, total: 9 });
        sink.clear();
        assert_eq!(sink.position(), (0, 0));
    }

    #[test]
    fn sink_ignores_out_of_bounds_event() {
        let sink = CliProgressSink::new();
        sink.publish(ProgressEvent { index: 4, total: 10 });
        sink.publish(ProgressEvent { index: 10, total: 10 });
        assert_eq!(sink.position(), (4, 10));
    }

    #[test]
    fn sink_clones_share_counters() {
        let sink = CliProgressSink::new();
        let observer = sink.clone();
        sink.publish(ProgressEvent { index: 2, total: 5 });
        assert_eq!(observer.position(), (2, 5));
    }
}
