//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the main application runners.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod presenter;
pub mod signals;

// Daemon mode rides on Unix sockets and signals
#[cfg(unix)]
pub mod daemon_app;
#[cfg(unix)]
pub mod daemon_cmd;
#[cfg(unix)]
pub mod pid_file;
#[cfg(unix)]
pub mod socket;

// Re-export commonly used types
pub use app::{run_oneshot, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, DaemonAction, DaemonOptions, OneshotOptions};
#[cfg(unix)]
pub use daemon_app::run_daemon;
#[cfg(unix)]
pub use daemon_cmd::handle_daemon_command;
pub use presenter::Presenter;
