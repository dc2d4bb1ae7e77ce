//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::timing::Delay;
use crate::domain::typing::WordsPerMinute;

/// GhostTyper - types your text into the focused window
#[derive(Parser, Debug)]
#[command(name = "ghost-typer")]
#[command(version = "1.2.0")]
#[command(about = "Types text into the focused window at a human pace")]
#[command(long_about = None)]
pub struct Cli {
    /// Text file to type; reads stdin when omitted
    #[arg(value_name = "FILE", conflicts_with = "daemon")]
    pub file: Option<PathBuf>,

    /// Typing rate in words per minute (200-1000)
    #[arg(short = 'w', long, value_name = "WPM")]
    pub wpm: Option<u32>,

    /// Arming delay before typing begins (e.g., 3s, 500ms)
    #[arg(short = 'a', long, value_name = "TIME")]
    pub arming: Option<String>,

    /// Keystroke tool to use (Linux: auto, enigo, ydotool, xdotool, wtype)
    #[arg(long, value_name = "TOOL")]
    pub tool: Option<String>,

    /// Focus tool to use (Linux: auto, xdotool, none)
    #[arg(long, value_name = "TOOL")]
    pub focus: Option<String>,

    /// Run the full session without sending any keystrokes
    #[arg(long)]
    pub dry_run: bool,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Run as daemon (control via: ghost-typer daemon start/stop/status)
    #[arg(long)]
    pub daemon: bool,

    /// Source file for daemon mode, re-read on every start
    #[arg(long = "file", value_name = "FILE", requires = "daemon")]
    pub daemon_file: Option<PathBuf>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Send commands to running daemon
    Daemon {
        #[command(subcommand)]
        action: DaemonAction,
    },
}

/// Daemon control actions
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum DaemonAction {
    /// Start typing the source file, or resume if paused
    Start,
    /// Suspend typing at the current position
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop typing and reset to the beginning
    Stop,
    /// Show daemon status
    Status,
    /// Change the typing rate of the running daemon
    Rate {
        /// New rate in words per minute (200-1000)
        wpm: u32,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed one-shot options
#[derive(Debug, Clone)]
pub struct OneshotOptions {
    pub file: Option<PathBuf>,
    pub wpm: WordsPerMinute,
    pub arming: Delay,
    pub keystroke_tool: String,
    pub focus_tool: String,
    pub dry_run: bool,
    pub notify: bool,
    pub quiet: bool,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub file: PathBuf,
    pub wpm: WordsPerMinute,
    pub arming: Delay,
    pub keystroke_tool: String,
    pub focus_tool: String,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "wpm",
    "arming",
    "notify",
    "linux.keystroke-tool",
    "linux.focus-tool",
];

/// Valid keystroke tool values (platform-aware)
#[cfg(target_os = "linux")]
pub const VALID_KEYSTROKE_TOOLS: &[&str] = &["auto", "enigo", "ydotool", "xdotool", "wtype"];

#[cfg(not(target_os = "linux"))]
pub const VALID_KEYSTROKE_TOOLS: &[&str] = &["auto", "enigo"];

/// Valid focus tool values (platform-aware)
#[cfg(target_os = "linux")]
pub const VALID_FOCUS_TOOLS: &[&str] = &["auto", "xdotool", "none"];

#[cfg(not(target_os = "linux"))]
pub const VALID_FOCUS_TOOLS: &[&str] = &["auto", "none"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["ghost-typer"]);
        assert!(cli.file.is_none());
        assert!(cli.wpm.is_none());
        assert!(cli.arming.is_none());
        assert!(cli.tool.is_none());
        assert!(cli.focus.is_none());
        assert!(!cli.dry_run);
        assert!(!cli.notify);
        assert!(!cli.quiet);
        assert!(!cli.daemon);
    }

    #[test]
    fn cli_parses_positional_file() {
        let cli = Cli::parse_from(["ghost-typer", "notes.txt"]);
        assert_eq!(cli.file, Some(PathBuf::from("notes.txt")));
    }

    #[test]
    fn cli_parses_wpm() {
        let cli = Cli::parse_from(["ghost-typer", "-w", "350"]);
        assert_eq!(cli.wpm, Some(350));
    }

    #[test]
    fn cli_parses_arming() {
        let cli = Cli::parse_from(["ghost-typer", "--arming", "500ms"]);
        assert_eq!(cli.arming, Some("500ms".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["ghost-typer", "--dry-run", "-n", "-q"]);
        assert!(cli.dry_run);
        assert!(cli.notify);
        assert!(cli.quiet);
    }

    #[test]
    fn cli_parses_tools() {
        let cli = Cli::parse_from(["ghost-typer", "--tool", "xdotool", "--focus", "none"]);
        assert_eq!(cli.tool, Some("xdotool".to_string()));
        assert_eq!(cli.focus, Some("none".to_string()));
    }

    #[test]
    fn cli_parses_daemon_with_file() {
        let cli = Cli::parse_from(["ghost-typer", "--daemon", "--file", "speech.txt"]);
        assert!(cli.daemon);
        assert_eq!(cli.daemon_file, Some(PathBuf::from("speech.txt")));
    }

    #[test]
    fn cli_rejects_daemon_file_without_daemon() {
        let result = Cli::try_parse_from(["ghost-typer", "--file", "speech.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_rejects_positional_file_with_daemon() {
        let result = Cli::try_parse_from(["ghost-typer", "--daemon", "notes.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_daemon_start() {
        let cli = Cli::parse_from(["ghost-typer", "daemon", "start"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Daemon {
                action: DaemonAction::Start
            })
        ));
    }

    #[test]
    fn cli_parses_daemon_rate() {
        let cli = Cli::parse_from(["ghost-typer", "daemon", "rate", "400"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Daemon {
                action: DaemonAction::Rate { wpm: 400 }
            })
        ));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["ghost-typer", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["ghost-typer", "config", "set", "wpm", "300"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "wpm");
            assert_eq!(value, "300");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("wpm"));
        assert!(is_valid_config_key("arming"));
        assert!(is_valid_config_key("notify"));
        assert!(is_valid_config_key("linux.keystroke-tool"));
        assert!(is_valid_config_key("linux.focus-tool"));
        assert!(!is_valid_config_key("invalid_key"));
    }

    #[test]
    fn verify_cli() {
        // Verify the CLI definition is valid
        Cli::command().debug_assert();
    }
}
