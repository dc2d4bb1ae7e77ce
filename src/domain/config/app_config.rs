//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::timing::Delay;
use crate::domain::typing::WordsPerMinute;

/// Linux-specific configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LinuxConfig {
    pub keystroke_tool: Option<String>,
    pub focus_tool: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub wpm: Option<u32>,
    pub arming: Option<String>,
    pub notify: Option<bool>,
    pub linux: Option<LinuxConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            wpm: Some(WordsPerMinute::default().get()),
            arming: Some(Delay::default_arming().to_string()),
            notify: Some(false),
            linux: Some(LinuxConfig {
                keystroke_tool: Some("auto".to_string()),
                focus_tool: Some("auto".to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            wpm: other.wpm.or(self.wpm),
            arming: other.arming.or(self.arming),
            notify: other.notify.or(self.notify),
            linux: Self::merge_linux_config(self.linux, other.linux),
        }
    }

    /// Merge Linux config sections
    fn merge_linux_config(
        base: Option<LinuxConfig>,
        other: Option<LinuxConfig>,
    ) -> Option<LinuxConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(LinuxConfig {
                keystroke_tool: o.keystroke_tool.or(b.keystroke_tool),
                focus_tool: o.focus_tool.or(b.focus_tool),
            }),
        }
    }

    /// Get the typing rate, clamped into range, or the default if not set
    pub fn wpm_or_default(&self) -> WordsPerMinute {
        self.wpm.map(WordsPerMinute::new).unwrap_or_default()
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get keystroke tool preference, or "auto" if not set
    pub fn keystroke_tool_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.keystroke_tool.as_deref())
            .unwrap_or("auto")
    }

    /// Get focus tool preference, or "auto" if not set
    pub fn focus_tool_or_default(&self) -> &str {
        self.linux
            .as_ref()
            .and_then(|l| l.focus_tool.as_deref())
            .unwrap_or("auto")
    }
}
