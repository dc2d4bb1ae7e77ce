//! Delay value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration as StdDuration;

use crate::domain::error::DelayParseError;

/// Default arming delay before emission begins (3 seconds)
pub const DEFAULT_ARMING_SECS: u64 = 3;

/// Value object representing a human-readable delay.
/// Immutable and validated on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Delay {
    milliseconds: u64,
}

impl Delay {
    /// Create a Delay from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create a Delay from seconds
    pub const fn from_secs(secs: u64) -> Self {
        Self {
            milliseconds: secs * 1000,
        }
    }

    /// Default arming delay (3 seconds)
    pub const fn default_arming() -> Self {
        Self::from_secs(DEFAULT_ARMING_SECS)
    }

    /// Get delay in seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Get delay in milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Convert to std::time::Duration
    pub const fn as_std(&self) -> StdDuration {
        StdDuration::from_millis(self.milliseconds)
    }
}

impl FromStr for Delay {
    type Err = DelayParseError;

    /// Parse a delay string into a Delay value object.
    /// Supported formats: "500ms", "3s", "1m", "2m30s"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();

        let mut millis: u64 = 0;
        let mut current_num = String::new();
        let mut found_any = false;

        let mut chars = input.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch.is_ascii_digit() {
                current_num.push(ch);
            } else if ch == 'm' && !current_num.is_empty() {
                let value: u64 = current_num
                    .parse()
                    .map_err(|_| DelayParseError { input: s.to_string() })?;
                // "ms" is milliseconds, bare "m" is minutes
                if chars.peek() == Some(&'s') {
                    chars.next();
                    millis += value;
                } else {
                    millis += value * 60_000;
                }
                current_num.clear();
                found_any = true;
            } else if ch == 's' && !current_num.is_empty() {
                let value: u64 = current_num
                    .parse()
                    .map_err(|_| DelayParseError { input: s.to_string() })?;
                millis += value * 1000;
                current_num.clear();
                found_any = true;
            } else {
                return Err(DelayParseError { input: s.to_string() });
            }
        }

        // Leftover digits with no unit, nothing parsed, or zero total
        if !current_num.is_empty() || !found_any || millis == 0 {
            return Err(DelayParseError { input: s.to_string() });
        }

        Ok(Self { milliseconds: millis })
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.milliseconds % 1000 != 0 {
            return write!(f, "{}ms", self.milliseconds);
        }

        let total_secs = self.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;

        if minutes == 0 {
            write!(f, "{}s", seconds)
        } else if seconds == 0 {
            write!(f, "{}m", minutes)
        } else {
            write!(f, "{}m{}s", minutes, seconds)
        }
    }
}

impl Default for Delay {
    fn default() -> Self {
        Self::default_arming()
    }
}
