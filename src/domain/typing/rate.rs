//! Typing rate value object

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::error::RateParseError;

/// Slowest supported typing rate (words per minute)
pub const MIN_WPM: u32 = 200;

/// Fastest supported typing rate (words per minute)
pub const MAX_WPM: u32 = 1000;

/// Default typing rate (words per minute)
pub const DEFAULT_WPM: u32 = 200;

/// Characters counted as one word when converting a rate to a delay
const CHARS_PER_WORD: u32 = 5;

/// Value object representing a typing rate in words per minute.
/// Construction clamps into the supported range, so a stored rate can
/// never yield a zero or runaway per-character delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WordsPerMinute(u32);

impl WordsPerMinute {
    /// Create a rate, clamping into the supported range
    pub const fn new(wpm: u32) -> Self {
        if wpm < MIN_WPM {
            Self(MIN_WPM)
        } else if wpm > MAX_WPM {
            Self(MAX_WPM)
        } else {
            Self(wpm)
        }
    }

    /// Get the rate as a plain integer
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Delay between two consecutive characters at this rate.
    /// One word is modeled as five characters: 60 / (wpm * 5) seconds.
    pub fn delay_per_char(&self) -> Duration {
        Duration::from_secs_f64(60.0 / (self.0 * CHARS_PER_WORD) as f64)
    }
}

impl FromStr for WordsPerMinute {
    type Err = RateParseError;

    /// Parse a rate string like "300". Out-of-range values clamp
    /// rather than fail; only non-numeric input is an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wpm: u32 = s.trim().parse().map_err(|_| RateParseError {
            input: s.to_string(),
        })?;
        Ok(Self::new(wpm))
    }
}

impl fmt::Display for WordsPerMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for WordsPerMinute {
    fn default() -> Self {
        Self(DEFAULT_WPM)
    }
}
