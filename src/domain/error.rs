//! Domain error types

use thiserror::Error;

/// Error when parsing a delay string
#[derive(Debug, Clone, Error)]
#[error("Invalid delay format: \"{input}\". Expected format: <number>ms, <number>s, or <number>m (e.g., 500ms, 3s, 1m)")]
pub struct DelayParseError {
    pub input: String,
}

/// Error when parsing a typing rate
#[derive(Debug, Clone, Error)]
#[error("Invalid typing rate: \"{input}\". Expected a whole number of words per minute (e.g., 300)")]
pub struct RateParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
