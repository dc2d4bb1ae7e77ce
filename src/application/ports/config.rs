//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration. A missing file is not an error;
    /// it loads as an empty config with every field unset.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist a configuration, replacing any existing file.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Location of the configuration file.
    fn path(&self) -> PathBuf;

    /// Check whether a configuration file exists.
    fn exists(&self) -> bool;

    /// Write a fresh configuration file with default values.
    /// Fails with `ConfigError::AlreadyExists` if one is present.
    async fn init(&self) -> Result<(), ConfigError>;
}
