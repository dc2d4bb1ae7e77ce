//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::LinuxConfig;
use crate::domain::error::ConfigError;
use crate::domain::timing::Delay;
use crate::domain::typing::{MAX_WPM, MIN_WPM};

use super::args::{
    is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS, VALID_FOCUS_TOOLS,
    VALID_KEYSTROKE_TOOLS,
};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "wpm" => {
            config.wpm =
                Some(
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::ValidationError {
                            key: key.to_string(),
                            message: "Value must be a whole number".to_string(),
                        })?,
                )
        }
        "arming" => config.arming = Some(value.to_string()),
        "notify" => {
            config.notify = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?)
        }
        "linux.keystroke-tool" => {
            // Initialize linux config if None
            if config.linux.is_none() {
                config.linux = Some(LinuxConfig::default());
            }
            if let Some(ref mut linux) = config.linux {
                linux.keystroke_tool = Some(value.to_lowercase());
            }
        }
        "linux.focus-tool" => {
            if config.linux.is_none() {
                config.linux = Some(LinuxConfig::default());
            }
            if let Some(ref mut linux) = config.linux {
                linux.focus_tool = Some(value.to_lowercase());
            }
        }
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "wpm" => config.wpm.map(|n| n.to_string()),
        "arming" => config.arming,
        "notify" => config.notify.map(|b| b.to_string()),
        "linux.keystroke-tool" => config.linux.as_ref().and_then(|l| l.keystroke_tool.clone()),
        "linux.focus-tool" => config.linux.as_ref().and_then(|l| l.focus_tool.clone()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "wpm",
        &config
            .wpm
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value("arming", config.arming.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "notify",
        &config
            .notify
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "linux.keystroke-tool",
        config
            .linux
            .as_ref()
            .and_then(|l| l.keystroke_tool.as_deref())
            .unwrap_or("(not set)"),
    );
    presenter.key_value(
        "linux.focus-tool",
        config
            .linux
            .as_ref()
            .and_then(|l| l.focus_tool.as_deref())
            .unwrap_or("(not set)"),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "wpm" => {
            let wpm: u32 =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::ValidationError {
                        key: key.to_string(),
                        message: "Value must be a whole number".to_string(),
                    })?;
            if !(MIN_WPM..=MAX_WPM).contains(&wpm) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!("Value must be between {} and {}", MIN_WPM, MAX_WPM),
                });
            }
        }
        "arming" => {
            value
                .parse::<Delay>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "notify" => {
            parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?;
        }
        "linux.keystroke-tool" => {
            let lower = value.to_lowercase();
            if !VALID_KEYSTROKE_TOOLS.contains(&lower.as_str()) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_KEYSTROKE_TOOLS.join(", ")
                    ),
                });
            }
        }
        "linux.focus-tool" => {
            let lower = value.to_lowercase();
            if !VALID_FOCUS_TOOLS.contains(&lower.as_str()) {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!(
                        "Invalid value '{}'. Valid options: {}",
                        value,
                        VALID_FOCUS_TOOLS.join(", ")
                    ),
                });
            }
        }
        _ => {}
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
