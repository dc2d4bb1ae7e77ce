//! Main app runner for one-shot mode

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;

use crate::application::ports::{ConfigStore, FocusProbe, Keystroke, TextSource};
use crate::application::{ControllerConfig, TypingController};
use crate::domain::config::AppConfig;
use crate::domain::typing::TypingState;
use crate::infrastructure::{
    create_focus_probe, create_keystroke, create_notifier, FileTextSource, FixedFocus,
    FocusToolPreference, KeystrokeToolPreference, MemoryTextSource, NoOpKeystroke, XdgConfigStore,
};

use super::args::OneshotOptions;
use super::presenter::{CliProgressSink, Presenter};
use super::signals::{SessionSignal, SessionSignalHandler};

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How often the render loop refreshes the spinner and re-checks state
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

/// Run a one-shot typing session
pub async fn run_oneshot(options: OneshotOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Capture the text up front; a one-shot run has exactly one
    // session, so the text counted and reported here is the text the
    // session types, even if the backing file changes underneath
    let text = match &options.file {
        Some(path) => match FileTextSource::new(path).read_text().await {
            Ok(text) => text,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => match read_stdin_text().await {
            Ok(text) => text,
            Err(e) => {
                presenter.error(&format!("Failed to read stdin: {}", e));
                return ExitCode::from(EXIT_ERROR);
            }
        },
    };
    if text.is_empty() {
        presenter.warn("Nothing to type");
        return ExitCode::from(EXIT_SUCCESS);
    }
    let source = MemoryTextSource::new(text.clone());

    // Setup signal handler
    let mut signals = match SessionSignalHandler::new().await {
        Ok(handler) => handler,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Create adapters; dry runs type nothing and never lose focus
    let (keystroke, focus): (Box<dyn Keystroke>, Box<dyn FocusProbe>) = if options.dry_run {
        (
            Box::new(NoOpKeystroke::new()) as Box<dyn Keystroke>,
            Box::new(FixedFocus::new()) as Box<dyn FocusProbe>,
        )
    } else {
        let keystroke_preference = match options.keystroke_tool.parse::<KeystrokeToolPreference>()
        {
            Ok(preference) => preference,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        };
        let (keystroke, keystroke_tool) = match create_keystroke(keystroke_preference).await {
            Ok(pair) => pair,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        };

        let focus_preference = match options.focus_tool.parse::<FocusToolPreference>() {
            Ok(preference) => preference,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        };
        let (focus, focus_tool) = match create_focus_probe(focus_preference).await {
            Ok(pair) => pair,
            Err(e) => {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
        };

        if !options.quiet {
            presenter.info(&format!(
                "Keystrokes: {} | Focus: {}",
                keystroke_tool, focus_tool
            ));
        }

        (keystroke, focus)
    };

    // Create the controller
    let sink = CliProgressSink::new();
    let controller = TypingController::new(
        keystroke,
        focus,
        source,
        sink.clone(),
        create_notifier(),
        ControllerConfig {
            arming_delay: options.arming.as_std(),
            wpm: options.wpm,
            enable_notify: options.notify,
        },
    );

    if !options.quiet {
        presenter.info(&format!(
            "Typing {} characters at {} wpm",
            text.chars().count(),
            options.wpm
        ));
    }

    if let Err(e) = controller.start().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    let armed_deadline = Instant::now() + options.arming.as_std();
    if !options.quiet {
        presenter.show_arming(secs_until(armed_deadline));
    }

    let mut stop_requested = false;

    loop {
        tokio::select! {
            signal = signals.recv() => match signal {
                Some(SessionSignal::Stop) => {
                    if stop_requested {
                        // Second interrupt: give up on a clean wind-down
                        presenter.stop_spinner();
                        presenter.warn("Force exit");
                        return ExitCode::from(EXIT_ERROR);
                    }
                    stop_requested = true;
                    controller.stop().await;
                }
                Some(SessionSignal::TogglePause) => {
                    if controller.state().await == TypingState::Paused {
                        let _ = controller.start().await;
                    } else {
                        controller.pause().await;
                    }
                }
                None => tokio::time::sleep(RENDER_INTERVAL).await,
            },
            _ = tokio::time::sleep(RENDER_INTERVAL) => {}
        }

        let (state, cursor, total) = controller.snapshot().await;
        match state {
            TypingState::Idle => break,
            TypingState::Arming => {
                if !options.quiet {
                    presenter.update_arming(secs_until(armed_deadline));
                }
            }
            TypingState::Running => {
                if !options.quiet {
                    let (typed, len) = sink.position();
                    if len > 0 {
                        presenter.update_typing_progress(typed, len);
                    }
                }
            }
            TypingState::Paused => {
                if !options.quiet {
                    presenter.update_suspended_progress("Paused", cursor, total);
                }
            }
        }
    }

    presenter.stop_spinner();

    if let Some(error) = controller.take_error() {
        presenter.error(&error.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Natural completion leaves the cursor at the script length; a stop
    // zeroes it
    let cursor = controller.cursor().await;
    if stop_requested || cursor == 0 {
        if !options.quiet {
            presenter.warn("Stopped before completion");
        }
        return ExitCode::from(EXIT_SUCCESS);
    }

    if !options.quiet {
        presenter.success(&format!("Typed {} characters", cursor));
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Read all of stdin, dropping one trailing newline
async fn read_stdin_text() -> std::io::Result<String> {
    let mut buffer = String::new();
    tokio::io::stdin().read_to_string(&mut buffer).await?;
    let text = buffer
        .strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(&buffer);
    Ok(text.to_string())
}

/// Whole seconds left until `deadline`, rounded up
fn secs_until(deadline: Instant) -> u64 {
    let remaining = deadline.saturating_duration_since(Instant::now());
    (remaining.as_millis() as u64).div_ceil(1000)
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Build env config
    let env_config = AppConfig {
        wpm: env::var("GHOST_TYPER_WPM")
            .ok()
            .and_then(|s| s.trim().parse().ok()),
        notify: env::var("GHOST_TYPER_NOTIFY")
            .ok()
            .and_then(|s| parse_env_bool(&s)),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}

/// Parse a boolean-ish environment value
fn parse_env_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
