//! GhostTyper CLI entry point

use std::process::ExitCode;

use clap::Parser;

use ghost_typer::cli::{
    app::{load_merged_config, run_oneshot, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    OneshotOptions,
};
#[cfg(unix)]
use ghost_typer::cli::{daemon_app::run_daemon, daemon_cmd::handle_daemon_command, DaemonOptions};
use ghost_typer::domain::config::{AppConfig, LinuxConfig};
use ghost_typer::domain::timing::Delay;
use ghost_typer::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        #[cfg(unix)]
        Some(Commands::Daemon { action }) => {
            if let Err(e) = handle_daemon_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        #[cfg(not(unix))]
        Some(Commands::Daemon { .. }) => {
            presenter.error("Daemon mode is only available on Unix");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        wpm: cli.wpm,
        arming: cli.arming.clone(),
        notify: if cli.notify { Some(true) } else { None },
        linux: if cli.tool.is_some() || cli.focus.is_some() {
            Some(LinuxConfig {
                keystroke_tool: cli.tool.clone(),
                focus_tool: cli.focus.clone(),
            })
        } else {
            None
        },
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    // Parse arming delay
    let arming = match config.arming.as_ref() {
        Some(s) => match s.parse::<Delay>() {
            Ok(d) => d,
            Err(e) => {
                presenter.error(&format!("Invalid arming delay: {}", e));
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
        },
        None => Delay::default_arming(),
    };

    // Out-of-range rates clamp rather than error, matching the daemon
    // rate command
    let wpm = config.wpm_or_default();

    // Route to appropriate handler
    if cli.daemon {
        #[cfg(unix)]
        {
            let file = match cli.daemon_file.clone() {
                Some(f) => f,
                None => {
                    presenter.error("Daemon mode requires --file <FILE>");
                    return ExitCode::from(EXIT_USAGE_ERROR);
                }
            };

            let options = DaemonOptions {
                file,
                wpm,
                arming,
                keystroke_tool: config.keystroke_tool_or_default().to_string(),
                focus_tool: config.focus_tool_or_default().to_string(),
                notify: config.notify_or_default(),
            };

            return run_daemon(options).await;
        }
        #[cfg(not(unix))]
        {
            presenter.error("Daemon mode is only available on Unix");
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    } else {
        let options = OneshotOptions {
            file: cli.file.clone(),
            wpm,
            arming,
            keystroke_tool: config.keystroke_tool_or_default().to_string(),
            focus_tool: config.focus_tool_or_default().to_string(),
            dry_run: cli.dry_run,
            notify: config.notify_or_default(),
            quiet: cli.quiet,
        };

        run_oneshot(options).await
    }
}
