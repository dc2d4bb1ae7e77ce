//! Daemon app runner

use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

use tokio::time::timeout;

use crate::application::ports::{FocusProbe, Keystroke, Notifier, TextSource};
use crate::application::{ControllerConfig, TypingController};
use crate::domain::typing::TypingState;
use crate::infrastructure::{
    create_focus_probe, create_keystroke, create_notifier, FileTextSource, FocusToolPreference,
    KeystrokeToolPreference,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
use super::args::DaemonOptions;
use super::pid_file::PidFile;
use super::presenter::{CliProgressSink, Presenter};
use super::signals::{DaemonSignal, DaemonSignalHandler};
use super::socket::{DaemonSocketServer, DaemonStatus, SocketPath};

/// How often the daemon loop refreshes the status mirror while a
/// session is in flight
const STATUS_REFRESH: StdDuration = StdDuration::from_millis(100);

/// Controller wired for daemon mode: the source is always a file,
/// re-read on every start command
type DaemonController = TypingController<
    Box<dyn Keystroke>,
    Box<dyn FocusProbe>,
    FileTextSource,
    CliProgressSink,
    Box<dyn Notifier>,
>;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions) -> ExitCode {
    let presenter = Presenter::new();

    // Acquire PID file
    let mut pid_file = PidFile::new();
    if let Err(e) = pid_file.acquire() {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Fail fast on an unreadable source file
    let source = FileTextSource::new(&options.file);
    if let Err(e) = source.read_text().await {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }

    // Create adapters
    let keystroke_preference = match options.keystroke_tool.parse::<KeystrokeToolPreference>() {
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

    // Create the controller
    let controller: DaemonController = TypingController::new(
        keystroke,
        focus,
        source,
        CliProgressSink::new(),
        create_notifier(),
        ControllerConfig {
            arming_delay: options.arming.as_std(),
            wpm: options.wpm,
            enable_notify: options.notify,
        },
    );

    // Setup signal handler (returns handler + sender for socket server)
    let (mut signals, signal_tx) = match DaemonSignalHandler::new().await {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Setup socket server
    let socket_path = SocketPath::new();
    let mut socket_server = DaemonSocketServer::new(socket_path.clone());

    if let Err(e) = socket_server.bind() {
        presenter.error(&format!("Failed to bind socket: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    // Wrap the status in Arc<Mutex> for sharing with the socket server
    let status = Arc::new(Mutex::new(DaemonStatus {
        state: TypingState::Idle,
        cursor: 0,
        total: 0,
        wpm: options.wpm.get(),
    }));
    let status_for_socket = Arc::clone(&status);

    // Spawn socket server task
    tokio::spawn(async move {
        let _ = socket_server
            .run(signal_tx, move || {
                // Use std::sync::Mutex - safe because lock is very brief
                *status_for_socket.lock().unwrap_or_else(|e| e.into_inner())
            })
            .await;
    });

    presenter.daemon_status("Started, waiting for commands...");
    presenter.info(&format!(
        "PID: {} | Socket: {} | Source: {}",
        std::process::id(),
        socket_path.path().display(),
        options.file.display()
    ));
    presenter.info(&format!(
        "Keystrokes: {} | Focus: {}",
        keystroke_tool, focus_tool
    ));

    // Main signal loop
    let result = daemon_loop(&controller, &mut signals, &presenter, &status).await;

    // The socket task never returns, so remove the socket file here
    let _ = socket_path.cleanup();
    let _ = pid_file.release();

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

async fn daemon_loop(
    controller: &DaemonController,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    shared_status: &Arc<Mutex<DaemonStatus>>,
) -> bool {
    // Whether the previous pass saw a session in flight; lets the loop
    // report endings that happen between signals
    let mut was_active = false;

    loop {
        let (state, cursor, total) = controller.snapshot().await;
        let wpm = controller.rate().get();

        // Update shared status for socket server
        if let Ok(mut guard) = shared_status.lock() {
            *guard = DaemonStatus {
                state,
                cursor,
                total,
                wpm,
            };
        }

        let active = state != TypingState::Idle;
        if was_active && !active {
            if let Some(error) = controller.take_error() {
                presenter.error(&format!("Session failed: {}", error));
                presenter.daemon_status("Idle (error)");
            } else if total > 0 && cursor >= total {
                presenter.daemon_status(&format!("Completed {} characters", total));
            } else {
                presenter.daemon_status("Stopped");
            }
        }
        was_active = active;

        // While a session runs, poll so the mirror and ending reports
        // stay fresh; otherwise block until the next command
        let signal = if active {
            match timeout(STATUS_REFRESH, signals.recv()).await {
                Ok(sig) => sig,
                Err(_) => continue,
            }
        } else {
            signals.recv().await
        };

        match signal {
            Some(DaemonSignal::Start) | Some(DaemonSignal::Resume) => {
                if let Err(e) = controller.start().await {
                    presenter.error(&format!("Failed to start typing: {}", e));
                    continue;
                }
                presenter.daemon_status("Typing...");
            }
            Some(DaemonSignal::Pause) => {
                controller.pause().await;
                presenter.daemon_status("Paused");
            }
            Some(DaemonSignal::Stop) => {
                controller.stop().await;
                presenter.daemon_status("Stopped");
                was_active = false;
            }
            Some(DaemonSignal::Rate(wpm)) => {
                controller.set_rate(wpm);
                presenter.info(&format!("Rate set to {} wpm", controller.rate()));
            }
            Some(DaemonSignal::Shutdown) => {
                controller.stop().await;
                presenter.daemon_status("Shutting down...");
                return true;
            }
            None => {
                // Channel closed
                return false;
            }
        }
    }
}
