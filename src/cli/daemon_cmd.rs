//! Daemon command handler - sends commands to the running daemon socket

use super::args::DaemonAction;
use super::presenter::Presenter;
use super::socket::{DaemonSocketClient, SocketPath};

/// Handle daemon subcommand
pub async fn handle_daemon_command(
    action: DaemonAction,
    presenter: &Presenter,
) -> Result<(), String> {
    let client = DaemonSocketClient::new(SocketPath::new());

    // Check if daemon is running
    if !client.is_daemon_running() {
        return Err(
            "No daemon running. Start with: ghost-typer --daemon --file <FILE>".to_string(),
        );
    }

    let cmd = match action {
        DaemonAction::Start => "start".to_string(),
        DaemonAction::Pause => "pause".to_string(),
        DaemonAction::Resume => "resume".to_string(),
        DaemonAction::Stop => "stop".to_string(),
        DaemonAction::Status => "status".to_string(),
        DaemonAction::Rate { wpm } => format!("rate {}", wpm),
    };

    let response = client
        .send_command(&cmd)
        .await
        .map_err(|e| format!("Failed to communicate with daemon: {}", e))?;

    let response = response.trim();

    match action {
        DaemonAction::Status => {
            presenter.output(response);
        }
        _ => {
            if let Some(stripped) = response.strip_prefix("error:") {
                return Err(stripped.trim().to_string());
            }
            presenter.info(&format!("Command sent: {}", cmd));
        }
    }

    Ok(())
}
