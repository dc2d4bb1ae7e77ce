//! Signal handlers for one-shot and daemon modes

use tokio::sync::mpsc;

#[cfg(unix)]
use colored::Colorize;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

/// Signals a one-shot session reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Stop typing (SIGINT)
    Stop,
    /// Toggle pause/resume (SIGUSR1)
    TogglePause,
}

/// Signal handler for one-shot mode.
///
/// SIGINT requests a stop; a repeated SIGINT is delivered again so the
/// host can force-exit. On Unix, SIGUSR1 toggles pause without
/// touching the terminal.
pub struct SessionSignalHandler {
    receiver: mpsc::Receiver<SessionSignal>,
}

impl SessionSignalHandler {
    /// Create a new handler and start listening for session signals
    pub async fn new() -> Result<Self, std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        #[cfg(unix)]
        {
            let tx_int = tx.clone();
            let mut sigint = signal(SignalKind::interrupt())?;
            tokio::spawn(async move {
                while sigint.recv().await.is_some() {
                    if tx_int.send(SessionSignal::Stop).await.is_err() {
                        break;
                    }
                }
            });

            let tx_usr1 = tx;
            let mut sigusr1 = signal(SignalKind::user_defined1())?;
            tokio::spawn(async move {
                while sigusr1.recv().await.is_some() {
                    if tx_usr1.send(SessionSignal::TogglePause).await.is_err() {
                        break;
                    }
                }
            });
        }

        #[cfg(not(unix))]
        {
            tokio::spawn(async move {
                loop {
                    if tokio::signal::ctrl_c().await.is_err() {
                        break;
                    }
                    if tx.send(SessionSignal::Stop).await.is_err() {
                        break;
                    }
                }
            });
        }

        Ok(Self { receiver: rx })
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<SessionSignal> {
        self.receiver.recv().await
    }
}

/// Daemon signals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSignal {
    /// Begin or resume typing
    Start,
    /// Suspend typing
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop typing and reset
    Stop,
    /// Change the typing rate
    Rate(u32),
    /// Shutdown daemon (SIGINT/SIGTERM)
    Shutdown,
}

/// Daemon signal handler
///
/// Handles OS shutdown signals (SIGINT/SIGTERM) and provides a channel
/// for receiving daemon commands from other sources (e.g., socket server).
#[cfg(unix)]
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

#[cfg(unix)]
impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender that can be used by other sources
    /// (like a socket server) to send commands to the daemon loop.
    pub async fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(10);

        // Setup SIGINT handler (shutdown)
        let tx_int = tx.clone();
        let mut sigint = signal(SignalKind::interrupt())?;
        tokio::spawn(async move {
            sigint.recv().await;
            eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
            let _ = tx_int.send(DaemonSignal::Shutdown).await;
        });

        // Setup SIGTERM handler (shutdown)
        let tx_term = tx.clone();
        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::spawn(async move {
            sigterm.recv().await;
            eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
            let _ = tx_term.send(DaemonSignal::Shutdown).await;
        });

        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_signal_equality() {
        assert_eq!(SessionSignal::Stop, SessionSignal::Stop);
        assert_ne!(SessionSignal::Stop, SessionSignal::TogglePause);
    }

    #[test]
    fn daemon_signal_equality() {
        assert_eq!(DaemonSignal::Start, DaemonSignal::Start);
        assert_ne!(DaemonSignal::Pause, DaemonSignal::Resume);
        assert_ne!(DaemonSignal::Rate(200), DaemonSignal::Rate(300));
    }
}
