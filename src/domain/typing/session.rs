//! Typing session state machine

use std::fmt;
use thiserror::Error;

use super::script::TypingScript;
use super::window::WindowId;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypingState {
    #[default]
    Idle,
    Arming,
    Running,
    Paused,
}

impl TypingState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Arming => "arming",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for TypingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: TypingState,
    pub action: String,
}

/// Typing session entity.
/// Owns the captured script, the emission cursor, and the identity of
/// the window the session is aimed at. Control handlers and the
/// background worker share one session behind a mutex; worker-side
/// mutations carry the epoch the worker was spawned for, so a worker
/// whose session has been stopped and replaced can never touch the one
/// that superseded it.
///
/// State machine:
///   IDLE -> ARMING    (begin_arming: fresh script captured)
///   ARMING -> RUNNING (begin_running: target focus captured)
///   ARMING -> IDLE    (stop)
///   RUNNING <-> PAUSED (pause / resume)
///   RUNNING -> IDLE   (stop, complete, fail)
///   PAUSED -> IDLE    (stop, fail)
///
/// Stop zeroes the cursor; natural completion leaves it at the script
/// length so the operator can confirm how far the session got.
#[derive(Debug, Default)]
pub struct TypingSession {
    state: TypingState,
    script: TypingScript,
    cursor: usize,
    target: Option<WindowId>,
    epoch: u64,
}

impl TypingSession {
    /// Create a new session in idle state with no script
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> TypingState {
        self.state
    }

    /// Get the emission cursor (index of the next character to type)
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the captured script
    pub fn script(&self) -> &TypingScript {
        &self.script
    }

    /// Get the captured target window, if emission has begun
    pub fn target(&self) -> Option<&WindowId> {
        self.target.as_ref()
    }

    /// Get the session epoch; bumped each time a new session arms
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Check if currently idle
    pub fn is_idle(&self) -> bool {
        self.state == TypingState::Idle
    }

    /// Check if a session is in flight (arming, running, or paused)
    pub fn is_active(&self) -> bool {
        self.state != TypingState::Idle
    }

    /// Check if currently running
    pub fn is_running(&self) -> bool {
        self.state == TypingState::Running
    }

    /// Check if currently paused
    pub fn is_paused(&self) -> bool {
        self.state == TypingState::Paused
    }

    /// Check if every character of the script has been emitted
    pub fn finished(&self) -> bool {
        self.cursor >= self.script.len()
    }

    /// The next character to emit with its index, if any remain
    pub fn next_char(&self) -> Option<(usize, char)> {
        self.script.char_at(self.cursor).map(|c| (self.cursor, c))
    }

    /// Transition from IDLE to ARMING, superseding any prior session.
    /// Captures a fresh script, zeroes the cursor, clears the target,
    /// and bumps the epoch.
    pub fn begin_arming(&mut self, script: TypingScript) -> Result<(), InvalidStateTransition> {
        if self.state != TypingState::Idle {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "arm".to_string(),
            });
        }
        self.state = TypingState::Arming;
        self.script = script;
        self.cursor = 0;
        self.target = None;
        self.epoch += 1;
        Ok(())
    }

    /// Transition from ARMING to RUNNING, capturing the target window.
    /// The target is set exactly once per session and never reassigned
    /// until the next session arms. Fails if a stop landed during the
    /// arming wait (state is no longer Arming) or if the caller's
    /// session has been superseded.
    pub fn begin_running(
        &mut self,
        epoch: u64,
        target: WindowId,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != TypingState::Arming || self.epoch != epoch {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "begin typing".to_string(),
            });
        }
        self.state = TypingState::Running;
        self.target = Some(target);
        Ok(())
    }

    /// Suspend a running session. No-op in any other state; returns
    /// whether the state changed.
    pub fn pause(&mut self) -> bool {
        if self.state == TypingState::Running {
            self.state = TypingState::Paused;
            true
        } else {
            false
        }
    }

    /// Resume a paused session without re-arming or re-capturing
    /// anything. No-op in any other state; returns whether the state
    /// changed.
    pub fn resume(&mut self) -> bool {
        if self.state == TypingState::Paused {
            self.state = TypingState::Running;
            true
        } else {
            false
        }
    }

    /// Stop from any state: force IDLE and zero the cursor. Always
    /// legal and idempotent; stopping while idle changes nothing.
    pub fn stop(&mut self) {
        self.state = TypingState::Idle;
        self.cursor = 0;
    }

    /// Advance the cursor past one emitted character. A keystroke that
    /// was already sent must be counted even if a pause landed while it
    /// was in flight, so Paused accepts the advance too; only a stop or
    /// supersession drops it. Returns whether the cursor moved.
    pub fn advance(&mut self, epoch: u64) -> bool {
        if matches!(self.state, TypingState::Running | TypingState::Paused)
            && self.epoch == epoch
            && self.cursor < self.script.len()
        {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Natural completion: RUNNING to IDLE with the cursor left in
    /// place. Returns whether the transition happened.
    pub fn complete(&mut self, epoch: u64) -> bool {
        if self.state == TypingState::Running && self.epoch == epoch {
            self.state = TypingState::Idle;
            true
        } else {
            false
        }
    }

    /// Abnormal stop after an environment failure: force IDLE and zero
    /// the cursor, so an interrupted session restarts from scratch.
    /// Returns whether the session was still this worker's to fail.
    pub fn fail(&mut self, epoch: u64) -> bool {
        if self.state != TypingState::Idle && self.epoch == epoch {
            self.state = TypingState::Idle;
            self.cursor = 0;
            true
        } else {
            false
        }
    }
}
