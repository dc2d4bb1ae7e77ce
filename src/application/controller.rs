//! Typing controller use case

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::domain::typing::{
    InvalidStateTransition, TypingScript, TypingSession, TypingState, WindowId, WordsPerMinute,
};

use super::ports::{
    FocusError, FocusProbe, Keystroke, KeystrokeError, NotificationIcon, Notifier, ProgressEvent,
    ProgressSink, TextSource, TextSourceError,
};

/// Grace period between a start request and the first keystroke,
/// giving the operator time to focus the intended target window
pub const ARMING_DELAY: Duration = Duration::from_secs(3);

/// How often suspended waits re-check pause, focus, and stop
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Errors that terminate a typing session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Focus query failed: {0}")]
    Focus(#[from] FocusError),

    #[error("Keystroke injection failed: {0}")]
    Keystroke(#[from] KeystrokeError),

    #[error("Text source failed: {0}")]
    Source(#[from] TextSourceError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Configuration for the typing controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Grace period before emission begins
    pub arming_delay: Duration,
    /// Initial typing rate
    pub wpm: WordsPerMinute,
    /// Whether to show desktop notifications
    pub enable_notify: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            arming_delay: ARMING_DELAY,
            wpm: WordsPerMinute::default(),
            enable_notify: false,
        }
    }
}

/// Typing controller use case.
///
/// Owns the session state machine and drives character emission
/// through the keystroke, focus, source, progress, and notification
/// ports. Exactly one background worker runs per session; control
/// operations return without waiting on it, and the worker observes
/// state changes within one poll interval.
pub struct TypingController<K, F, S, P, N>
where
    K: Keystroke + 'static,
    F: FocusProbe + 'static,
    S: TextSource + 'static,
    P: ProgressSink + 'static,
    N: Notifier + 'static,
{
    keystroke: Arc<K>,
    focus: Arc<F>,
    source: Arc<S>,
    sink: Arc<P>,
    notifier: Arc<N>,
    session: Arc<Mutex<TypingSession>>,
    rate: Arc<AtomicU32>,
    last_error: Arc<StdMutex<Option<SessionError>>>,
    config: ControllerConfig,
}

impl<K, F, S, P, N> TypingController<K, F, S, P, N>
where
    K: Keystroke + 'static,
    F: FocusProbe + 'static,
    S: TextSource + 'static,
    P: ProgressSink + 'static,
    N: Notifier + 'static,
{
    /// Create a new controller instance
    pub fn new(
        keystroke: K,
        focus: F,
        source: S,
        sink: P,
        notifier: N,
        config: ControllerConfig,
    ) -> Self {
        Self {
            keystroke: Arc::new(keystroke),
            focus: Arc::new(focus),
            source: Arc::new(source),
            sink: Arc::new(sink),
            notifier: Arc::new(notifier),
            session: Arc::new(Mutex::new(TypingSession::new())),
            rate: Arc::new(AtomicU32::new(config.wpm.get())),
            last_error: Arc::new(StdMutex::new(None)),
            config,
        }
    }

    /// Begin or resume a session.
    ///
    /// While a session is in flight this only clears any pause, so
    /// repeated starts are harmless. From idle it captures fresh text
    /// from the source, arms, and spawns the session worker; the call
    /// returns as soon as the worker is spawned.
    pub async fn start(&self) -> Result<(), SessionError> {
        {
            let mut session = self.session.lock().await;
            match session.state() {
                TypingState::Running | TypingState::Paused => {
                    session.resume();
                    return Ok(());
                }
                TypingState::Arming => return Ok(()),
                TypingState::Idle => {}
            }
        }

        // New session: capture the text as of this start request
        let text = self.source.read_text().await?;

        let epoch = {
            let mut session = self.session.lock().await;
            if !session.is_idle() {
                // Lost a start/start race; the winner's session runs
                session.resume();
                return Ok(());
            }
            session.begin_arming(TypingScript::new(&text))?;
            session.epoch()
        };

        // The error slot belongs to the previous session
        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = None;

        let worker = SessionWorker {
            keystroke: Arc::clone(&self.keystroke),
            focus: Arc::clone(&self.focus),
            sink: Arc::clone(&self.sink),
            notifier: Arc::clone(&self.notifier),
            session: Arc::clone(&self.session),
            rate: Arc::clone(&self.rate),
            last_error: Arc::clone(&self.last_error),
            arming_delay: self.config.arming_delay,
            enable_notify: self.config.enable_notify,
            epoch,
        };
        tokio::spawn(worker.run());

        Ok(())
    }

    /// Suspend a running session. No-op in any other state.
    pub async fn pause(&self) {
        self.session.lock().await.pause();
    }

    /// Terminate and reset. Always legal and idempotent: forces idle,
    /// zeroes the cursor, and clears the progress marker. The worker,
    /// if any, winds down within one poll interval.
    pub async fn stop(&self) {
        self.session.lock().await.stop();
        self.sink.clear();
    }

    /// Update the live typing rate; clamped into the supported range.
    /// Takes effect on the next character.
    pub fn set_rate(&self, wpm: u32) {
        self.rate
            .store(WordsPerMinute::new(wpm).get(), Ordering::SeqCst);
    }

    /// Get the live typing rate
    pub fn rate(&self) -> WordsPerMinute {
        WordsPerMinute::new(self.rate.load(Ordering::SeqCst))
    }

    /// Get current session state
    pub async fn state(&self) -> TypingState {
        self.session.lock().await.state()
    }

    /// Get the emission cursor
    pub async fn cursor(&self) -> usize {
        self.session.lock().await.cursor()
    }

    /// Check if a session is in flight (arming, running, or paused)
    pub async fn is_active(&self) -> bool {
        self.session.lock().await.is_active()
    }

    /// Snapshot of state, cursor, and script length for status lines
    pub async fn snapshot(&self) -> (TypingState, usize, usize) {
        let session = self.session.lock().await;
        (session.state(), session.cursor(), session.script().len())
    }

    /// Drain the terminal error of the last session, if it ended
    /// abnormally
    pub fn take_error(&self) -> Option<SessionError> {
        self.last_error
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
    }

    /// Block until the session returns to idle. Intended for one-shot
    /// hosts with nothing else to do while typing runs.
    pub async fn wait_until_idle(&self) {
        loop {
            if self.session.lock().await.is_idle() {
                return;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

/// What the worker should do next for one loop iteration
enum Step {
    Emit { index: usize, c: char, total: usize },
    Finished,
}

/// Background worker for one typing session.
///
/// Bound to the session epoch it was spawned for; every mutation goes
/// through the session's epoch-checked methods, so a worker whose
/// session was stopped and superseded mid-sleep can never touch the
/// replacement session.
struct SessionWorker<K, F, P, N>
where
    K: Keystroke,
    F: FocusProbe,
    P: ProgressSink,
    N: Notifier,
{
    keystroke: Arc<K>,
    focus: Arc<F>,
    sink: Arc<P>,
    notifier: Arc<N>,
    session: Arc<Mutex<TypingSession>>,
    rate: Arc<AtomicU32>,
    last_error: Arc<StdMutex<Option<SessionError>>>,
    arming_delay: Duration,
    enable_notify: bool,
    epoch: u64,
}

impl<K, F, P, N> SessionWorker<K, F, P, N>
where
    K: Keystroke + 'static,
    F: FocusProbe + 'static,
    P: ProgressSink + 'static,
    N: Notifier + 'static,
{
    async fn run(self) {
        let Some(target) = self.arm().await else {
            return;
        };

        self.notify("Typing started", NotificationIcon::Typing).await;

        if self.emit_loop(&target).await {
            self.notify("Typing complete", NotificationIcon::Success)
                .await;
        }
    }

    /// Hold through the arming grace period, then aim the session at
    /// whatever window has focus. Returns None if a stop aborted the
    /// wait or the focus capture failed.
    async fn arm(&self) -> Option<WindowId> {
        if !self.sleep_watching_for_stop(self.arming_delay).await {
            return None;
        }

        let target = match self.focus.active_window().await {
            Ok(target) => target,
            Err(e) => {
                self.fail(e.into()).await;
                return None;
            }
        };

        let mut session = self.session.lock().await;
        match session.begin_running(self.epoch, target.clone()) {
            Ok(()) => Some(target),
            // A stop landed on the final tick; nothing was emitted
            Err(_) => None,
        }
    }

    /// The emission loop: one iteration per character. Progress for a
    /// character is always published before its keystroke is sent.
    /// Returns true on natural completion.
    async fn emit_loop(&self, target: &WindowId) -> bool {
        loop {
            let (index, c, total) = match self.next_step(target).await {
                // Stopped or superseded; the sink is no longer this
                // worker's to touch (stop cleared it already)
                None => return false,
                Some(Step::Finished) => {
                    return self.session.lock().await.complete(self.epoch);
                }
                Some(Step::Emit { index, c, total }) => (index, c, total),
            };

            self.sink.publish(ProgressEvent { index, total });

            if let Err(e) = self.keystroke.send_char(c).await {
                self.fail(e.into()).await;
                return false;
            }

            {
                let mut session = self.session.lock().await;
                session.advance(self.epoch);
            }

            let delay = WordsPerMinute::new(self.rate.load(Ordering::SeqCst)).delay_per_char();
            if !self.sleep_watching_for_stop(delay).await {
                return false;
            }
        }
    }

    /// Resolve what the next iteration should do, waiting out pause
    /// and focus-mismatch suspensions. Both waits re-check for a stop
    /// every poll tick. Returns None once the session is stopped or
    /// superseded.
    async fn next_step(&self, target: &WindowId) -> Option<Step> {
        loop {
            let (state, next, total) = {
                let session = self.session.lock().await;
                if session.epoch() != self.epoch {
                    return None;
                }
                (session.state(), session.next_char(), session.script().len())
            };

            match state {
                TypingState::Idle | TypingState::Arming => return None,
                TypingState::Paused => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                TypingState::Running => {
                    let Some((index, c)) = next else {
                        return Some(Step::Finished);
                    };

                    match self.focus.active_window().await {
                        Ok(ref focused) if focused == target => {
                            return Some(Step::Emit { index, c, total });
                        }
                        Ok(_) => {
                            // Target lost focus; hold until it returns
                            tokio::time::sleep(POLL_INTERVAL).await;
                        }
                        Err(e) => {
                            self.fail(e.into()).await;
                            return None;
                        }
                    }
                }
            }
        }
    }

    /// Chunked sleep that returns false as soon as the session is no
    /// longer this worker's to run. Never sleeps longer than one poll
    /// interval between checks, so stops land with bounded latency.
    async fn sleep_watching_for_stop(&self, duration: Duration) -> bool {
        let mut remaining = duration;
        while !remaining.is_zero() {
            let tick = remaining.min(POLL_INTERVAL);
            tokio::time::sleep(tick).await;
            remaining = remaining.saturating_sub(tick);

            let session = self.session.lock().await;
            if session.epoch() != self.epoch || !session.is_active() {
                return false;
            }
        }
        true
    }

    /// Convert an environment failure into an abnormal stop: reset the
    /// session, clear the marker, and record the error for the host.
    /// If a stop or a newer session already took over, the failure is
    /// moot and nothing is touched.
    async fn fail(&self, error: SessionError) {
        let owned = {
            let mut session = self.session.lock().await;
            session.fail(self.epoch)
        };
        if !owned {
            return;
        }
        self.sink.clear();

        self.notify(
            &format!("Typing failed: {}", error),
            NotificationIcon::Error,
        )
        .await;

        *self.last_error.lock().unwrap_or_else(|e| e.into_inner()) = Some(error);
    }

    async fn notify(&self, message: &str, icon: NotificationIcon) {
        if self.enable_notify {
            let _ = self
                .notifier
                .notify("GhostTyper", message, icon)
                .await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NotificationError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize};
    use std::time::Instant;
    use tokio::time::timeout;

    /// Interleaved record of everything the session did, shared by the
    /// keystroke mock and the progress sink so ordering is provable.
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Entry {
        Progress(usize),
        Key(char),
        Cleared,
    }

    type Log = Arc<StdMutex<Vec<Entry>>>;

    fn log_entries(log: &Log) -> Vec<Entry> {
        log.lock().unwrap().clone()
    }

    fn keys_of(log: &Log) -> Vec<char> {
        log_entries(log)
            .into_iter()
            .filter_map(|e| match e {
                Entry::Key(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn progress_of(log: &Log) -> Vec<usize> {
        log_entries(log)
            .into_iter()
            .filter_map(|e| match e {
                Entry::Progress(i) => Some(i),
                _ => None,
            })
            .collect()
    }

    #[derive(Clone)]
    struct MockKeystroke {
        log: Log,
        fail_after: Arc<AtomicUsize>,
        sent: Arc<AtomicUsize>,
    }

    impl MockKeystroke {
        fn new(log: Log) -> Self {
            Self {
                log,
                fail_after: Arc::new(AtomicUsize::new(usize::MAX)),
                sent: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn fail_after(&self, count: usize) {
            self.fail_after.store(count, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl Keystroke for MockKeystroke {
        async fn send_char(&self, c: char) -> Result<(), KeystrokeError> {
            if self.sent.load(Ordering::SeqCst) >= self.fail_after.load(Ordering::SeqCst) {
                return Err(KeystrokeError::TypeFailed("injection rejected".into()));
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            self.log.lock().unwrap().push(Entry::Key(c));
            Ok(())
        }
    }

    /// Keystroke mock that parks inside `send_char` for one chosen
    /// index until released, so control operations can land while a
    /// keystroke is in flight.
    #[derive(Clone)]
    struct GatedKeystroke {
        log: Log,
        hold_index: usize,
        count: Arc<AtomicUsize>,
        holding: Arc<AtomicBool>,
        release: Arc<tokio::sync::Notify>,
    }

    impl GatedKeystroke {
        fn new(log: Log, hold_index: usize) -> Self {
            Self {
                log,
                hold_index,
                count: Arc::new(AtomicUsize::new(0)),
                holding: Arc::new(AtomicBool::new(false)),
                release: Arc::new(tokio::sync::Notify::new()),
            }
        }
    }

    #[async_trait]
    impl Keystroke for GatedKeystroke {
        async fn send_char(&self, c: char) -> Result<(), KeystrokeError> {
            let index = self.count.fetch_add(1, Ordering::SeqCst);
            if index == self.hold_index {
                self.holding.store(true, Ordering::SeqCst);
                self.release.notified().await;
            }
            self.log.lock().unwrap().push(Entry::Key(c));
            Ok(())
        }
    }

    #[derive(Clone)]
    struct MockFocus {
        current: Arc<StdMutex<WindowId>>,
        fail_next: Arc<AtomicBool>,
    }

    impl MockFocus {
        fn new(id: &str) -> Self {
            Self {
                current: Arc::new(StdMutex::new(WindowId::new(id))),
                fail_next: Arc::new(AtomicBool::new(false)),
            }
        }

        fn focus(&self, id: &str) {
            *self.current.lock().unwrap() = WindowId::new(id);
        }
    }

    #[async_trait]
    impl FocusProbe for MockFocus {
        async fn active_window(&self) -> Result<WindowId, FocusError> {
            if self.fail_next.load(Ordering::SeqCst) {
                return Err(FocusError::QueryFailed("display gone".into()));
            }
            Ok(self.current.lock().unwrap().clone())
        }
    }

    #[derive(Clone)]
    struct MockSource {
        text: Arc<StdMutex<String>>,
        reads: Arc<AtomicUsize>,
        fail_next: Arc<AtomicBool>,
    }

    impl MockSource {
        fn new(text: &str) -> Self {
            Self {
                text: Arc::new(StdMutex::new(text.to_string())),
                reads: Arc::new(AtomicUsize::new(0)),
                fail_next: Arc::new(AtomicBool::new(false)),
            }
        }

        fn set_text(&self, text: &str) {
            *self.text.lock().unwrap() = text.to_string();
        }

        fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextSource for MockSource {
        async fn read_text(&self) -> Result<String, TextSourceError> {
            if self.fail_next.load(Ordering::SeqCst) {
                return Err(TextSourceError::ReadFailed("unreadable".into()));
            }
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.lock().unwrap().clone())
        }
    }

    #[derive(Clone)]
    struct RecordingSink {
        log: Log,
    }

    impl ProgressSink for RecordingSink {
        fn publish(&self, event: ProgressEvent) {
            self.log.lock().unwrap().push(Entry::Progress(event.index));
        }

        fn clear(&self) {
            self.log.lock().unwrap().push(Entry::Cleared);
        }
    }

    struct MockNotifier;

    #[async_trait]
    impl Notifier for MockNotifier {
        async fn notify(
            &self,
            _title: &str,
            _message: &str,
            _icon: NotificationIcon,
        ) -> Result<(), NotificationError> {
            Ok(())
        }
    }

    struct Fixture {
        controller: TypingController<MockKeystroke, MockFocus, MockSource, RecordingSink, MockNotifier>,
        keystroke: MockKeystroke,
        focus: MockFocus,
        source: MockSource,
        log: Log,
    }

    /// Controller wired to mocks, with a short arming delay and the
    /// fastest rate so tests run quickly.
    fn fixture(text: &str) -> Fixture {
        fixture_with(text, ControllerConfig {
            arming_delay: Duration::from_millis(20),
            wpm: WordsPerMinute::new(1000),
            enable_notify: false,
        })
    }

    fn fixture_with(text: &str, config: ControllerConfig) -> Fixture {
        let log: Log = Arc::new(StdMutex::new(Vec::new()));
        let keystroke = MockKeystroke::new(Arc::clone(&log));
        let focus = MockFocus::new("target");
        let source = MockSource::new(text);
        let sink = RecordingSink {
            log: Arc::clone(&log),
        };

        let controller = TypingController::new(
            keystroke.clone(),
            focus.clone(),
            source.clone(),
            sink,
            MockNotifier,
            config,
        );

        Fixture {
            controller,
            keystroke,
            focus,
            source,
            log,
        }
    }

    async fn finish(fx: &Fixture) {
        timeout(Duration::from_secs(10), fx.controller.wait_until_idle())
            .await
            .expect("session did not finish in time");
    }

    /// Poll until the cursor reaches `at_least` while the session is
    /// still in flight.
    async fn wait_for_cursor(fx: &Fixture, at_least: usize) {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if fx.controller.cursor().await >= at_least {
                return;
            }
            assert!(Instant::now() < deadline, "cursor never reached {}", at_least);
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    }

    #[tokio::test]
    async fn types_whole_script_and_returns_to_idle() {
        let fx = fixture("hi");
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        // Progress for each index precedes its keystroke
        assert_eq!(
            log_entries(&fx.log),
            vec![
                Entry::Progress(0),
                Entry::Key('h'),
                Entry::Progress(1),
                Entry::Key('i'),
            ]
        );

        // Natural completion keeps the cursor at the script length
        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 2);

        // An explicit stop afterwards resets it with no new emissions
        fx.controller.stop().await;
        assert_eq!(fx.controller.cursor().await, 0);
        assert_eq!(keys_of(&fx.log), vec!['h', 'i']);
    }

    #[tokio::test]
    async fn progress_indices_are_gapless_and_ordered() {
        let fx = fixture("abcdef");
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        assert_eq!(progress_of(&fx.log), vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(keys_of(&fx.log), vec!['a', 'b', 'c', 'd', 'e', 'f']);
    }

    #[tokio::test]
    async fn start_while_running_does_not_restart() {
        let fx = fixture("abcdefgh");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 2).await;

        let cursor_before = fx.controller.cursor().await;
        fx.controller.start().await.unwrap();
        fx.controller.start().await.unwrap();

        assert!(fx.controller.cursor().await >= cursor_before);
        assert_eq!(fx.source.reads(), 1);

        finish(&fx).await;
        assert_eq!(keys_of(&fx.log).len(), 8);
    }

    #[tokio::test]
    async fn pause_freezes_cursor_until_resume() {
        let fx = fixture("abcdefghij");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;

        fx.controller.pause().await;
        // Let any in-flight character land before sampling
        tokio::time::sleep(POLL_INTERVAL * 2).await;
        let frozen = fx.controller.cursor().await;
        assert_eq!(fx.controller.state().await, TypingState::Paused);

        tokio::time::sleep(POLL_INTERVAL * 3).await;
        assert_eq!(fx.controller.cursor().await, frozen);

        // Resume finishes the remainder exactly once
        fx.controller.start().await.unwrap();
        finish(&fx).await;
        assert_eq!(keys_of(&fx.log), "abcdefghij".chars().collect::<Vec<_>>());
        assert_eq!(fx.source.reads(), 1);
    }

    #[tokio::test]
    async fn pause_during_inflight_keystroke_does_not_repeat() {
        let log: Log = Arc::new(StdMutex::new(Vec::new()));
        let keystroke = GatedKeystroke::new(Arc::clone(&log), 1);
        let controller = TypingController::new(
            keystroke.clone(),
            MockFocus::new("target"),
            MockSource::new("abc"),
            RecordingSink {
                log: Arc::clone(&log),
            },
            MockNotifier,
            ControllerConfig {
                arming_delay: Duration::from_millis(20),
                wpm: WordsPerMinute::new(1000),
                enable_notify: false,
            },
        );

        controller.start().await.unwrap();

        // Wait until the worker is parked inside send_char for 'b'
        let deadline = Instant::now() + Duration::from_secs(10);
        while !keystroke.holding.load(Ordering::SeqCst) {
            assert!(Instant::now() < deadline, "keystroke never reached the gate");
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        // Pause lands while the keystroke is in flight, then the
        // keystroke completes
        controller.pause().await;
        keystroke.release.notify_one();

        tokio::time::sleep(POLL_INTERVAL * 2).await;
        assert_eq!(controller.state().await, TypingState::Paused);
        // The character that was already sent is accounted for
        assert_eq!(controller.cursor().await, 2);

        controller.start().await.unwrap();
        timeout(Duration::from_secs(10), controller.wait_until_idle())
            .await
            .expect("session did not finish in time");

        // No character or progress index was repeated after the resume
        assert_eq!(keys_of(&log), vec!['a', 'b', 'c']);
        assert_eq!(progress_of(&log), vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn stop_resets_from_running() {
        let fx = fixture("abcdefghij");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;

        fx.controller.stop().await;

        // Stop takes effect immediately in the control context
        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);
    }

    #[tokio::test]
    async fn stop_resets_from_paused() {
        let fx = fixture("abcdefghij");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;
        fx.controller.pause().await;

        fx.controller.stop().await;
        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);

        // Worker exits without typing anything further
        let typed = keys_of(&fx.log).len();
        tokio::time::sleep(POLL_INTERVAL * 3).await;
        assert_eq!(keys_of(&fx.log).len(), typed);
    }

    #[tokio::test]
    async fn stop_during_arming_emits_nothing() {
        let fx = fixture_with(
            "hello",
            ControllerConfig {
                arming_delay: Duration::from_millis(400),
                wpm: WordsPerMinute::new(1000),
                enable_notify: false,
            },
        );
        fx.controller.start().await.unwrap();
        assert_eq!(fx.controller.state().await, TypingState::Arming);

        tokio::time::sleep(Duration::from_millis(50)).await;
        fx.controller.stop().await;
        assert_eq!(fx.controller.state().await, TypingState::Idle);

        // Well past the would-be arming deadline, still nothing typed
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert!(keys_of(&fx.log).is_empty());
        assert!(progress_of(&fx.log).is_empty());
        assert_eq!(fx.controller.state().await, TypingState::Idle);
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let fx = fixture("hi");
        fx.controller.stop().await;
        fx.controller.stop().await;
        assert_eq!(fx.controller.state().await, TypingState::Idle);

        fx.controller.start().await.unwrap();
        finish(&fx).await;
        assert_eq!(keys_of(&fx.log), vec!['h', 'i']);
    }

    #[tokio::test]
    async fn focus_mismatch_suspends_until_focus_returns() {
        let fx = fixture("abcd");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;

        fx.focus.focus("elsewhere");
        tokio::time::sleep(POLL_INTERVAL * 2).await;
        let held = fx.controller.cursor().await;
        assert_eq!(fx.controller.state().await, TypingState::Running);

        // No emission while the target is unfocused
        tokio::time::sleep(POLL_INTERVAL * 3).await;
        assert_eq!(fx.controller.cursor().await, held);

        fx.focus.focus("target");
        finish(&fx).await;

        // Every character typed exactly once, in order
        assert_eq!(keys_of(&fx.log), vec!['a', 'b', 'c', 'd']);
        assert_eq!(progress_of(&fx.log), vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn stop_during_focus_mismatch_lands_idle() {
        let fx = fixture("abcd");
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;

        fx.focus.focus("elsewhere");
        tokio::time::sleep(POLL_INTERVAL * 2).await;

        fx.controller.stop().await;
        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);
    }

    #[tokio::test]
    async fn rate_change_applies_mid_session() {
        let fx = fixture_with(
            &"a".repeat(21),
            ControllerConfig {
                arming_delay: Duration::from_millis(20),
                wpm: WordsPerMinute::new(200), // 60ms per character
                enable_notify: false,
            },
        );
        fx.controller.start().await.unwrap();
        wait_for_cursor(&fx, 1).await;

        // At 200 wpm the remaining 20 characters would take ~1.2s;
        // at 1000 wpm they take ~240ms
        fx.controller.set_rate(1000);
        let switched = Instant::now();
        finish(&fx).await;

        assert!(switched.elapsed() < Duration::from_millis(700));
        assert_eq!(keys_of(&fx.log).len(), 21);
    }

    #[tokio::test]
    async fn set_rate_clamps_out_of_range() {
        let fx = fixture("hi");
        fx.controller.set_rate(0);
        assert_eq!(fx.controller.rate().get(), 200);
        fx.controller.set_rate(99999);
        assert_eq!(fx.controller.rate().get(), 1000);
    }

    #[tokio::test]
    async fn keystroke_failure_aborts_and_surfaces() {
        let fx = fixture("hello");
        fx.keystroke.fail_after(2);
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        // Abnormal stop: cursor reset, error retained for the host
        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);
        assert!(matches!(
            fx.controller.take_error(),
            Some(SessionError::Keystroke(_))
        ));
        assert!(fx.controller.take_error().is_none());
        assert!(log_entries(&fx.log).contains(&Entry::Cleared));

        // The machine is not stuck: a fresh session runs fine
        fx.keystroke.fail_after(usize::MAX);
        fx.controller.start().await.unwrap();
        finish(&fx).await;
        assert_eq!(fx.controller.cursor().await, 5);
        assert!(fx.controller.take_error().is_none());
    }

    #[tokio::test]
    async fn focus_failure_at_capture_aborts() {
        let fx = fixture("hello");
        fx.focus.fail_next.store(true, Ordering::SeqCst);
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);
        assert!(matches!(
            fx.controller.take_error(),
            Some(SessionError::Focus(_))
        ));
        assert!(keys_of(&fx.log).is_empty());
    }

    #[tokio::test]
    async fn source_failure_surfaces_from_start() {
        let fx = fixture("hello");
        fx.source.fail_next.store(true, Ordering::SeqCst);

        let result = fx.controller.start().await;
        assert!(matches!(result, Err(SessionError::Source(_))));
        assert_eq!(fx.controller.state().await, TypingState::Idle);
    }

    #[tokio::test]
    async fn start_from_idle_re_reads_the_source() {
        let fx = fixture("hi");
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        fx.source.set_text("bye");
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        assert_eq!(fx.source.reads(), 2);
        assert_eq!(keys_of(&fx.log), vec!['h', 'i', 'b', 'y', 'e']);
    }

    #[tokio::test]
    async fn empty_text_completes_immediately() {
        let fx = fixture("");
        fx.controller.start().await.unwrap();
        finish(&fx).await;

        assert_eq!(fx.controller.state().await, TypingState::Idle);
        assert_eq!(fx.controller.cursor().await, 0);
        assert!(keys_of(&fx.log).is_empty());
    }
}
