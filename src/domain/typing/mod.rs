//! Typing domain: session state machine and typing value objects

mod rate;
mod script;
mod session;
mod window;

pub use rate::{WordsPerMinute, DEFAULT_WPM, MAX_WPM, MIN_WPM};
pub use script::TypingScript;
pub use session::{InvalidStateTransition, TypingSession, TypingState};
pub use window::WindowId;
