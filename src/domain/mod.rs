//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod typing;
pub mod timing;
pub mod config;
pub mod error;

// Re-export common types
pub use error::*;
pub use typing::{
    InvalidStateTransition, TypingScript, TypingSession, TypingState, WindowId, WordsPerMinute,
};
pub use timing::Delay;
pub use config::AppConfig;
