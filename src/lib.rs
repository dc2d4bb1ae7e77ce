//! GhostTyper - human-paced automatic typing CLI
//!
//! This crate provides the core functionality for replaying text into the
//! currently focused window as individual keystrokes, paced like a person
//! typing at a configurable words-per-minute rate.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, entities, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (ydotool, xdotool, enigo, etc.)
//! - **CLI**: Command-line interface, argument parsing, and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
