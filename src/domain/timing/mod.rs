//! Timing domain: delay values for the arming grace period

mod delay;

pub use delay::{Delay, DEFAULT_ARMING_SECS};
