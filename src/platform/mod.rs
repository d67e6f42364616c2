//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (key names to game controls)

pub mod input;

pub use input::{Control, InputLatch, control_for_key};
