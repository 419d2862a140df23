//! Platform abstraction layer
//!
//! Handles browser specifics that can still be tested natively:
//! - Keyboard mapping to tick input

pub mod input;

pub use input::{Key, KeyState};
