//! Keyboard input mapping
//!
//! Only the four arrow keys drive the car. Browser `KeyboardEvent.key`
//! strings are mapped here so the DOM handlers stay one-liners.

use crate::sim::TickInput;

/// Directional keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Forward,
    Backward,
    Left,
    Right,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_event_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(Key::Forward),
            "ArrowDown" => Some(Key::Backward),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            _ => None,
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    input: TickInput,
}

impl KeyState {
    /// Record a keydown/keyup. Returns false for keys the game ignores.
    pub fn set(&mut self, key: &str, pressed: bool) -> bool {
        let Some(key) = Key::from_event_key(key) else {
            return false;
        };
        match key {
            Key::Forward => self.input.forward = pressed,
            Key::Backward => self.input.backward = pressed,
            Key::Left => self.input.left = pressed,
            Key::Right => self.input.right = pressed,
        }
        true
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&mut self) {
        self.input = TickInput::default();
    }

    pub fn input(&self) -> TickInput {
        self.input
    }
}
