//! Per-tick input snapshot supplied by the outer loop.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    W,
    A,
    S,
    D,
    Enter,
    Space,
    Escape,
}

pub type KeySet = SmallVec<[Key; 8]>;

/// Keys held this tick, discrete presses since the last tick, and pointer state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub held: KeySet,
    pub pressed: KeySet,
    pub pointer: Option<(f32, f32)>,
    pub clicked: bool,
}

impl InputSnapshot {
    /// No keys, no pointer.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// Snapshot with a single discrete key press.
    #[must_use]
    pub fn pressed(key: Key) -> Self {
        Self::default().press(key)
    }

    #[must_use]
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.push(key);
        self
    }

    #[must_use]
    pub fn hold(mut self, key: Key) -> Self {
        self.held.push(key);
        self
    }

    #[must_use]
    pub fn was_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Enter or Space, the two confirmation keys.
    #[must_use]
    pub fn confirm(&self) -> bool {
        self.was_pressed(Key::Enter) || self.was_pressed(Key::Space)
    }
}
