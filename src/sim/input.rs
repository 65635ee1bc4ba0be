//! Keyboard snapshot and per-step simulation context

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;

/// Keys the scenes react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    W,
    S,
    Space,
}

/// Keys currently held, sampled once per processed event batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    held: BTreeSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: Key, down: bool) {
        if down {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    #[inline]
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// -1, 0 or +1 from a pair of opposing keys
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        match (self.is_held(negative), self.is_held(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Everything a scene step reads besides its own state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimContext {
    pub settings: SimSettings,
    pub input: InputState,
    /// Steps run so far
    pub step: u64,
}

impl SimContext {
    pub fn new(settings: SimSettings) -> Self {
        Self {
            settings,
            input: InputState::default(),
            step: 0,
        }
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.settings.fixed_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release() {
        let mut input = InputState::new();
        input.press(Key::Left);
        assert!(input.is_held(Key::Left));
        input.set(Key::Left, false);
        assert!(!input.is_held(Key::Left));
    }

    #[test]
    fn test_axis() {
        let mut input = InputState::new();
        assert_eq!(input.axis(Key::Left, Key::Right), 0.0);
        input.press(Key::Right);
        assert_eq!(input.axis(Key::Left, Key::Right), 1.0);
        input.press(Key::Left);
        assert_eq!(input.axis(Key::Left, Key::Right), 0.0);
        input.release(Key::Right);
        assert_eq!(input.axis(Key::Left, Key::Right), -1.0);
    }
}
