//! Logical input
//!
//! The simulation never listens to devices. The host polls its keyboard (or a
//! replay, or the autopilot) and hands the result in through `InputSource`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Dash (space bar)
    Dash,
    Enter,
    Escape,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::Dash,
        Key::Enter,
        Key::Escape,
    ];
}

/// Anything that can answer "is this key held right now?"
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
}

/// Set of currently held keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<Key>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of held keys
    pub fn with(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
        }
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Copy the held state of every key from another source
    fn capture(source: &impl InputSource) -> Self {
        Self {
            held: Key::ALL
                .into_iter()
                .filter(|&k| source.is_key_down(k))
                .collect(),
        }
    }
}

impl InputSource for KeyState {
    fn is_key_down(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

/// Press detection across ticks (menus act on press, not on hold)
#[derive(Debug, Clone, Default)]
pub struct KeyEdges {
    previous: KeyState,
    current: KeyState,
}

impl KeyEdges {
    /// Record this tick's key state
    pub fn update(&mut self, source: &impl InputSource) {
        self.previous = std::mem::take(&mut self.current);
        self.current = KeyState::capture(source);
    }

    /// Held now but not on the previous tick
    pub fn just_pressed(&self, key: Key) -> bool {
        self.current.is_key_down(key) && !self.previous.is_key_down(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state() {
        let mut keys = KeyState::with(&[Key::Left, Key::Dash]);
        assert!(keys.is_key_down(Key::Left));
        assert!(!keys.is_key_down(Key::Right));
        keys.press(Key::Right);
        assert!(keys.is_key_down(Key::Right));
        assert_eq!(keys, KeyState::with(&[Key::Dash, Key::Right, Key::Left]));
    }

    #[test]
    fn test_just_pressed_fires_once_per_press() {
        let mut edges = KeyEdges::default();
        let held = KeyState::with(&[Key::Enter]);

        edges.update(&held);
        assert!(edges.just_pressed(Key::Enter));
        edges.update(&held);
        assert!(!edges.just_pressed(Key::Enter));

        edges.update(&KeyState::new());
        edges.update(&held);
        assert!(edges.just_pressed(Key::Enter));
    }
}
