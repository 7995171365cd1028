//! Game state snapshot and patch types
//!
//! A `GameState` is never mutated once published; every transition produces a
//! fresh value through [`GameState::merged`].

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HEALTH;

/// Selectable player character (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    MaskDude,
    NinjaFrog,
    PinkMan,
    VirtualGuy,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::MaskDude,
        Character::NinjaFrog,
        Character::PinkMan,
        Character::VirtualGuy,
    ];

    /// Stable index used for persistence
    pub fn index(self) -> usize {
        match self {
            Character::MaskDude => 0,
            Character::NinjaFrog => 1,
            Character::PinkMan => 2,
            Character::VirtualGuy => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Sprite-sheet folder for this character's animations
    pub fn as_str(self) -> &'static str {
        match self {
            Character::MaskDude => "maskDude",
            Character::NinjaFrog => "ninjaFrog",
            Character::PinkMan => "pinkMan",
            Character::VirtualGuy => "virtualGuy",
        }
    }

    /// Animation key for the renderer, e.g. `ninjaFrog/run/run`
    pub fn animation_key(self, animation: &str) -> String {
        format!("{}/{animation}/{animation}", self.as_str())
    }
}

/// Authoritative game state (one immutable snapshot per transition)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Player health, always within 0..=MAX_HEALTH
    pub health: i32,
    /// Selected character, set before the run starts
    pub character: Character,
    pub is_game_over: bool,
    pub is_paused: bool,
    /// Elapsed whole seconds since run start
    pub time: u32,
    /// Difficulty level, starts at 1 and never decreases within a run
    pub difficulty: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial(Character::default())
    }
}

impl GameState {
    /// Fresh run state for the given character
    pub fn initial(character: Character) -> Self {
        Self {
            health: MAX_HEALTH,
            character,
            is_game_over: false,
            is_paused: false,
            time: 0,
            difficulty: 1,
        }
    }

    /// Produce the next snapshot by overlaying `patch` onto `self`
    ///
    /// Out-of-range values are clamped here rather than rejected.
    pub fn merged(&self, patch: &StatePatch) -> GameState {
        GameState {
            health: patch.health.unwrap_or(self.health).clamp(0, MAX_HEALTH),
            character: patch.character.unwrap_or(self.character),
            is_game_over: patch.is_game_over.unwrap_or(self.is_game_over),
            is_paused: patch.is_paused.unwrap_or(self.is_paused),
            time: patch.time.unwrap_or(self.time),
            difficulty: patch.difficulty.unwrap_or(self.difficulty).max(1),
        }
    }

    /// Gameplay systems skip their tick when this is false
    pub fn is_running(&self) -> bool {
        !self.is_paused && !self.is_game_over
    }
}

/// Partial update applied by `StateStore::set_state`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatePatch {
    pub health: Option<i32>,
    pub character: Option<Character>,
    pub is_game_over: Option<bool>,
    pub is_paused: Option<bool>,
    pub time: Option<u32>,
    pub difficulty: Option<u32>,
}

impl StatePatch {
    pub fn health(health: i32) -> Self {
        Self {
            health: Some(health),
            ..Default::default()
        }
    }

    pub fn paused(is_paused: bool) -> Self {
        Self {
            is_paused: Some(is_paused),
            ..Default::default()
        }
    }

    pub fn game_over() -> Self {
        Self {
            is_game_over: Some(true),
            ..Default::default()
        }
    }

    pub fn character(character: Character) -> Self {
        Self {
            character: Some(character),
            ..Default::default()
        }
    }

    /// Everything a restart resets (character is kept)
    pub fn restart() -> Self {
        Self {
            health: Some(MAX_HEALTH),
            is_game_over: Some(false),
            is_paused: Some(false),
            time: Some(0),
            difficulty: Some(1),
            character: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
