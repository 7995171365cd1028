//! Requests from the simulation to the presentation layer

use serde::{Deserialize, Serialize};

use super::enemy::{EnemyId, EnemyKind};
use super::state::Character;

/// Something that happened during a tick that the renderer/audio may react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Create a drawable for a new enemy
    EnemySpawned { id: EnemyId, kind: EnemyKind, x: f32, y: f32 },
    /// Dispose the drawable of an enemy that left the screen
    EnemyDespawned { id: EnemyId },
    PlayerHit { enemy: EnemyId, damage: i32, health: i32 },
    /// Shake the camera
    Shake { strength: f32, duration_ticks: u32 },
    GameOver { time: u32 },
    Restarted,
    /// Confirmed on the selection screen; persist it
    CharacterSelected { character: Character },
    Paused,
    Resumed,
}
