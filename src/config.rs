//! Run configuration
//!
//! Everything a run needs that is not a fixed tuning constant: play-area
//! size, RNG seed, spawn table and difficulty pacing. Loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::sim::spawn::WaveSpec;

/// Play-area bounds in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    /// 320x288 pixel-art canvas at 1.5x
    fn default() -> Self {
        Self::new(480.0, 432.0)
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport: Viewport,
    /// Seed for spawn positions
    pub seed: u64,
    /// Spawn table, one entry per wave
    pub waves: Vec<WaveSpec>,
    /// Seconds between difficulty increases
    pub difficulty_interval_secs: u32,
    /// Vertical start position of new enemies (above the screen)
    pub enemy_spawn_y: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            seed: 0,
            waves: WaveSpec::default_table(),
            difficulty_interval_secs: 15,
            enemy_spawn_y: -40.0,
        }
    }
}

impl GameConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Difficulty level for an elapsed time (starts at 1)
    pub fn difficulty_at(&self, time_secs: u32) -> u32 {
        1 + time_secs / self.difficulty_interval_secs.max(1)
    }
}
