//! Wave/cooldown enemy spawning
//!
//! Each wave owns an independent counter. `on_tick` advances every counter by
//! one time step; a wave whose counter reaches its threshold spawns all of its
//! listed kinds at once and starts over. Waves may fire on the same step.
//!
//! Difficulty shortens each wave's threshold by one step per level above 1,
//! down to half of the configured cooldown.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, EnemyId, EnemyKind};

/// Static wave description (one row of the spawn table)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSpec {
    /// Time steps between spawns at difficulty 1
    pub cool_down: u32,
    /// Kinds spawned together when the wave fires
    pub enemies: Vec<EnemyKind>,
}

impl WaveSpec {
    pub fn new(cool_down: u32, enemies: &[EnemyKind]) -> Self {
        Self {
            cool_down,
            enemies: enemies.to_vec(),
        }
    }

    /// Default table: three saws every 4, one spike head every 6,
    /// four spike balls every 8, two rock heads every 20
    pub fn default_table() -> Vec<WaveSpec> {
        use EnemyKind::*;
        vec![
            WaveSpec::new(4, &[Saw, Saw, Saw]),
            WaveSpec::new(6, &[SpikeHead]),
            WaveSpec::new(8, &[SpikeBall, SpikeBall, SpikeBall, SpikeBall]),
            WaveSpec::new(20, &[RockHead, RockHead]),
        ]
    }
}

/// Runtime wave state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyWave {
    /// Steps since this wave last fired
    pub cool_down_time: u32,
    /// Configured threshold at difficulty 1
    pub cool_down: u32,
    pub enemies: Vec<EnemyKind>,
}

impl From<&WaveSpec> for EnemyWave {
    fn from(spec: &WaveSpec) -> Self {
        Self {
            cool_down_time: 0,
            cool_down: spec.cool_down.max(1),
            enemies: spec.enemies.clone(),
        }
    }
}

impl EnemyWave {
    /// Threshold after applying difficulty
    pub fn effective_cool_down(&self, difficulty: u32) -> u32 {
        let floor = self.cool_down.div_ceil(2).max(1);
        self.cool_down
            .saturating_sub(difficulty.saturating_sub(1))
            .max(floor)
    }
}

/// Owns the wave counters and the live enemy set
#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    table: Vec<WaveSpec>,
    waves: Vec<EnemyWave>,
    enemies: Vec<Enemy>,
    difficulty: u32,
    spawn_y: f32,
    next_id: u32,
}

impl SpawnScheduler {
    pub fn new(table: Vec<WaveSpec>, spawn_y: f32) -> Self {
        let waves = table.iter().map(EnemyWave::from).collect();
        Self {
            table,
            waves,
            enemies: Vec::new(),
            difficulty: 1,
            spawn_y,
            next_id: 1,
        }
    }

    pub fn waves(&self) -> &[EnemyWave] {
        &self.waves
    }

    /// Live enemies in spawn order
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Apply a difficulty published by the state store
    pub fn set_difficulty(&mut self, difficulty: u32) {
        let difficulty = difficulty.max(1);
        if difficulty != self.difficulty {
            log::debug!(
                "Spawn difficulty {} -> {}",
                self.difficulty,
                difficulty
            );
            self.difficulty = difficulty;
        }
    }

    /// Advance every wave by one time step, spawning the waves that are due
    ///
    /// Returns the ids of the enemies spawned this step.
    pub fn on_tick<R: Rng>(&mut self, rng: &mut R, screen_width: f32) -> Vec<EnemyId> {
        let mut spawned = Vec::new();
        let max_x = screen_width.max(0.0) as u32;

        for wave in &mut self.waves {
            wave.cool_down_time += 1;
            if wave.cool_down_time < wave.effective_cool_down(self.difficulty) {
                continue;
            }
            wave.cool_down_time = 0;

            for &kind in &wave.enemies {
                let id = EnemyId(self.next_id);
                self.next_id += 1;
                let x = rng.random_range(0..=max_x) as f32;
                self.enemies.push(Enemy::new(id, kind, x, self.spawn_y));
                spawned.push(id);
            }
        }

        if !spawned.is_empty() {
            log::debug!("Spawned {} enemies ({} live)", spawned.len(), self.enemies.len());
        }
        spawned
    }

    /// Per-frame movement and cleanup
    ///
    /// Returns the enemies that fell past the bottom edge and were removed.
    pub fn update(&mut self, frame_delta: f32, screen_height: f32) -> Vec<Enemy> {
        for enemy in &mut self.enemies {
            enemy.update(frame_delta);
        }

        let (gone, live): (Vec<Enemy>, Vec<Enemy>) = self
            .enemies
            .drain(..)
            .partition(|e| e.is_off_screen(screen_height));
        self.enemies = live;
        gone
    }

    /// Remove a single enemy; returns it if it was live
    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let index = self.enemies.iter().position(|e| e.id == id)?;
        Some(self.enemies.remove(index))
    }

    /// Clear all enemies and rebuild the waves from the table
    pub fn restart(&mut self) {
        self.enemies.clear();
        self.waves = self.table.iter().map(EnemyWave::from).collect();
        self.difficulty = 1;
    }

    /// Insert a pre-built enemy (scripted encounters and tests)
    pub fn push_enemy(&mut self, kind: EnemyKind, x: f32, y: f32) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;
        self.enemies.push(Enemy::new(id, kind, x, y));
        id
    }
}
