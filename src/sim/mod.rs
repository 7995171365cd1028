//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-driven only (one `Game::tick` per rendered frame)
//! - Seeded RNG only
//! - Stable iteration order (entities keep spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod enemy;
pub mod game;
pub mod hitbox;
pub mod input;
pub mod menu;
pub mod player;
pub mod spawn;
pub mod state;
pub mod store;
pub mod vector;

pub use autopilot::autopilot_input;
pub use collision::{CollisionOutcome, Damageable, resolve_collisions};
pub use effects::GameEvent;
pub use enemy::{Enemy, EnemyId, EnemyKind, Padding};
pub use game::Game;
pub use hitbox::HitBox;
pub use input::{InputSource, Key, KeyEdges, KeyState};
pub use menu::{CharacterSelect, MenuAction, PauseMenu, PauseMenuItem};
pub use player::{MoveState, Player};
pub use spawn::{EnemyWave, SpawnScheduler, WaveSpec};
pub use state::{Character, GameState, StatePatch};
pub use store::{StateStore, SubscriptionId};
pub use vector::{Vector2, VectorExt};
