//! Spike Dodge - a side-scrolling survival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state store, spawning, movement, collisions)
//! - `config`: Data-driven run configuration (viewport, seed, wave table)
//! - `preferences`: Persisted player preference (selected character)
//!
//! Rendering, animation, audio and input polling live outside this crate;
//! the simulation only consumes logical key state and emits [`sim::GameEvent`]s.

pub mod config;
pub mod preferences;
pub mod sim;

pub use config::{GameConfig, Viewport};
pub use preferences::Preferences;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Frame rate the per-tick tuning values below are expressed against
    pub const TARGET_FPS: f32 = 60.0;
    /// Longest frame the simulation will take in one tick (prevent spiral of death)
    pub const MAX_FRAME_DT: f32 = 4.0 * SIM_DT;

    /// Pixel-art upscale factor applied to every sprite
    pub const SCALE: f32 = 1.5;

    /// Health at run start; also the upper bound
    pub const MAX_HEALTH: i32 = 100;

    /// Player movement
    pub const ACCELERATION: f32 = 0.75;
    pub const MAX_VELOCITY: f32 = 6.0;
    pub const MAX_DASH_VELOCITY: f32 = 20.0;
    pub const DASH_SPEED: f32 = 20.0;
    /// Dash length in ticks
    pub const DASH_DURATION_TICKS: u32 = 8;
    /// Velocity loses 1/7 of itself every non-dash tick
    pub const DECELERATION_DIVISOR: f32 = 7.0;
    /// Below this magnitude velocity snaps to zero
    pub const VELOCITY_EPSILON: f32 = 0.01;

    /// Injury window in ticks (no further damage while it runs)
    pub const INJURED_COOL_DOWN_TICKS: u32 = 65;
    /// Blink toggles every N injury ticks
    pub const INJURED_BLINK_INTERVAL: u32 = 5;

    /// Player sprite (32x32 source pixels) and hitbox padding
    pub const PLAYER_SPRITE_SIZE: f32 = 32.0 * SCALE;
    pub const PLAYER_PADDING_H: f32 = 6.0 * SCALE;
    pub const PLAYER_PADDING_V: f32 = 8.0 * SCALE;

    /// Screen shake requested on every hit
    pub const SHAKE_STRENGTH: f32 = 5.0;
    pub const SHAKE_DURATION_TICKS: u32 = 10;

    /// Broad-phase distance (on top of the boxes' own half extents)
    pub const PROXIMITY_THRESHOLD: f32 = 50.0 * SCALE;
}
