//! Player controller
//!
//! Owns the player's kinematics. Movement state (idle/running/dashing) and
//! the injury window are independent: an injured player keeps moving and can
//! still dash, it just cannot take damage until the window closes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Damageable;
use super::hitbox::HitBox;
use super::input::{InputSource, Key};
use super::state::{GameState, StatePatch};
use super::store::StateStore;
use super::vector::VectorExt;
use crate::config::Viewport;
use crate::consts::*;

/// Movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MoveState {
    #[default]
    Idle,
    Running,
    Dashing,
}

impl MoveState {
    /// Animation (or single texture, for the dash) the renderer should show
    pub fn animation(self) -> &'static str {
        match self {
            MoveState::Idle => "idle",
            MoveState::Running => "run",
            MoveState::Dashing => "dash",
        }
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Sprite center in screen pixels
    pos: Vec2,
    velocity: Vec2,
    /// Per-tick impulse accumulator, cleared every non-dash tick
    acceleration: Vec2,
    /// Facing: +1 right, -1 left
    direction: f32,
    state: MoveState,
    is_dead: bool,

    // injured
    is_injured: bool,
    injured_cool_down: u32,
    injured_blink_on: bool,

    // dash
    dash_cool_down: u32,
    is_dash_pressed: bool,
    velocity_before_dash: Vec2,
    acceleration_before_dash: Vec2,

    screen: Viewport,
}

impl Player {
    /// Spawn at the horizontal center, standing on the floor
    pub fn new(screen: Viewport) -> Self {
        let pos = Vec2::new(
            screen.width / 2.0,
            screen.height - PLAYER_SPRITE_SIZE * 2.0 - PLAYER_SPRITE_SIZE / 2.0,
        );
        Self {
            pos,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            direction: 1.0,
            state: MoveState::Idle,
            is_dead: false,
            is_injured: false,
            injured_cool_down: 0,
            injured_blink_on: true,
            dash_cool_down: 0,
            is_dash_pressed: false,
            velocity_before_dash: Vec2::ZERO,
            acceleration_before_dash: Vec2::ZERO,
            screen,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn move_state(&self) -> MoveState {
        self.state
    }

    pub fn is_dashing(&self) -> bool {
        self.state == MoveState::Dashing
    }

    pub fn injured_cool_down(&self) -> u32 {
        self.injured_cool_down
    }

    /// Sprite alpha: blinks between 0.25 and 0.75 while injured
    pub fn alpha(&self) -> f32 {
        match (self.is_injured, self.injured_blink_on) {
            (false, _) => 1.0,
            (true, true) => 0.25,
            (true, false) => 0.75,
        }
    }

    /// Hitbox width, the sprite width minus horizontal padding
    fn hit_box_width(&self) -> f32 {
        PLAYER_SPRITE_SIZE - PLAYER_PADDING_H * 2.0
    }

    fn hit_box_height(&self) -> f32 {
        PLAYER_SPRITE_SIZE - PLAYER_PADDING_V
    }

    fn set_state(&mut self, state: MoveState) {
        if state == self.state {
            return;
        }
        self.state = state;
        if state == MoveState::Dashing {
            self.dash_cool_down = 0;
            self.is_dash_pressed = true;
            // keep current motion so it resumes once the dash ends
            self.velocity_before_dash = self.velocity;
            self.acceleration_before_dash = self.acceleration;
        }
    }

    fn set_direction(&mut self, direction: f32) {
        self.direction = direction;
    }

    /// Advance one tick
    ///
    /// `frame_delta` is the tick length in 60 Hz frames (1.0 at `SIM_DT`).
    pub fn update(&mut self, input: &impl InputSource, state: &GameState, frame_delta: f32) {
        if self.is_dead || !state.is_running() {
            return;
        }

        // Dash needs a fresh press: holding the key never chains dashes
        if self.is_dash_pressed && !input.is_key_down(Key::Dash) {
            self.is_dash_pressed = false;
        }

        if self.state != MoveState::Dashing {
            let left = input.is_key_down(Key::Left);
            let right = input.is_key_down(Key::Right);

            if input.is_key_down(Key::Dash) && !self.is_dash_pressed {
                self.set_state(MoveState::Dashing);
                self.velocity = Vec2::new(DASH_SPEED * self.direction, 0.0);
            } else if right && !left {
                self.set_state(MoveState::Running);
                self.acceleration += Vec2::new(ACCELERATION, 0.0);
                self.set_direction(1.0);
            } else if left && !right {
                self.set_state(MoveState::Running);
                self.acceleration += Vec2::new(-ACCELERATION, 0.0);
                self.set_direction(-1.0);
            } else {
                self.set_state(MoveState::Idle);
            }
        } else {
            self.dash_cool_down += 1;
            if self.dash_cool_down >= DASH_DURATION_TICKS {
                self.set_state(MoveState::Idle);
                self.velocity = self.velocity_before_dash;
                self.acceleration = self.acceleration_before_dash;
            }
        }

        self.velocity += self.acceleration;
        self.clamp_velocity();

        let dx = self.velocity.x * frame_delta;
        let hit_box = self.hit_box();
        let half_width = self.hit_box_width() * 0.5;

        if hit_box.x + dx < 0.0 {
            self.pos.x = half_width;
            self.velocity = Vec2::ZERO;
        } else if self.pos.x + hit_box.w * 0.5 + dx > self.screen.width {
            self.pos.x = self.screen.width - half_width;
            self.velocity = Vec2::ZERO;
        } else {
            self.pos.x += dx;
        }

        if !self.is_dashing() {
            self.decelerate();
            self.acceleration = Vec2::ZERO;
        }

        if self.is_injured {
            if self.injured_cool_down.is_multiple_of(INJURED_BLINK_INTERVAL) {
                self.injured_blink_on = !self.injured_blink_on;
            }
            if self.injured_cool_down >= INJURED_COOL_DOWN_TICKS {
                self.is_injured = false;
            }
            self.injured_cool_down += 1;
        }
    }

    fn clamp_velocity(&mut self) {
        let max = if self.is_dashing() {
            MAX_DASH_VELOCITY
        } else {
            MAX_VELOCITY
        };
        self.velocity.x = self.velocity.x.clamp(-max, max);
    }

    /// Exponential decay toward rest
    fn decelerate(&mut self) {
        let magnitude = self.velocity.magnitude();
        if magnitude > 0.0 {
            if magnitude < VELOCITY_EPSILON {
                self.velocity = Vec2::ZERO;
            } else {
                let mut inverse = self.velocity;
                inverse.inverse();
                self.velocity += inverse / DECELERATION_DIVISOR;
            }
        }
    }
}

impl Damageable for Player {
    fn hit_box(&self) -> HitBox {
        HitBox {
            x: self.pos.x - PLAYER_SPRITE_SIZE * 0.5 + PLAYER_PADDING_H,
            y: self.pos.y - PLAYER_SPRITE_SIZE * 0.5 + PLAYER_PADDING_V,
            w: self.hit_box_width(),
            h: self.hit_box_height(),
        }
    }

    fn is_injured(&self) -> bool {
        self.is_injured
    }

    fn is_dead(&self) -> bool {
        self.is_dead
    }

    fn set_injured(&mut self) {
        self.is_injured = true;
        self.injured_cool_down = 0;
        self.injured_blink_on = true;
    }

    fn kill(&mut self, store: &StateStore) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        log::info!("Player died at x={:.1}", self.pos.x);
        store.set_state(StatePatch::game_over());
    }
}
