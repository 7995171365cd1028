//! Falling obstacle entities
//!
//! One `Enemy` struct for every kind; per-kind numbers come from the
//! `EnemyKind` table below.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::hitbox::HitBox;
use crate::consts::SCALE;

/// Hitbox inset from the rendered sprite bounds
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Padding {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Padding {
    /// Padding given in source pixels, scaled to screen pixels
    pub const fn scaled(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top: top * SCALE,
            right: right * SCALE,
            bottom: bottom * SCALE,
            left: left * SCALE,
        }
    }
}

/// Enemy types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Saw,
    SpikeHead,
    SpikeBall,
    RockHead,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Saw,
        EnemyKind::SpikeHead,
        EnemyKind::SpikeBall,
        EnemyKind::RockHead,
    ];

    /// Fall speed in pixels per frame
    pub fn speed(self) -> f32 {
        match self {
            Self::Saw => 6.0,
            Self::SpikeHead => 6.0,
            Self::SpikeBall => 10.0,
            Self::RockHead => 3.0,
        }
    }

    /// Health removed on contact
    pub fn damage(self) -> i32 {
        match self {
            Self::Saw => 25,
            Self::SpikeHead => 35,
            Self::SpikeBall => 15,
            Self::RockHead => 45,
        }
    }

    pub fn padding(self) -> Padding {
        match self {
            Self::Saw => Padding::scaled(0.0, 5.0, 0.0, 5.0),
            Self::SpikeHead => Padding::scaled(5.0, 12.0, 5.0, 12.0),
            Self::SpikeBall => Padding::scaled(0.0, 5.0, 0.0, 5.0),
            Self::RockHead => Padding::scaled(5.0, 5.0, 2.0, 5.0),
        }
    }

    /// Rendered sprite size in screen pixels
    pub fn size(self) -> Vec2 {
        let source = match self {
            Self::Saw => Vec2::new(38.0, 38.0),
            Self::SpikeHead => Vec2::new(54.0, 52.0),
            Self::SpikeBall => Vec2::new(28.0, 28.0),
            Self::RockHead => Vec2::new(42.0, 42.0),
        };
        source * SCALE
    }

    /// Texture/animation key handed to the renderer
    pub fn sprite_key(self) -> &'static str {
        match self {
            Self::Saw => "Saw",
            Self::SpikeHead => "spikeHead/spikeHead.png",
            Self::SpikeBall => "spikeBall/spikeBall.png",
            Self::RockHead => "rockHead/rockHead.png",
        }
    }
}

/// Unique enemy identity within a `Game`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(pub u32);

/// A live enemy; `pos` is the sprite's top-left corner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EnemyId,
    pub kind: EnemyKind,
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: EnemyKind, x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
        }
    }

    pub fn damage(&self) -> i32 {
        self.kind.damage()
    }

    /// Fall by `speed` pixels per frame
    pub fn update(&mut self, frame_delta: f32) {
        self.pos.y += self.kind.speed() * frame_delta;
    }

    /// Sprite bounds shrunk by the kind's padding
    pub fn hit_box(&self) -> HitBox {
        let size = self.kind.size();
        let pad = self.kind.padding();
        HitBox {
            x: self.pos.x + pad.left,
            y: self.pos.y + pad.top,
            w: size.x - pad.left - pad.right,
            h: size.y - pad.top - pad.bottom,
        }
    }

    /// Below the bottom edge of the play area
    pub fn is_off_screen(&self, screen_height: f32) -> bool {
        self.pos.y > screen_height
    }
}
