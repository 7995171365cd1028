//! 2D vector helpers
//!
//! `glam::Vec2` already covers add/subtract/scale in place (`+=`, `-=`, `*=`, `/=`).
//! The helpers here add the two operations deceleration is written in terms of.

use glam::Vec2;

/// Vector type used throughout the simulation
pub type Vector2 = Vec2;

/// In-place vector operations used by the player controller
pub trait VectorExt {
    /// Euclidean length
    fn magnitude(&self) -> f32;
    /// Negate both components in place
    fn inverse(&mut self) -> &mut Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn magnitude(&self) -> f32 {
        self.length()
    }

    #[inline]
    fn inverse(&mut self) -> &mut Self {
        *self = -*self;
        self
    }
}
