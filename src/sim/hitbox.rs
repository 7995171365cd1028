//! Axis-aligned hitboxes

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HitBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl HitBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Strict AABB overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &HitBox) -> bool {
        self.x < other.x + other.w
            && self.x + self.w > other.x
            && self.y < other.y + other.h
            && self.h + self.y > other.y
    }

    /// Cheap broad-phase check: centers within `threshold` plus half extents
    ///
    /// Never rejects a pair that `overlaps` would accept.
    pub fn is_close(&self, other: &HitBox, threshold: f32) -> bool {
        let (ax, ay) = self.center();
        let (bx, by) = other.center();
        let reach_x = (self.w + other.w) * 0.5 + threshold;
        let reach_y = (self.h + other.h) * 0.5 + threshold;
        (ax - bx).abs() <= reach_x && (ay - by).abs() <= reach_y
    }
}
