//! Immovable rectangles
//!
//! A static rect has a centre and half extents but no velocity. Scenes supply
//! them directly (walls, floors, obstacles) or the tile grid materializes one
//! per solid cell on demand.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::aabb_overlap;

/// An immovable axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaticRect {
    /// Centre of the rectangle
    pub pos: Vec2,
    /// Half width and half height
    pub half_extent: Vec2,
}

impl StaticRect {
    pub fn new(pos: Vec2, half_extent: Vec2) -> Self {
        debug_assert!(
            half_extent.x > 0.0 && half_extent.y > 0.0,
            "static rect half extents must be positive, got {half_extent}"
        );
        Self { pos, half_extent }
    }

    /// Build from edges instead of a centre
    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self::new((min + max) * 0.5, (max - min) * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half_extent
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.half_extent.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.half_extent.y
    }

    /// Strict overlap with a rectangle given by centre and half extents
    #[inline]
    pub fn overlaps(&self, pos: Vec2, half_extent: Vec2) -> bool {
        aabb_overlap(self.pos, self.half_extent, pos, half_extent)
    }

    /// Whether a point lies strictly inside
    pub fn contains_point(&self, point: Vec2) -> bool {
        let delta = (point - self.pos).abs();
        delta.x < self.half_extent.x && delta.y < self.half_extent.y
    }
}
