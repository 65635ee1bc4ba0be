//! Rigid axis-aligned bodies
//!
//! A body is a rectangle centred on `pos` spanning `pos ± half_extent`.
//! Variants that used to be separate classes (player, ball, enemy...) are a
//! `BodyTag` on one concrete record.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which sides of a body were pushed out of static geometry this step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl CollisionFlags {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.top || self.bottom || self.left || self.right
    }

    /// Record a hit on the left (`true`) or right side, dropping the other
    pub(crate) fn set_horizontal(&mut self, left: bool) {
        self.left = left;
        self.right = !left;
    }

    /// Record a hit on the bottom (`true`) or top side, dropping the other
    pub(crate) fn set_vertical(&mut self, bottom: bool) {
        self.bottom = bottom;
        self.top = !bottom;
    }
}

/// Gameplay role of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyTag {
    #[default]
    Player,
    Ball,
    Paddle,
    Enemy,
    Pickup,
    Obstacle,
}

/// Whether the integrator moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Finite mass: gravity, friction, velocity and collision apply
    #[default]
    Dynamic,
    /// Infinite mass: never integrated
    Fixed,
}

/// A moving or static rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub tag: BodyTag,
    pub kind: BodyKind,
    /// Centre of the rectangle
    pub pos: Vec2,
    /// World units per second
    pub vel: Vec2,
    /// Input forces for the coming step (world units/s²)
    pub accel: Vec2,
    /// Half width and half height; both must be positive
    pub half_extent: Vec2,
    /// Sides resolved during the current step
    pub flags: CollisionFlags,
    /// Flags as they stood before the last `clear_flags`
    pub prev_flags: CollisionFlags,
}

impl Body {
    pub fn new(tag: BodyTag, pos: Vec2, half_extent: Vec2) -> Self {
        debug_assert!(
            half_extent.x > 0.0 && half_extent.y > 0.0,
            "body half extents must be positive, got {half_extent}"
        );
        Self {
            tag,
            kind: BodyKind::Dynamic,
            pos,
            vel: Vec2::ZERO,
            accel: Vec2::ZERO,
            half_extent,
            flags: CollisionFlags::default(),
            prev_flags: CollisionFlags::default(),
        }
    }

    /// Build from a full width/height, the way levels describe sizes
    pub fn with_size(tag: BodyTag, pos: Vec2, size: Vec2) -> Self {
        Self::new(tag, pos, size * 0.5)
    }

    pub fn fixed(mut self) -> Self {
        self.kind = BodyKind::Fixed;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extent * 2.0
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos - self.half_extent
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.half_extent
    }

    /// Resting on something as of the last step
    #[inline]
    pub fn grounded(&self) -> bool {
        self.flags.bottom
    }

    /// Strict AABB overlap with another body (touching edges do not count)
    pub fn overlaps(&self, other: &Body) -> bool {
        aabb_overlap(self.pos, self.half_extent, other.pos, other.half_extent)
    }
}

/// Strict AABB overlap test on centres and half extents
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    let delta = (a_pos - b_pos).abs();
    let reach = a_half + b_half;
    delta.x < reach.x && delta.y < reach.y
}

/// Start a new step: remember the old flags, then clear them
pub fn clear_flags(body: &mut Body) {
    body.prev_flags = body.flags;
    body.flags.clear();
}
