//! Collision detection and response for axis-aligned rectangles
//!
//! Resolution always works on one axis at a time. The integrator moves a body
//! along X, resolves X, then does the same for Y; see `integrate`.
//!
//! When several rectangles overlap on the same axis they are resolved in
//! iteration order, each against the body position left by the previous one.
//! There is no search for a minimal combined correction.

use glam::Vec2;

use super::body::Body;
use super::rect::StaticRect;
use super::tilemap::TileGrid;

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    #[inline]
    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }
}

/// Push `body` out of `rect` along `axis`
///
/// `origin` is the body's coordinate on `axis` before this axis moved; the
/// side it was on decides the push direction and the flag that gets set.
/// Touching edges are not a collision. Returns whether the body was moved.
pub fn resolve_rect(
    body: &mut Body,
    rect: &StaticRect,
    axis: Axis,
    origin: f32,
    bias: f32,
) -> bool {
    if !rect.overlaps(body.pos, body.half_extent) {
        return false;
    }

    let center = axis.of(rect.pos);
    let reach = axis.of(body.half_extent) + axis.of(rect.half_extent);
    let current = axis.of(body.pos);

    let direction = if origin != center {
        (origin - center).signum()
    } else if current != center {
        (current - center).signum()
    } else if axis.of(body.vel) > 0.0 {
        -1.0
    } else {
        1.0
    };

    axis.set(&mut body.pos, center + direction * (reach + bias));
    axis.set(&mut body.vel, 0.0);

    let positive_side = direction > 0.0;
    match axis {
        Axis::X => body.flags.set_horizontal(positive_side),
        Axis::Y => body.flags.set_vertical(positive_side),
    }

    true
}

/// Something immovable a body can be resolved against
pub trait StaticGeometry {
    /// Resolve every overlap with `body` on `axis`, in source order
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32);
}

impl StaticGeometry for StaticRect {
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32) {
        resolve_rect(body, self, axis, origin, bias);
    }
}

impl StaticGeometry for [StaticRect] {
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32) {
        for rect in self {
            resolve_rect(body, rect, axis, origin, bias);
        }
    }
}

impl StaticGeometry for Vec<StaticRect> {
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32) {
        self.as_slice().resolve_axis(body, axis, origin, bias);
    }
}

/// Another body, frozen in place for the duration of the step
impl StaticGeometry for Body {
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32) {
        let rect = StaticRect::new(self.pos, self.half_extent);
        resolve_rect(body, &rect, axis, origin, bias);
    }
}

impl TileGrid {
    /// Solid cells under the two side midpoints facing along `axis`
    ///
    /// X samples the left-mid and right-mid points, Y the bottom-mid and
    /// top-mid points. A cell hit by both samples is returned once.
    pub fn solid_cells_for(&self, body: &Body, axis: Axis) -> Vec<(i32, i32)> {
        let offsets = match axis {
            Axis::X => [
                Vec2::new(-body.half_extent.x, 0.0),
                Vec2::new(body.half_extent.x, 0.0),
            ],
            Axis::Y => [
                Vec2::new(0.0, -body.half_extent.y),
                Vec2::new(0.0, body.half_extent.y),
            ],
        };

        let mut cells = Vec::with_capacity(2);
        for offset in offsets {
            let (cx, cy) = self.world_to_cell(body.pos + offset);
            if self.is_solid(cx, cy) && !cells.contains(&(cx, cy)) {
                cells.push((cx, cy));
            }
        }
        cells
    }
}

impl StaticGeometry for TileGrid {
    fn resolve_axis(&self, body: &mut Body, axis: Axis, origin: f32, bias: f32) {
        for (cx, cy) in self.solid_cells_for(body, axis) {
            resolve_rect(body, &self.cell_rect(cx, cy), axis, origin, bias);
        }
    }
}
