//! Fixed-step integration
//!
//! Per step, for each dynamic body:
//! 1. grounded friction (only if `bottom` was set when the step began)
//! 2. gravity
//! 3. input acceleration
//! 4. move on X, resolve X
//! 5. move on Y, resolve Y
//!
//! X is fully resolved before Y moves. A diagonal approach onto a corner
//! therefore lands on top rather than being stopped by the side.

use glam::Vec2;

use super::body::{Body, BodyKind, clear_flags};
use super::collision::{Axis, StaticGeometry};
use crate::lerp;
use crate::settings::SimSettings;

/// Advance one body by `dt` and resolve it against every geometry source
///
/// Call `clear_flags` first; friction reads the flags it saved.
pub fn integrate(
    body: &mut Body,
    geometry: &[&dyn StaticGeometry],
    settings: &SimSettings,
    dt: f32,
) {
    if body.kind == BodyKind::Fixed {
        return;
    }

    if body.prev_flags.bottom {
        let t = (settings.friction * dt).clamp(Vec2::ZERO, Vec2::ONE);
        body.vel.x = lerp(body.vel.x, 0.0, t.x);
        body.vel.y = lerp(body.vel.y, 0.0, t.y);
    }
    body.vel.y += settings.gravity * dt;
    body.vel += body.accel * dt;

    let bias = settings.collision_bias;

    let origin = body.pos.x;
    body.pos.x += body.vel.x * dt;
    for source in geometry {
        source.resolve_axis(body, Axis::X, origin, bias);
    }

    let origin = body.pos.y;
    body.pos.y += body.vel.y * dt;
    for source in geometry {
        source.resolve_axis(body, Axis::Y, origin, bias);
    }
}

/// One full fixed step for a body: clear flags, then integrate
pub fn step_body(body: &mut Body, geometry: &[&dyn StaticGeometry], settings: &SimSettings) {
    clear_flags(body);
    integrate(body, geometry, settings, settings.fixed_dt);
}
