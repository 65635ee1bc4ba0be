//! Deterministic simulation module
//!
//! The physics core shared by every scene. It must stay pure and
//! deterministic:
//! - Fixed timestep only
//! - Single-threaded, no I/O on the step path
//! - Stable iteration order (source order for geometry)
//! - No rendering or platform dependencies

pub mod body;
pub mod clock;
pub mod collision;
pub mod input;
pub mod integrate;
pub mod rect;
pub mod tilemap;

pub use body::{Body, BodyKind, BodyTag, CollisionFlags, aabb_overlap, clear_flags};
pub use clock::FixedClock;
pub use collision::{Axis, StaticGeometry, resolve_rect};
pub use input::{InputState, Key, SimContext};
pub use integrate::{integrate, step_body};
pub use rect::StaticRect;
pub use tilemap::{GridError, TileGrid, parse_csv_rows};
