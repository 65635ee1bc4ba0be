//! Tilestep - fixed-timestep rectangle physics for small arcade games
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, bodies, collision, integration)
//! - `settings`: Data-driven physics tuning
//! - `level`: Tile level descriptions
//! - `scenes`: Per-game orchestration (pong, platformer, runner)

pub mod level;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use level::{LevelDescription, LevelError};
pub use settings::{SettingsError, SimSettings};

/// Default tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vertical gravity (world units/s²)
    pub const GRAVITY: f32 = -7.0;
    /// Grounded friction coefficient on X
    pub const FRICTION_X: f32 = 7.0;
    /// Grounded friction coefficient on Y
    pub const FRICTION_Y: f32 = 0.0;
    /// Separation bias so a resolved body does not re-trigger overlap
    pub const COLLISION_BIAS: f32 = 1e-4;

    /// Default tile edge length in world units
    pub const TILE_SIZE: f32 = 0.1;
}

/// Linear blend from `v0` to `v1`
#[inline]
pub fn lerp(v0: f32, v1: f32, t: f32) -> f32 {
    (1.0 - t) * v0 + t * v1
}
