//! Per-game scenes
//!
//! A scene owns its bodies and static geometry. Once per fixed step it
//! applies input, runs `step_body` on each dynamic body and then checks its
//! own win/lose rules against the updated positions and collision flags.

pub mod platformer;
pub mod pong;
pub mod runner;

pub use platformer::Platformer;
pub use pong::Pong;
pub use runner::Runner;

use serde::{Deserialize, Serialize};

use crate::settings::SimSettings;
use crate::sim::{Body, SimContext};

/// Something a scene reports after a step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    /// Pong: `player` (1 or 2) scored
    Scored { player: u8, left: u32, right: u32 },
    /// Platformer: the key pickup was touched
    KeyCollected,
    /// Platformer: reached the exit holding the key
    LevelComplete,
    /// Platformer: dropped out of the level and respawned
    Fell,
    /// Runner: hit the side of an obstacle
    Crashed { distance: f32 },
}

/// Game-specific orchestration around the physics core
pub trait Scene {
    fn name(&self) -> &'static str;

    /// Tuning this game expects (pong turns gravity off, for example)
    fn preferred_settings(&self) -> SimSettings {
        SimSettings::default()
    }

    /// Advance one fixed step
    fn step(&mut self, ctx: &SimContext) -> Vec<SceneEvent>;

    /// Read access for rendering and game logic
    fn bodies(&self) -> Vec<&Body>;
}
