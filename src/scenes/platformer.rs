//! Tile platformer
//!
//! The player runs and jumps through a tile level, picks up a key and carries
//! it to the exit. Tile collision goes through the grid's midpoint sampling.

use glam::Vec2;

use super::{Scene, SceneEvent};
use crate::level::{LevelDescription, LevelError};
use crate::sim::{Body, BodyTag, Key, SimContext, TileGrid, step_body};

/// Under half a tile on both axes so midpoint tile sampling sees every
/// cell the player touches, and short enough to walk under a platform one
/// tile above the floor.
const PLAYER_HALF: Vec2 = Vec2::new(0.045, 0.045);
const PICKUP_HALF: Vec2 = Vec2::new(0.05, 0.05);
const EXIT_HALF: Vec2 = Vec2::new(0.05, 0.1);
/// Horizontal input force
const RUN_ACCEL: f32 = 4.0;
const JUMP_SPEED: f32 = 2.5;
/// How far below the grid counts as falling out
const FALL_MARGIN: f32 = 0.5;

/// Built-in level used by the demo runner
pub const DEMO_LEVEL: &str = r#"{
    "name": "demo",
    "tile_size": 0.1,
    "solid_ids": [3, 6, 17, 33],
    "tiles": "0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n0,0,0,0,0,0,0,0,0,0,17,17,17,0,0,0\n0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\n3,3,3,3,3,3,0,0,3,3,3,3,3,3,3,3\n6,6,6,6,6,6,0,0,6,6,6,6,6,6,6,6\n",
    "spawn": [0.25, -0.55],
    "markers": { "key": [1.15, -0.52], "exit": [1.5, -0.69] }
}"#;

#[derive(Debug, Clone)]
pub struct Platformer {
    pub player: Body,
    /// Still lying in the level until collected
    pub key: Option<Body>,
    exit: Option<Body>,
    grid: TileGrid,
    spawn: Vec2,
    has_key: bool,
    completed: bool,
}

impl Platformer {
    pub fn new(level: &LevelDescription) -> Result<Self, LevelError> {
        let grid = level.grid()?;
        let spawn = level
            .spawn
            .unwrap_or_else(|| Vec2::new(grid.tile_size() * 1.5, -grid.tile_size() * 1.5));
        let key = level
            .marker("key")
            .map(|pos| Body::new(BodyTag::Pickup, pos, PICKUP_HALF).fixed());
        let exit = level
            .marker("exit")
            .map(|pos| Body::new(BodyTag::Obstacle, pos, EXIT_HALF).fixed());

        Ok(Self {
            player: Body::new(BodyTag::Player, spawn, PLAYER_HALF),
            key,
            exit,
            grid,
            spawn,
            has_key: false,
            completed: false,
        })
    }

    pub fn demo() -> Result<Self, LevelError> {
        Self::new(&LevelDescription::from_json_str(DEMO_LEVEL)?)
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn has_key(&self) -> bool {
        self.has_key
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    fn respawn(&mut self) {
        self.player = Body::new(BodyTag::Player, self.spawn, PLAYER_HALF);
    }
}

impl Scene for Platformer {
    fn name(&self) -> &'static str {
        "platformer"
    }

    fn step(&mut self, ctx: &SimContext) -> Vec<SceneEvent> {
        let mut events = Vec::new();

        self.player.accel.x = ctx.input.axis(Key::Left, Key::Right) * RUN_ACCEL;
        if ctx.input.is_held(Key::Up) && self.player.grounded() {
            self.player.vel.y = JUMP_SPEED;
        }

        step_body(&mut self.player, &[&self.grid], &ctx.settings);

        if self.key.as_ref().is_some_and(|key| self.player.overlaps(key)) {
            self.key = None;
            self.has_key = true;
            log::info!("Key collected");
            events.push(SceneEvent::KeyCollected);
        }

        if self.has_key
            && !self.completed
            && self.exit.as_ref().is_some_and(|exit| self.player.overlaps(exit))
        {
            self.completed = true;
            log::info!("Level complete after {} steps", ctx.step);
            events.push(SceneEvent::LevelComplete);
        }

        if self.player.pos.y < -self.grid.world_size().y - FALL_MARGIN {
            log::info!("Player fell out at x={:.2}, respawning", self.player.pos.x);
            self.respawn();
            events.push(SceneEvent::Fell);
        }

        events
    }

    fn bodies(&self) -> Vec<&Body> {
        let mut bodies = vec![&self.player];
        bodies.extend(self.key.as_ref());
        bodies.extend(self.exit.as_ref());
        bodies
    }
}
