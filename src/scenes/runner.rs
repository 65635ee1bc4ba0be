//! Side-scrolling runner
//!
//! The player runs right at a constant speed over an endless floor. Obstacles
//! are spawned ahead at seeded-random gaps and dropped once they scroll out
//! behind. Jumping onto an obstacle is fine; running into its side ends the
//! run.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{Scene, SceneEvent};
use crate::settings::SimSettings;
use crate::sim::{
    Body, BodyTag, InputState, Key, SimContext, StaticGeometry, StaticRect, step_body,
};

const PLAYER_HALF: Vec2 = Vec2::new(0.08, 0.12);
const RUN_SPEED: f32 = 1.2;
const JUMP_SPEED: f32 = 2.6;
const GROUND_TOP: f32 = -0.6;
const GROUND_HALF: Vec2 = Vec2::new(3.0, 0.2);
const FIRST_OBSTACLE: f32 = 1.5;
const MIN_GAP: f32 = 1.4;
const MAX_GAP: f32 = 2.6;
const SPAWN_AHEAD: f32 = 3.0;
const CULL_BEHIND: f32 = 2.0;
/// Autopilot takes off this far before an obstacle
const JUMP_LEAD: f32 = 0.3;

#[derive(Debug, Clone)]
pub struct Runner {
    pub player: Body,
    /// Live obstacles ordered by x
    pub obstacles: Vec<StaticRect>,
    ground: StaticRect,
    rng: Pcg32,
    next_spawn_x: f32,
    start_x: f32,
    crashed: bool,
}

impl Runner {
    pub fn new(seed: u64) -> Self {
        let start = Vec2::new(0.0, GROUND_TOP + PLAYER_HALF.y);
        let mut runner = Self {
            player: Body::new(BodyTag::Player, start, PLAYER_HALF),
            obstacles: Vec::new(),
            ground: StaticRect::new(Vec2::new(0.0, GROUND_TOP - GROUND_HALF.y), GROUND_HALF),
            rng: Pcg32::seed_from_u64(seed),
            next_spawn_x: FIRST_OBSTACLE,
            start_x: start.x,
            crashed: false,
        };
        runner.spawn_ahead();
        runner
    }

    /// Distance run so far
    pub fn distance(&self) -> f32 {
        self.player.pos.x - self.start_x
    }

    pub fn crashed(&self) -> bool {
        self.crashed
    }

    /// Nearest obstacle not yet passed
    pub fn next_obstacle(&self) -> Option<&StaticRect> {
        let back = self.player.min().x;
        self.obstacles.iter().find(|o| o.max().x > back)
    }

    /// Simple jump timing, used by the demo binary
    pub fn autopilot(&self, input: &mut InputState) {
        let jump = self.player.grounded()
            && self
                .next_obstacle()
                .is_some_and(|o| o.min().x - self.player.max().x < JUMP_LEAD);
        input.set(Key::Up, jump);
    }

    fn spawn_ahead(&mut self) {
        while self.next_spawn_x < self.player.pos.x + SPAWN_AHEAD {
            let half = Vec2::new(
                self.rng.random_range(0.05..0.08),
                self.rng.random_range(0.06..0.14),
            );
            let pos = Vec2::new(self.next_spawn_x + half.x, GROUND_TOP + half.y);
            self.obstacles.push(StaticRect::new(pos, half));
            self.next_spawn_x += self.rng.random_range(MIN_GAP..MAX_GAP);
        }
        let cull_x = self.player.pos.x - CULL_BEHIND;
        self.obstacles.retain(|o| o.max().x >= cull_x);
    }
}

impl Scene for Runner {
    fn name(&self) -> &'static str {
        "runner"
    }

    fn preferred_settings(&self) -> SimSettings {
        SimSettings::new().with_friction(Vec2::ZERO)
    }

    fn step(&mut self, ctx: &SimContext) -> Vec<SceneEvent> {
        if self.crashed {
            return Vec::new();
        }

        self.player.vel.x = RUN_SPEED;
        let wants_jump = ctx.input.is_held(Key::Up) || ctx.input.is_held(Key::Space);
        if wants_jump && self.player.grounded() {
            self.player.vel.y = JUMP_SPEED;
        }

        // The floor follows the player so it never runs out
        self.ground.pos.x = self.player.pos.x;
        let geometry: [&dyn StaticGeometry; 2] = [&self.ground, &self.obstacles];
        step_body(&mut self.player, &geometry, &ctx.settings);

        if self.player.flags.right {
            self.crashed = true;
            let distance = self.distance();
            log::info!("Runner crashed after {distance:.2} units");
            return vec![SceneEvent::Crashed { distance }];
        }

        self.spawn_ahead();
        Vec::new()
    }

    fn bodies(&self) -> Vec<&Body> {
        vec![&self.player]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(runner: &Runner) -> SimContext {
        SimContext::new(runner.preferred_settings())
    }

    #[test]
    fn test_idle_runner_crashes_into_first_obstacle() {
        let mut runner = Runner::new(7);
        let ctx = ctx(&runner);
        let mut crash = None;
        for _ in 0..600 {
            if let Some(event) = runner.step(&ctx).into_iter().next() {
                crash = Some(event);
                break;
            }
        }
        let Some(SceneEvent::Crashed { distance }) = crash else {
            panic!("expected a crash, got {crash:?}");
        };
        assert!(distance > FIRST_OBSTACLE - 0.2 && distance < FIRST_OBSTACLE);
        assert!(runner.crashed());

        let pos = runner.player.pos;
        assert!(runner.step(&ctx).is_empty());
        assert_eq!(runner.player.pos, pos);
    }

    #[test]
    fn test_same_seed_same_course() {
        let mut a = Runner::new(42);
        let mut b = Runner::new(42);
        let ctx = ctx(&a);
        for _ in 0..50 {
            a.step(&ctx);
            b.step(&ctx);
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.player.pos, b.player.pos);
    }

    #[test]
    fn test_obstacles_rest_on_ground() {
        let runner = Runner::new(3);
        assert!(!runner.obstacles.is_empty());
        for obstacle in &runner.obstacles {
            assert!((obstacle.bottom() - GROUND_TOP).abs() < 1e-5);
        }
    }

    #[test]
    fn test_autopilot_clears_course() {
        let mut runner = Runner::new(11);
        let mut ctx = ctx(&runner);
        for _ in 0..1200 {
            runner.autopilot(&mut ctx.input);
            let events = runner.step(&ctx);
            assert!(events.is_empty(), "crashed: {events:?}");
        }
        assert!(runner.distance() > 20.0);
        // Obstacles far behind are culled
        let cull_x = runner.player.pos.x - CULL_BEHIND;
        assert!(runner.obstacles.iter().all(|o| o.max().x >= cull_x));
    }
}
