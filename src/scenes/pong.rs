//! Two-player pong
//!
//! Paddles are dynamic bodies stopped by the top and bottom walls. The ball
//! collides with walls and paddles through the regular resolver; the scene
//! then turns the zeroed velocity into a bounce.

use glam::Vec2;

use super::{Scene, SceneEvent};
use crate::settings::SimSettings;
use crate::sim::{Body, BodyTag, Key, SimContext, StaticGeometry, StaticRect, step_body};

/// Half the playfield size; goals lie past ±x
pub const ARENA_HALF: Vec2 = Vec2::new(1.333, 1.0);
const WALL_HALF: Vec2 = Vec2::new(1.6, 0.055);
const PADDLE_X: f32 = 1.25;
const PADDLE_HALF: Vec2 = Vec2::new(0.04, 0.2);
const PADDLE_SPEED: f32 = 0.85;
const BALL_HALF: f32 = 0.028;
const SERVE_SPEED: f32 = 0.85;
/// Horizontal speed-up per paddle hit
const PADDLE_BOOST: f32 = 1.1;
/// Keeps per-step travel well under a paddle's width
const BALL_MAX_SPEED: f32 = 3.0;

#[derive(Debug, Clone)]
pub struct Pong {
    pub left: Body,
    pub right: Body,
    pub ball: Body,
    walls: Vec<StaticRect>,
    /// (left player, right player)
    pub score: (u32, u32),
}

impl Default for Pong {
    fn default() -> Self {
        Self::new()
    }
}

impl Pong {
    pub fn new() -> Self {
        let walls = vec![
            StaticRect::new(Vec2::new(0.0, ARENA_HALF.y), WALL_HALF),
            StaticRect::new(Vec2::new(0.0, -ARENA_HALF.y), WALL_HALF),
        ];
        Self {
            left: Body::new(BodyTag::Paddle, Vec2::new(-PADDLE_X, 0.0), PADDLE_HALF),
            right: Body::new(BodyTag::Paddle, Vec2::new(PADDLE_X, 0.0), PADDLE_HALF),
            ball: Body::new(BodyTag::Ball, Vec2::ZERO, Vec2::splat(BALL_HALF))
                .with_velocity(Vec2::new(-SERVE_SPEED, 0.0)),
            walls,
            score: (0, 0),
        }
    }

    pub fn walls(&self) -> &[StaticRect] {
        &self.walls
    }

    /// Centre everything and send the ball toward `direction` (±1)
    fn serve(&mut self, direction: f32) {
        self.ball.pos = Vec2::ZERO;
        self.ball.vel = Vec2::new(direction * SERVE_SPEED, 0.0);
        for paddle in [&mut self.left, &mut self.right] {
            paddle.pos.y = 0.0;
            paddle.vel = Vec2::ZERO;
        }
    }

    /// Turn the resolver's zeroed velocity into a reflection
    fn bounce(&mut self, incoming: Vec2) {
        let flags = self.ball.flags;
        if flags.top || flags.bottom {
            self.ball.vel.y = -incoming.y;
        }
        let paddle_vel = if flags.left {
            Some(self.left.vel.y)
        } else if flags.right {
            Some(self.right.vel.y)
        } else {
            None
        };
        if let Some(paddle_vel) = paddle_vel {
            self.ball.vel.x = -incoming.x * PADDLE_BOOST;
            self.ball.vel.y = (paddle_vel * PADDLE_BOOST + incoming.y) / 2.0;
        }
        self.ball.vel = self.ball.vel.clamp_length_max(BALL_MAX_SPEED);
    }
}

impl Scene for Pong {
    fn name(&self) -> &'static str {
        "pong"
    }

    fn preferred_settings(&self) -> SimSettings {
        SimSettings::new()
            .with_gravity(0.0)
            .with_friction(Vec2::ZERO)
    }

    fn step(&mut self, ctx: &SimContext) -> Vec<SceneEvent> {
        let settings = &ctx.settings;
        let mut events = Vec::new();

        self.left.vel.y = ctx.input.axis(Key::S, Key::W) * PADDLE_SPEED;
        self.right.vel.y = ctx.input.axis(Key::Down, Key::Up) * PADDLE_SPEED;
        step_body(&mut self.left, &[&self.walls], settings);
        step_body(&mut self.right, &[&self.walls], settings);

        let incoming = self.ball.vel;
        let geometry: [&dyn StaticGeometry; 3] = [&self.walls, &self.left, &self.right];
        step_body(&mut self.ball, &geometry, settings);
        if self.ball.flags.any() {
            self.bounce(incoming);
        }

        let scorer = if self.ball.max().x < -ARENA_HALF.x {
            Some(2)
        } else if self.ball.min().x > ARENA_HALF.x {
            Some(1)
        } else {
            None
        };
        if let Some(player) = scorer {
            if player == 1 {
                self.score.0 += 1;
            } else {
                self.score.1 += 1;
            }
            log::info!(
                "Player {} scores ({} - {})",
                player,
                self.score.0,
                self.score.1
            );
            events.push(SceneEvent::Scored {
                player,
                left: self.score.0,
                right: self.score.1,
            });
            // Serve toward whoever just lost the point
            self.serve(if player == 1 { 1.0 } else { -1.0 });
        }

        events
    }

    fn bodies(&self) -> Vec<&Body> {
        vec![&self.left, &self.right, &self.ball]
    }
}
