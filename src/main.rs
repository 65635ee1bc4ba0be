//! Tilestep entry point
//!
//! Runs one of the scenes headlessly: frame times with render-like jitter
//! feed a fixed-step clock, scripted input drives the player, and scene
//! events are logged as they happen.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use tilestep::LevelDescription;
use tilestep::scenes::{Platformer, Pong, Runner, Scene, SceneEvent};
use tilestep::sim::{FixedClock, Key, SimContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    Pong,
    Platformer,
    Runner,
}

#[derive(Parser)]
#[command(name = "tilestep")]
#[command(about = "Run a fixed-timestep arcade scene headlessly", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene to run
    #[arg(value_enum)]
    scene: SceneKind,

    /// Simulated wall-clock seconds
    #[arg(long, default_value_t = 10.0)]
    seconds: f64,

    /// JSON settings overriding the scene's defaults
    #[arg(long)]
    settings: Option<String>,

    /// JSON level for the platformer
    #[arg(long)]
    level: Option<String>,

    /// Seed for frame jitter and runner obstacles
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

/// Scene plus the scripted player driving it
enum Game {
    Pong(Pong),
    Platformer(Platformer),
    Runner(Runner),
}

impl Game {
    fn scene(&mut self) -> &mut dyn Scene {
        match self {
            Game::Pong(scene) => scene,
            Game::Platformer(scene) => scene,
            Game::Runner(scene) => scene,
        }
    }

    /// Decide which keys are held for the next batch of steps
    fn script_input(&self, ctx: &mut SimContext) {
        match self {
            Game::Pong(pong) => {
                // Both paddles chase the ball
                let ball_y = pong.ball.pos.y;
                ctx.input.set(Key::W, ball_y > pong.left.pos.y + 0.05);
                ctx.input.set(Key::S, ball_y < pong.left.pos.y - 0.05);
                ctx.input.set(Key::Up, ball_y > pong.right.pos.y + 0.05);
                ctx.input.set(Key::Down, ball_y < pong.right.pos.y - 0.05);
            }
            Game::Platformer(platformer) => {
                ctx.input.press(Key::Right);
                // Hop every two seconds
                let hop = (ctx.step / 120) % 2 == 1 && platformer.player.grounded();
                ctx.input.set(Key::Up, hop);
            }
            Game::Runner(runner) => runner.autopilot(&mut ctx.input),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut game = match cli.scene {
        SceneKind::Pong => Game::Pong(Pong::new()),
        SceneKind::Platformer => {
            let platformer = match &cli.level {
                Some(path) => {
                    let level = LevelDescription::load(path)
                        .with_context(|| format!("loading level {path}"))?;
                    Platformer::new(&level)?
                }
                None => Platformer::demo()?,
            };
            Game::Platformer(platformer)
        }
        SceneKind::Runner => Game::Runner(Runner::new(cli.seed)),
    };

    let preferred = game.scene().preferred_settings();
    let settings = match &cli.settings {
        Some(path) => preferred
            .load_over(path)
            .with_context(|| format!("loading settings {path}"))?,
        None => preferred,
    };
    settings.validate()?;

    let mut ctx = SimContext::new(settings);
    let mut clock = FixedClock::from_settings(&ctx.settings);
    let mut jitter = Pcg32::seed_from_u64(cli.seed);

    log::info!(
        "Running {} for {:.1}s at {:.0} Hz",
        game.scene().name(),
        cli.seconds,
        1.0 / ctx.settings.fixed_dt
    );

    let mut now = 0.0_f64;
    let mut frames = 0_u64;
    let mut events = Vec::new();
    clock.tick(now);
    while now < cli.seconds {
        // Frame times between 144 Hz and 30 Hz
        now += jitter.random_range(1.0 / 144.0..1.0 / 30.0);
        frames += 1;

        game.script_input(&mut ctx);
        let steps = clock.tick(now);
        for _ in 0..steps {
            let step_events = game.scene().step(&ctx);
            ctx.step += 1;
            for event in &step_events {
                log::debug!("step {}: {:?}", ctx.step, event);
            }
            events.extend(step_events);
        }
    }

    let scene = game.scene();
    for (i, body) in scene.bodies().iter().enumerate() {
        log::info!(
            "body {} {:?}: pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) flags={:?}",
            i,
            body.tag,
            body.pos.x,
            body.pos.y,
            body.vel.x,
            body.vel.y,
            body.flags
        );
    }
    println!(
        "{}: {} frames, {} steps, {} events",
        scene.name(),
        frames,
        ctx.step,
        events.len()
    );
    if let Some(last) = events.last() {
        println!("last event: {}", describe(last));
    }
    Ok(())
}

fn describe(event: &SceneEvent) -> String {
    match event {
        SceneEvent::Scored {
            player,
            left,
            right,
        } => format!("player {player} scored ({left} - {right})"),
        SceneEvent::KeyCollected => "key collected".to_string(),
        SceneEvent::LevelComplete => "level complete".to_string(),
        SceneEvent::Fell => "fell out of the level".to_string(),
        SceneEvent::Crashed { distance } => format!("crashed after {distance:.2} units"),
    }
}
