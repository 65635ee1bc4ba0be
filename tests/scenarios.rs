use glam::Vec2;
use tilestep::settings::SimSettings;
use tilestep::sim::{Body, BodyTag, CollisionFlags, FixedClock, StaticRect, TileGrid, step_body};

fn falling_settings() -> SimSettings {
    SimSettings::new().with_gravity(-2.0)
}

#[test]
fn drop_onto_slab_comes_to_rest() {
    let settings = falling_settings();
    let slab = vec![StaticRect::new(Vec2::new(0.0, -10.5), Vec2::new(3.2, 10.0))];
    let mut body = Body::new(BodyTag::Player, Vec2::new(0.0, 1.0), Vec2::splat(0.05));

    let mut landed_at = None;
    for step in 0..300 {
        step_body(&mut body, &[&slab], &settings);
        if body.flags.bottom {
            landed_at = Some(step);
            break;
        }
        assert_eq!(body.flags, CollisionFlags::default());
    }

    let landed_at = landed_at.expect("body never landed");
    // About 1.2 s of free fall at 60 Hz
    assert!((60..90).contains(&landed_at), "landed at step {landed_at}");
    assert_eq!(body.vel.y, 0.0);
    assert!((body.min().y - slab[0].top()).abs() < 1e-3);
}

#[test]
fn resting_body_stays_put() {
    let settings = falling_settings();
    let floor = vec![StaticRect::new(Vec2::new(0.0, -10.5), Vec2::new(3.2, 10.0))];
    let rest_y = floor[0].top() + 0.05 + settings.collision_bias;
    let mut body = Body::new(BodyTag::Player, Vec2::new(0.0, rest_y), Vec2::splat(0.05));

    for _ in 0..600 {
        step_body(&mut body, &[&floor], &settings);
        assert!(body.flags.bottom);
        assert!((body.pos.x - 0.0).abs() < 1e-6);
        assert!((body.pos.y - rest_y).abs() < 1e-4);
    }
}

#[test]
fn grid_and_list_paths_agree() {
    let settings = SimSettings::new().with_gravity(-7.0);
    let grid = TileGrid::from_rows(
        vec![vec![0, 0, 0, 0], vec![0, 0, 0, 0], vec![0, 0, 5, 0]],
        0.5,
        [5],
    )
    .unwrap();
    let list: Vec<StaticRect> = grid.solid_rects().collect();
    assert_eq!(list.len(), 1);

    let start = Body::new(BodyTag::Player, Vec2::new(1.1, -0.3), Vec2::splat(0.2))
        .with_velocity(Vec2::new(0.4, 0.0));
    let mut on_grid = start.clone();
    let mut on_list = start;

    for _ in 0..180 {
        step_body(&mut on_grid, &[&grid], &settings);
        step_body(&mut on_list, &[&list], &settings);
        assert_eq!(on_grid.pos, on_list.pos);
        assert_eq!(on_grid.vel, on_list.vel);
        assert_eq!(on_grid.flags, on_list.flags);
    }
    assert!(on_grid.flags.bottom);
}

#[test]
fn clock_drives_steps() {
    let settings = falling_settings();
    let mut clock = FixedClock::new(0.015625, 8);
    let mut body = Body::new(BodyTag::Player, Vec2::ZERO, Vec2::splat(0.05));

    let mut steps = 0;
    let mut now = 0.0_f64;
    clock.tick(now);
    // Alternate short and long frames; each pair spans three steps
    for frame in 0..40 {
        now += if frame % 2 == 0 { 0.0078125 } else { 0.0390625 };
        for _ in 0..clock.tick(now) {
            step_body(&mut body, &[], &settings);
            steps += 1;
        }
    }
    assert_eq!(steps, 60);
    assert_eq!(clock.accumulator(), 0.0);
    assert!(body.vel.y < 0.0);
}
