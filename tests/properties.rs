use glam::Vec2;
use proptest::prelude::*;
use tilestep::settings::SimSettings;
use tilestep::sim::{Body, BodyTag, StaticRect, TileGrid, step_body};

fn rect_strategy() -> impl Strategy<Value = StaticRect> {
    (-3.0f32..3.0, -3.0f32..3.0, 0.1f32..1.5, 0.1f32..1.5)
        .prop_map(|(x, y, hw, hh)| StaticRect::new(Vec2::new(x, y), Vec2::new(hw, hh)))
}

proptest! {
    #[test]
    fn flags_are_exclusive_per_axis(
        x in -4.0f32..4.0,
        y in -4.0f32..4.0,
        vx in -30.0f32..30.0,
        vy in -30.0f32..30.0,
        half in 0.05f32..0.8,
        rects in prop::collection::vec(rect_strategy(), 0..5),
    ) {
        let settings = SimSettings::default();
        let mut body = Body::new(BodyTag::Player, Vec2::new(x, y), Vec2::splat(half))
            .with_velocity(Vec2::new(vx, vy));
        for _ in 0..20 {
            step_body(&mut body, &[&rects], &settings);
            prop_assert!(!(body.flags.left && body.flags.right));
            prop_assert!(!(body.flags.top && body.flags.bottom));
        }
    }

    #[test]
    fn centre_never_ends_inside_block(
        x in -4.0f32..4.0,
        y in -4.0f32..4.0,
        vx in -55.0f32..55.0,
        vy in -55.0f32..55.0,
        half_x in 0.05f32..0.5,
        half_y in 0.05f32..0.5,
    ) {
        // Per-step travel stays under the block's 2.0 edge length
        let settings = SimSettings::default();
        let block = vec![StaticRect::new(Vec2::ZERO, Vec2::splat(1.0))];
        let half = Vec2::new(half_x, half_y);
        prop_assume!(!block[0].overlaps(Vec2::new(x, y), half));

        let mut body = Body::new(BodyTag::Player, Vec2::new(x, y), half)
            .with_velocity(Vec2::new(vx, vy));
        for _ in 0..30 {
            step_body(&mut body, &[&block], &settings);
            prop_assert!(!block[0].contains_point(body.pos), "ended at {}", body.pos);
        }
    }

    #[test]
    fn grid_cell_matches_equivalent_rect(
        offset in 0.01f32..0.49,
        lift in 0.01f32..1.0,
        vy in -3.0f32..0.0,
        half in 0.02f32..0.2,
    ) {
        let settings = SimSettings::default();
        let grid = TileGrid::from_rows(
            vec![vec![0, 0, 0], vec![0, 0, 0], vec![0, 9, 0]],
            0.5,
            [9],
        ).unwrap();
        let cell = grid.cell_rect(1, 2);
        let list = vec![cell];

        let start = Body::new(
            BodyTag::Player,
            Vec2::new(cell.min().x + offset, cell.top() + half + lift),
            Vec2::splat(half),
        ).with_velocity(Vec2::new(0.0, vy));
        let mut on_grid = start.clone();
        let mut on_list = start;

        for _ in 0..120 {
            step_body(&mut on_grid, &[&grid], &settings);
            step_body(&mut on_list, &[&list], &settings);
            prop_assert_eq!(on_grid.pos, on_list.pos);
            prop_assert_eq!(on_grid.vel, on_list.vel);
            prop_assert_eq!(on_grid.flags, on_list.flags);
        }
        prop_assert!(on_list.flags.bottom);
    }

    #[test]
    fn grid_walls_match_equivalent_rects(
        x in 0.0f32..1.0,
        y in 0.0f32..1.0,
        vx in -20.0f32..20.0,
        half_x in 0.02f32..0.25,
        half_y in 0.02f32..0.25,
    ) {
        // Solid columns at both sides of a 6x6 grid of 0.5 tiles
        let settings = SimSettings::new()
            .with_gravity(0.0)
            .with_friction(Vec2::ZERO);
        let rows = vec![vec![1, 0, 0, 0, 0, 1]; 6];
        let grid = TileGrid::from_rows(rows, 0.5, [1]).unwrap();
        let list: Vec<StaticRect> = grid.solid_rects().collect();

        // Start clear of both walls and inside the rows they cover
        let lo = Vec2::new(0.5 + half_x + 0.01, -3.0 + half_y + 0.01);
        let hi = Vec2::new(2.5 - half_x - 0.01, -half_y - 0.01);
        let pos = lo + (hi - lo) * Vec2::new(x, y);
        let start = Body::new(BodyTag::Player, pos, Vec2::new(half_x, half_y))
            .with_velocity(Vec2::new(vx, 0.0));
        let mut on_grid = start.clone();
        let mut on_list = start;

        for _ in 0..60 {
            step_body(&mut on_grid, &[&grid], &settings);
            step_body(&mut on_list, &[&list], &settings);
            prop_assert_eq!(on_grid.pos, on_list.pos);
            prop_assert_eq!(on_grid.vel, on_list.vel);
            prop_assert_eq!(on_grid.flags, on_list.flags);
        }
        if vx.abs() > 2.0 {
            // Reached a wall and stopped against it
            prop_assert_eq!(on_list.vel.x, 0.0);
            let gap = (on_list.min().x - 0.5).min(2.5 - on_list.max().x);
            prop_assert!(gap > 0.0 && gap < 1e-3, "gap {}", gap);
        }
    }
}
