use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use word_defence_core::{CellCoord, GridLayout, PathConfig, RouteIndex};
use word_defence_system_path_generation::{generate_route, generate_routes, walk};

#[test]
fn routes_start_on_their_boundary_and_end_at_the_hub() {
    let layout = GridLayout::new(20, 15);
    let tuning = PathConfig::default();

    for seed in 0..64 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let routes = generate_routes(layout, &tuning, &mut rng);

        for (route, index) in routes.iter().zip(RouteIndex::ALL) {
            assert_eq!(route.index(), index);
            assert_eq!(route.start(), Some(layout.route_origin(index)));
            if route.reached_hub() {
                assert_eq!(route.end(), Some(layout.hub()), "seed {seed}");
            } else {
                panic!("seed {seed}: route {} hit the watchdog", index.get());
            }
        }
    }
}

#[test]
fn consecutive_points_are_adjacent_and_inside_the_grid() {
    let layout = GridLayout::new(12, 9);
    let tuning = PathConfig {
        goal_bias: 0.5,
        ..PathConfig::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);

    for route in generate_routes(layout, &tuning, &mut rng) {
        for pair in route.points().windows(2) {
            assert_eq!(pair[0].manhattan_distance(pair[1]), 1);
        }
        assert!(route.points().iter().all(|cell| layout.contains(*cell)));
    }
}

#[test]
fn full_bias_walks_a_shortest_path() {
    let layout = GridLayout::new(20, 15);
    let origin = CellCoord::new(0, 2);
    let goal = layout.hub();
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    let walk = walk(layout, origin, goal, 1.0, 1_000, &mut rng);

    assert!(walk.reached_goal);
    let shortest = origin.manhattan_distance(goal) as usize + 1;
    assert_eq!(walk.points.len(), shortest);
}

#[test]
fn exhausted_budget_is_flagged_and_keeps_the_partial_route() {
    let layout = GridLayout::new(20, 15);
    let tuning = PathConfig {
        goal_bias: 1.0,
        step_budget: 3,
        attempts: 2,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let route = generate_route(layout, RouteIndex::DELIVERY, &tuning, &mut rng);

    assert!(!route.reached_hub(), "watchdog must flag the truncated route");
    assert_eq!(route.start(), Some(CellCoord::new(0, 7)));
    assert_eq!(route.end(), Some(CellCoord::new(3, 7)));
    assert_eq!(route.points().len(), 4);
}

#[test]
fn pure_wiggle_never_reaches_a_distant_goal() {
    let layout = GridLayout::new(20, 15);
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    let walk = walk(
        layout,
        CellCoord::new(0, 7),
        layout.hub(),
        0.0,
        50,
        &mut rng,
    );

    assert!(!walk.reached_goal);
    assert!(walk.points.iter().all(|cell| cell.column() == 0));
}

#[test]
fn same_seed_yields_identical_routes() {
    let layout = GridLayout::new(20, 15);
    let tuning = PathConfig::default();

    let first = generate_routes(layout, &tuning, &mut ChaCha8Rng::seed_from_u64(21));
    let second = generate_routes(layout, &tuning, &mut ChaCha8Rng::seed_from_u64(21));

    assert_eq!(first, second);
}
