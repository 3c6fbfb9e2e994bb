use std::time::Duration;

use word_defence_core::{
    CellPoint, Command, DataUnitId, DataUnitSnapshot, DataUnitView, Event, HostileId,
    HostileSnapshot, HostileView, RouteIndex, SessionConfig,
};
use word_defence_system_movement::Movement;
use word_defence_world::{self as world, query, World};

fn data_unit(id: u32, progress: f32, speed: f32) -> DataUnitSnapshot {
    DataUnitSnapshot {
        id: DataUnitId::new(id),
        word: format!("word{id}"),
        progress,
        position: CellPoint::new(progress, 0.0),
        hit_points: 100,
        max_hit_points: 100,
        speed,
    }
}

fn hostile(id: u32, progress: f32, speed: f32) -> HostileSnapshot {
    HostileSnapshot {
        id: HostileId::new(id),
        route: RouteIndex::HOSTILE[0],
        progress,
        position: CellPoint::new(0.0, progress),
        hit_points: 60,
        max_hit_points: 60,
        speed,
        damage: 10,
    }
}

fn advanced(ms: u64) -> Vec<Event> {
    vec![Event::TimeAdvanced {
        dt: Duration::from_millis(ms),
    }]
}

#[test]
fn progress_scales_with_speed_and_elapsed_time() {
    let data = DataUnitView::from_snapshots(vec![data_unit(0, 1.0, 1.5)]);
    let hostiles = HostileView::from_snapshots(vec![hostile(0, 0.5, 1.2)]);
    let mut commands = Vec::new();

    Movement.handle(&advanced(500), &data, &hostiles, &mut commands);

    assert_eq!(commands.len(), 2);
    match commands[0] {
        Command::AdvanceDataUnit { unit, progress } => {
            assert_eq!(unit, DataUnitId::new(0));
            assert!((progress - 1.75).abs() < 1e-5);
        }
        ref other => panic!("unexpected command: {other:?}"),
    }
    match commands[1] {
        Command::AdvanceHostile { hostile, progress } => {
            assert_eq!(hostile, HostileId::new(0));
            assert!((progress - 1.1).abs() < 1e-5);
        }
        ref other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn data_units_move_before_hostiles() {
    let data = DataUnitView::from_snapshots(vec![data_unit(4, 0.0, 1.0), data_unit(2, 0.0, 1.0)]);
    let hostiles = HostileView::from_snapshots(vec![hostile(1, 0.0, 1.0), hostile(0, 0.0, 1.0)]);
    let mut commands = Vec::new();

    Movement.handle(&advanced(100), &data, &hostiles, &mut commands);

    let order: Vec<String> = commands
        .iter()
        .map(|command| match command {
            Command::AdvanceDataUnit { unit, .. } => format!("data{}", unit.get()),
            Command::AdvanceHostile { hostile, .. } => format!("hostile{}", hostile.get()),
            other => panic!("unexpected command: {other:?}"),
        })
        .collect();
    assert_eq!(order, ["data2", "data4", "hostile0", "hostile1"]);
}

#[test]
fn idle_ticks_emit_nothing() {
    let data = DataUnitView::from_snapshots(vec![data_unit(0, 0.0, 1.0)]);
    let mut commands = Vec::new();

    Movement.handle(&[Event::Paused], &data, &HostileView::default(), &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn a_long_gap_walks_a_unit_all_the_way_to_the_hub() {
    let mut world = World::new(SessionConfig::default(), 8);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadInput {
            text: "express".to_owned(),
        },
        &mut events,
    );
    world::apply(&mut world, Command::SpawnDataUnit, &mut events);
    events.clear();

    let mut commands = Vec::new();
    Movement.handle(
        &advanced(3_600_000),
        &query::data_unit_view(&world),
        &query::hostile_view(&world),
        &mut commands,
    );
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::output_text(&world), "express");
    assert!(query::data_unit_view(&world).is_empty());
}
