use std::time::Duration;

use word_defence_core::{Command, Event, SessionConfig};
use word_defence_system_spawning::{Config, SpawnInputs, Spawning};
use word_defence_world::{self as world, query, World};

fn tick(dt_ms: u64) -> [Event; 1] {
    [Event::TimeAdvanced {
        dt: Duration::from_millis(dt_ms),
    }]
}

fn spawning() -> Spawning {
    Spawning::new(Config::new(
        Duration::from_millis(1_500),
        Duration::from_millis(2_000),
        0x1234_5678,
    ))
}

fn queued(words: usize) -> SpawnInputs {
    SpawnInputs {
        pending_words: words,
        active_data_units: 0,
    }
}

#[test]
fn first_running_tick_spawns_both_kinds() {
    let mut spawning = spawning();
    let mut commands = Vec::new();

    spawning.handle(&tick(16), queued(3), &mut commands);

    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0], Command::SpawnDataUnit);
    assert!(matches!(
        commands[1],
        Command::SpawnHostile { route } if !route.is_delivery()
    ));
}

#[test]
fn delivery_spawns_follow_the_interval() {
    let mut spawning = spawning();
    let mut spawned_at = Vec::new();

    for step in 0..13_u64 {
        let mut commands = Vec::new();
        spawning.handle(&tick(250), queued(10), &mut commands);
        if commands.contains(&Command::SpawnDataUnit) {
            spawned_at.push(step * 250);
        }
    }

    assert_eq!(spawned_at, vec![0, 1_500, 3_000]);
}

#[test]
fn long_stall_spawns_once_per_kind() {
    let mut spawning = spawning();
    let mut commands = Vec::new();

    spawning.handle(&tick(60_000), queued(10), &mut commands);

    assert_eq!(commands.len(), 2);
}

#[test]
fn nothing_spawns_without_elapsed_time() {
    let mut spawning = spawning();
    let mut commands = Vec::new();

    spawning.handle(&[Event::Started], queued(3), &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn hostiles_stop_once_no_data_remains() {
    let mut spawning = spawning();
    let mut commands = Vec::new();

    spawning.handle(&tick(16), SpawnInputs::default(), &mut commands);
    assert!(commands.is_empty());

    spawning.handle(
        &tick(16),
        SpawnInputs {
            pending_words: 0,
            active_data_units: 1,
        },
        &mut commands,
    );
    assert_eq!(commands.len(), 1);
    assert!(matches!(commands[0], Command::SpawnHostile { .. }));
}

#[test]
fn reset_expires_the_countdowns() {
    let mut spawning = spawning();
    let mut commands = Vec::new();
    spawning.handle(&tick(16), queued(1), &mut commands);
    commands.clear();

    spawning.reset();
    spawning.handle(&tick(16), queued(1), &mut commands);

    assert_eq!(commands.len(), 2);
}

#[test]
fn same_seed_selects_the_same_routes() {
    let routes = |seed: u64| {
        let mut spawning = Spawning::new(Config::new(Duration::ZERO, Duration::ZERO, seed));
        let mut commands = Vec::new();
        for _ in 0..32 {
            spawning.handle(&tick(1), queued(1), &mut commands);
        }
        commands
    };

    assert_eq!(routes(99), routes(99));
}

#[test]
fn emitted_commands_drive_the_world() {
    let mut world = World::new(SessionConfig::default(), 5);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::LoadInput {
            text: "first second".to_owned(),
        },
        &mut events,
    );

    let mut spawning = spawning();
    let mut commands = Vec::new();
    spawning.handle(
        &tick(16),
        SpawnInputs {
            pending_words: query::pending_words(&world),
            active_data_units: query::active_data_units(&world),
        },
        &mut commands,
    );
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }

    assert_eq!(query::pending_words(&world), 1);
    assert_eq!(query::data_unit_view(&world).len(), 1);
    assert_eq!(query::hostile_view(&world).len(), 1);
}
