use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use word_defence_core::{CellCoord, Event, SessionConfig};
use word_defence_engine::Engine;

const TEXT: &str = "the quick brown fox jumps over the lazy dog";

#[test]
fn same_seed_replays_identically() {
    let first = replay(0x5eed_1234);
    let second = replay(0x5eed_1234);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(first.complete, "scripted session must finish");
    assert_eq!(first.words_delivered, 9);
}

#[test]
fn different_seeds_generate_different_layouts() {
    let first = Engine::new(seeded(1)).expect("valid config").snapshot();
    let second = Engine::new(seeded(2)).expect("valid config").snapshot();

    assert_ne!(first.routes, second.routes);
}

fn seeded(seed: u64) -> SessionConfig {
    SessionConfig {
        seed: Some(seed),
        ..SessionConfig::default()
    }
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut engine = Engine::new(seeded(seed)).expect("valid config");
    let mut log = Vec::new();

    engine.load_input(TEXT);
    engine.start();

    for tick in 0..4_000_u32 {
        if tick % 50 == 0 {
            place_first_free_tower(&mut engine);
        }
        let dt = Duration::from_millis(u64::from(16 + tick % 7));
        engine.tick(dt);
        log.extend(engine.take_events().iter().map(EventRecord::from));
        if engine.summary().complete {
            break;
        }
    }

    let summary = engine.summary();
    ReplayOutcome {
        output: engine.finalize_output(),
        score: summary.score,
        balance: summary.balance,
        complete: summary.complete,
        words_delivered: summary.delivered,
        occupied: engine.snapshot().occupied,
        events: log,
    }
}

fn place_first_free_tower(engine: &mut Engine) {
    let layout = engine.snapshot().layout;
    for row in 0..layout.rows() {
        for column in 0..layout.columns() {
            if engine.can_place_tower(CellCoord::new(column, row)).is_ok() {
                engine.place_tower(column, row);
                return;
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    output: String,
    score: u64,
    balance: u32,
    complete: bool,
    words_delivered: usize,
    occupied: Vec<CellCoord>,
    events: Vec<EventRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum EventRecord {
    Spawned { kind: &'static str, id: u32 },
    Delivered { index: usize },
    Corrupted { index: usize },
    Destroyed { id: u32 },
    TowerPlaced { id: u32, cell: CellCoord },
    Completed { delivered: usize, corrupted: usize },
    Other,
}

impl From<&Event> for EventRecord {
    fn from(event: &Event) -> Self {
        match event {
            Event::DataUnitSpawned { unit, .. } => Self::Spawned {
                kind: "data",
                id: unit.get(),
            },
            Event::HostileSpawned { hostile, .. } => Self::Spawned {
                kind: "hostile",
                id: hostile.get(),
            },
            Event::DataDelivered { index, .. } => Self::Delivered { index: *index },
            Event::DataCorrupted { index, .. } => Self::Corrupted { index: *index },
            Event::HostileDestroyed { hostile } => Self::Destroyed { id: hostile.get() },
            Event::TowerPlaced { tower, cell } => Self::TowerPlaced {
                id: tower.get(),
                cell: *cell,
            },
            Event::SessionCompleted {
                delivered,
                corrupted,
            } => Self::Completed {
                delivered: *delivered,
                corrupted: *corrupted,
            },
            _ => Self::Other,
        }
    }
}
