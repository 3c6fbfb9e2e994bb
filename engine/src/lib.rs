#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Update engine and command surface for Word Defence sessions.
//!
//! [`Engine`] owns the authoritative [`World`] together with every simulation
//! system. Each call to [`Engine::tick`] runs a fixed pipeline of system
//! passes, and every pass turns into a batch of commands applied to the world
//! before the next pass reads its views:
//!
//! 1. the world checks for completion and advances tower cooldowns,
//! 2. spawning releases the next word and a hostile unit,
//! 3. movement advances data units, then hostile units,
//! 4. targeting picks a hostile for every ready tower, which then fires,
//! 5. combat moves, strikes or discards every projectile in flight,
//! 6. terminal units and resolved projectiles are swept away.
//!
//! All other entry points map to a single world command. Requests whose
//! preconditions fail are ignored; the emitted events remain available through
//! [`Engine::take_events`] until the next tick starts.

use std::{mem, time::Duration};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};
use word_defence_core::{
    CellCoord, Command, ConfigError, Event, PlacementError, Route, SessionConfig,
    SessionSnapshot, SessionSummary, TowerTarget, ROUTE_COUNT,
};
use word_defence_system_movement::Movement;
use word_defence_system_spawning::{Config as SpawningConfig, SpawnInputs, Spawning};
use word_defence_system_tower_combat::TowerCombat;
use word_defence_system_tower_targeting::TowerTargeting;
use word_defence_world::{self as world, query, World};

/// A single Word Defence session: simulation state plus the systems that advance it.
#[derive(Debug)]
pub struct Engine {
    world: World,
    spawning: Spawning,
    movement: Movement,
    targeting: TowerTargeting,
    combat: TowerCombat,
    targets: Vec<TowerTarget>,
    commands: Vec<Command>,
    journal: Vec<Event>,
}

impl Engine {
    /// Creates a paused session with freshly generated routes.
    ///
    /// Every random decision derives from `config.seed`, or from system
    /// entropy when no seed is configured.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = seed_source(&config);
        let world_seed = seeds.gen();
        let spawning_seed = seeds.gen();
        let spawning = spawning_system(&config, spawning_seed);
        Ok(Self::assemble(World::new(config, world_seed), spawning))
    }

    /// Creates a paused session that walks the provided routes instead of generating them.
    ///
    /// `routes[i]` must be the route with index `i`.
    pub fn with_routes(
        config: SessionConfig,
        routes: [Route; ROUTE_COUNT],
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut seeds = seed_source(&config);
        let world_seed = seeds.gen();
        let spawning_seed = seeds.gen();
        let spawning = spawning_system(&config, spawning_seed);
        Ok(Self::assemble(
            World::with_routes(config, routes, world_seed),
            spawning,
        ))
    }

    fn assemble(world: World, spawning: Spawning) -> Self {
        Self {
            world,
            spawning,
            movement: Movement,
            targeting: TowerTargeting::new(),
            combat: TowerCombat::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            journal: Vec::new(),
        }
    }

    /// Replaces the pending word queue with the whitespace-separated words of `text`.
    ///
    /// Non-empty input also clears the previous results and restarts the
    /// spawn countdowns. Input without words only empties the queue.
    pub fn load_input(&mut self, text: &str) {
        self.submit(Command::LoadInput {
            text: text.to_owned(),
        });
        if query::pending_words(&self.world) > 0 {
            self.spawning.reset();
        }
    }

    /// Clears the pause flag. Ignored once the session completed.
    pub fn start(&mut self) {
        self.submit(Command::Start);
    }

    /// Sets the pause flag. Idempotent.
    pub fn pause(&mut self) {
        self.submit(Command::Pause);
    }

    /// Places a tower on the cell if the placement rules and the balance allow it.
    ///
    /// Rejected requests leave the session untouched.
    pub fn place_tower(&mut self, column: u32, row: u32) {
        self.submit(Command::PlaceTower {
            cell: CellCoord::new(column, row),
        });
    }

    /// Reports whether [`Engine::place_tower`] would succeed on the cell right now.
    pub fn can_place_tower(&self, cell: CellCoord) -> Result<(), PlacementError> {
        query::placement_check(&self.world, cell)
    }

    /// Advances the simulation by `elapsed`.
    ///
    /// Does nothing while paused. A tick that finds every word resolved marks
    /// the session complete, pauses it, and skips every later step.
    ///
    /// Events not taken before the call are dropped, paused or not.
    pub fn tick(&mut self, elapsed: Duration) {
        self.journal.clear();
        if query::is_paused(&self.world) {
            return;
        }

        let mut tick_events = Vec::new();
        world::apply(
            &mut self.world,
            Command::Tick { dt: elapsed },
            &mut tick_events,
        );
        self.journal.extend(tick_events.iter().cloned());
        if query::is_paused(&self.world) {
            debug!("tick ended the session");
            return;
        }
        trace!(elapsed_ms = elapsed.as_millis() as u64, "tick");

        let inputs = SpawnInputs {
            pending_words: query::pending_words(&self.world),
            active_data_units: query::active_data_units(&self.world),
        };
        self.spawning
            .handle(&tick_events, inputs, &mut self.commands);
        self.flush();

        let data_units = query::data_unit_view(&self.world);
        let hostiles = query::hostile_view(&self.world);
        self.movement
            .handle(&tick_events, &data_units, &hostiles, &mut self.commands);
        self.flush();

        let towers = query::tower_view(&self.world);
        let hostiles = query::hostile_view(&self.world);
        self.targeting.handle(&towers, &hostiles, &mut self.targets);
        self.combat.fire(&towers, &self.targets, &mut self.commands);
        self.flush();

        let projectiles = query::projectile_view(&self.world);
        self.combat
            .resolve(&tick_events, &projectiles, &hostiles, &mut self.commands);
        self.flush();

        self.submit(Command::Cleanup);
    }

    /// Delivered data joined by single spaces, corrupted entries included.
    #[must_use]
    pub fn finalize_output(&self) -> String {
        query::output_text(&self.world)
    }

    /// Economy counters and lifecycle flags.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        query::summary(&self.world)
    }

    /// Owned snapshot of everything a renderer needs.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        query::snapshot(&self.world)
    }

    /// Configuration the session runs with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        query::config(&self.world)
    }

    /// Read-only access to the simulation state for fine-grained queries.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Drains the events emitted since the start of the latest tick.
    ///
    /// Commands issued after that tick report their events here too.
    pub fn take_events(&mut self) -> Vec<Event> {
        mem::take(&mut self.journal)
    }

    fn submit(&mut self, command: Command) {
        world::apply(&mut self.world, command, &mut self.journal);
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.journal);
        }
    }
}

fn seed_source(config: &SessionConfig) -> ChaCha8Rng {
    match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn spawning_system(config: &SessionConfig, seed: u64) -> Spawning {
    Spawning::new(SpawningConfig::new(
        config.delivery.spawn_interval(),
        config.hostile.spawn_interval(),
        seed,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SessionConfig {
        SessionConfig {
            seed: Some(11),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let mut config = seeded();
        config.grid.columns = 3;

        assert!(matches!(
            Engine::new(config),
            Err(ConfigError::GridTooSmall { columns: 3, .. })
        ));
    }

    #[test]
    fn ticks_before_start_are_ignored() {
        let mut engine = Engine::new(seeded()).expect("valid config");
        engine.load_input("one two");
        let _ = engine.take_events();

        engine.tick(Duration::from_secs(5));

        assert!(engine.take_events().is_empty());
        assert_eq!(engine.summary().words_pending, 2);
    }

    #[test]
    fn first_running_tick_releases_a_word() {
        let mut engine = Engine::new(seeded()).expect("valid config");
        engine.load_input("one two");
        engine.start();

        engine.tick(Duration::from_millis(16));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.summary.words_pending, 1);
        assert_eq!(snapshot.data_units.len(), 1);
        assert_eq!(snapshot.hostiles.len(), 1);
    }

    #[test]
    fn untaken_events_are_dropped_by_the_next_tick() {
        let mut config = seeded();
        config.delivery.speed = 0.0;
        config.hostile.spawn_interval_ms = 3_600_000;
        let mut engine = Engine::new(config).expect("valid config");
        engine.load_input("slow");
        engine.start();

        for _ in 0..20_000 {
            engine.tick(Duration::from_millis(16));
        }

        let events = engine.take_events();
        assert!(!engine.summary().complete);
        assert!(events.len() < 16, "journal kept {} events", events.len());
        assert!(matches!(events.first(), Some(Event::TimeAdvanced { .. })));
    }

    #[test]
    fn take_events_drains_the_journal() {
        let mut engine = Engine::new(seeded()).expect("valid config");
        engine.start();

        assert_eq!(engine.take_events(), vec![Event::Started]);
        assert!(engine.take_events().is_empty());
    }
}
