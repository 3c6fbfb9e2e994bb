#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative simulation state for Word Defence.
//!
//! The [`World`] owns every entity collection, the economy, the pending word
//! queue and the lifecycle flags. It is mutated exclusively through [`apply`],
//! which validates each [`Command`] and reports the outcome as [`Event`]s.
//! Commands whose preconditions do not hold are ignored without an error; the
//! [`query`] module exposes read-only views for systems and adapters.

mod delivery;
mod grid;
mod towers;
mod units;

use std::{collections::VecDeque, time::Duration};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use word_defence_core::{
    CellCoord, CellPoint, Command, DataUnitId, Event, GridLayout, HostileId, PlacementError,
    ProjectileId, Route, RouteIndex, SessionConfig, TowerId, ROUTE_COUNT,
};
use word_defence_system_path_generation::generate_routes;

use delivery::DeliveredData;
use grid::OccupancyGrid;
use towers::TowerRegistry;
use units::{DataUnit, Hostile, IdAllocator, Projectile, UnitState};

/// Score and spendable resources accumulated during a session.
#[derive(Clone, Copy, Debug, Default)]
struct Economy {
    score: u64,
    balance: u32,
}

/// Represents the authoritative Word Defence simulation state.
#[derive(Debug)]
pub struct World {
    config: SessionConfig,
    layout: GridLayout,
    routes: [Route; ROUTE_COUNT],
    occupancy: OccupancyGrid,
    data_units: Vec<DataUnit>,
    hostiles: Vec<Hostile>,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    economy: Economy,
    word_queue: VecDeque<String>,
    words_ever_queued: usize,
    words_dequeued: usize,
    delivered: DeliveredData,
    paused: bool,
    complete: bool,
    hostiles_destroyed: u32,
    ids: IdAllocator,
    rng: ChaCha8Rng,
    corruption_symbols: Vec<char>,
}

impl World {
    /// Creates a paused world whose routes are generated from `seed`.
    ///
    /// The same generator later drives corruption so a fixed seed replays the
    /// whole session.
    #[must_use]
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let routes = generate_routes(config.grid.layout(), &config.paths, &mut rng);
        Self::assemble(config, routes, rng)
    }

    /// Creates a paused world that walks the provided routes.
    ///
    /// Hosts use this to replay a recorded layout or to stage scenarios with
    /// hand-drawn routes. `routes[i]` must be the route with index `i`.
    #[must_use]
    pub fn with_routes(config: SessionConfig, routes: [Route; ROUTE_COUNT], seed: u64) -> Self {
        Self::assemble(config, routes, ChaCha8Rng::seed_from_u64(seed))
    }

    fn assemble(config: SessionConfig, routes: [Route; ROUTE_COUNT], rng: ChaCha8Rng) -> Self {
        let layout = config.grid.layout();
        let occupancy = OccupancyGrid::new(layout, &routes);
        let economy = Economy {
            score: 0,
            balance: config.economy.starting_balance,
        };
        let corruption_symbols = config.corruption.symbols();

        Self {
            layout,
            routes,
            occupancy,
            data_units: Vec::new(),
            hostiles: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            economy,
            word_queue: VecDeque::new(),
            words_ever_queued: 0,
            words_dequeued: 0,
            delivered: DeliveredData::default(),
            paused: true,
            complete: false,
            hostiles_destroyed: 0,
            ids: IdAllocator::default(),
            rng,
            corruption_symbols,
            config,
        }
    }

    fn route(&self, index: RouteIndex) -> &Route {
        &self.routes[index.as_usize()]
    }

    fn load_input(&mut self, text: &str, out_events: &mut Vec<Event>) {
        self.word_queue = text.split_whitespace().map(str::to_owned).collect();
        let words = self.word_queue.len();

        if words > 0 {
            self.words_ever_queued = self.words_ever_queued.saturating_add(words);
            self.words_dequeued = 0;
            self.complete = false;
            self.delivered.clear();
            self.data_units.clear();
            self.hostiles.clear();
            self.projectiles.clear();
        }

        info!(words, "input loaded");
        out_events.push(Event::InputLoaded { words });
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        if self.complete {
            debug!("start ignored: session already complete");
            return;
        }

        if self.paused {
            self.paused = false;
            info!("simulation started");
            out_events.push(Event::Started);
        }
    }

    fn pause(&mut self, out_events: &mut Vec<Event>) {
        if !self.paused {
            self.paused = true;
            info!("simulation paused");
            out_events.push(Event::Paused);
        }
    }

    fn tick(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        if self.paused {
            return;
        }

        let drained = self.word_queue.is_empty()
            && !self.data_units.iter().any(DataUnit::is_active)
            && self.words_ever_queued > 0;
        if drained {
            self.complete = true;
            self.paused = true;
            let delivered = self.delivered.len();
            let corrupted = self.delivered.corrupted();
            info!(delivered, corrupted, "session complete");
            out_events.push(Event::SessionCompleted {
                delivered,
                corrupted,
            });
            return;
        }

        self.towers.cool_down(dt);
        out_events.push(Event::TimeAdvanced { dt });
    }

    fn placement_check(&self, cell: CellCoord) -> Result<(), PlacementError> {
        self.occupancy.check(cell)?;
        if self.economy.balance < self.config.tower.cost {
            return Err(PlacementError::InsufficientFunds);
        }
        Ok(())
    }

    fn place_tower(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        if let Err(reason) = self.placement_check(cell) {
            debug!(
                column = cell.column(),
                row = cell.row(),
                %reason,
                "tower placement rejected"
            );
            out_events.push(Event::TowerPlacementRejected { cell, reason });
            return;
        }

        self.economy.balance -= self.config.tower.cost;
        self.occupancy.occupy(cell);
        let tower = self.towers.insert(cell, &self.config.tower);
        debug!(
            tower = tower.get(),
            column = cell.column(),
            row = cell.row(),
            "tower placed"
        );
        out_events.push(Event::TowerPlaced { tower, cell });
    }

    fn spawn_data_unit(&mut self, out_events: &mut Vec<Event>) {
        let Some(word) = self.word_queue.pop_front() else {
            return;
        };

        self.words_dequeued = self.words_dequeued.saturating_add(1);
        let id = self.ids.data_unit();
        let tuning = &self.config.delivery;
        self.data_units.push(DataUnit {
            id,
            word: word.clone(),
            progress: 0.0,
            hit_points: tuning.hit_points,
            max_hit_points: tuning.hit_points,
            speed: tuning.speed,
            state: UnitState::Active,
        });
        debug!(unit = id.get(), %word, "data unit spawned");
        out_events.push(Event::DataUnitSpawned { unit: id, word });
    }

    fn spawn_hostile(&mut self, route: RouteIndex, out_events: &mut Vec<Event>) {
        if route.is_delivery() {
            debug!("hostile spawn on the delivery route ignored");
            return;
        }

        let id = self.ids.hostile();
        let tuning = &self.config.hostile;
        self.hostiles.push(Hostile {
            id,
            route,
            progress: 0.0,
            hit_points: tuning.hit_points,
            max_hit_points: tuning.hit_points,
            speed: tuning.speed,
            damage: tuning.damage,
            state: UnitState::Active,
        });
        debug!(hostile = id.get(), route = route.get(), "hostile spawned");
        out_events.push(Event::HostileSpawned { hostile: id, route });
    }

    fn advance_data_unit(&mut self, id: DataUnitId, progress: f32, out_events: &mut Vec<Event>) {
        let final_progress = self.route(RouteIndex::DELIVERY).final_progress();
        let Some(unit) = self
            .data_units
            .iter_mut()
            .find(|unit| unit.id == id && unit.is_active())
        else {
            return;
        };

        unit.progress = progress.clamp(0.0, final_progress);
        if progress < final_progress {
            return;
        }

        unit.state = UnitState::ReachedHub;
        let rewards = &self.config.economy;
        self.economy.balance = self.economy.balance.saturating_add(rewards.delivery_reward);
        self.economy.score = self.economy.score.saturating_add(rewards.delivery_score);
        let index = self.delivered.push(unit.word.clone());
        debug!(unit = id.get(), index, "data delivered");
        out_events.push(Event::DataDelivered { unit: id, index });
    }

    fn advance_hostile(&mut self, id: HostileId, progress: f32, out_events: &mut Vec<Event>) {
        let Some(position) = self
            .hostiles
            .iter()
            .position(|hostile| hostile.id == id && hostile.is_active())
        else {
            return;
        };

        let final_progress = self.route(self.hostiles[position].route).final_progress();
        let hostile = &mut self.hostiles[position];
        hostile.progress = progress.clamp(0.0, final_progress);
        if progress < final_progress {
            return;
        }

        hostile.state = UnitState::ReachedHub;
        if let Some(index) = self
            .delivered
            .corrupt_random(&mut self.rng, &self.corruption_symbols)
        {
            debug!(hostile = id.get(), index, "delivered data corrupted");
            out_events.push(Event::DataCorrupted { hostile: id, index });
        }
        debug!(hostile = id.get(), "hostile reached the hub");
        out_events.push(Event::HostileReachedHub { hostile: id });
    }

    fn fire_projectile(&mut self, tower: TowerId, target: HostileId, out_events: &mut Vec<Event>) {
        let target_active = self
            .hostiles
            .iter()
            .any(|hostile| hostile.id == target && hostile.is_active());
        if !target_active {
            return;
        }

        let Some(state) = self.towers.get_mut(tower) else {
            return;
        };
        if !state.ready_in.is_zero() {
            return;
        }

        state.ready_in = state.cooldown;
        let id = self.ids.projectile();
        self.projectiles.push(Projectile {
            id,
            tower,
            target,
            position: state.cell.to_point(),
            speed: self.config.tower.projectile_speed,
            damage: state.damage,
            spent: false,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            tower,
            target,
        });
    }

    fn projectile_mut(&mut self, id: ProjectileId) -> Option<&mut Projectile> {
        self.projectiles
            .iter_mut()
            .find(|projectile| projectile.id == id && !projectile.spent)
    }

    fn move_projectile(&mut self, id: ProjectileId, position: CellPoint) {
        if let Some(projectile) = self.projectile_mut(id) {
            projectile.position = position;
        }
    }

    fn strike_hostile(&mut self, id: ProjectileId, out_events: &mut Vec<Event>) {
        let Some(projectile) = self.projectile_mut(id) else {
            return;
        };
        projectile.spent = true;
        let (target, damage) = (projectile.target, projectile.damage);

        let Some(hostile) = self
            .hostiles
            .iter_mut()
            .find(|hostile| hostile.id == target && hostile.is_active())
        else {
            out_events.push(Event::ProjectileDiscarded { projectile: id });
            return;
        };

        hostile.hit_points = hostile.hit_points.saturating_sub(damage);
        if hostile.hit_points > 0 {
            out_events.push(Event::HostileDamaged {
                hostile: target,
                remaining: hostile.hit_points,
            });
            return;
        }

        hostile.state = UnitState::Dead;
        let rewards = &self.config.economy;
        self.economy.balance = self.economy.balance.saturating_add(rewards.kill_reward);
        self.economy.score = self.economy.score.saturating_add(rewards.kill_score);
        self.hostiles_destroyed = self.hostiles_destroyed.saturating_add(1);
        debug!(hostile = target.get(), "hostile destroyed");
        out_events.push(Event::HostileDestroyed { hostile: target });
    }

    fn discard_projectile(&mut self, id: ProjectileId, out_events: &mut Vec<Event>) {
        if let Some(projectile) = self.projectile_mut(id) {
            projectile.spent = true;
            out_events.push(Event::ProjectileDiscarded { projectile: id });
        }
    }

    fn cleanup(&mut self) {
        self.data_units.retain(DataUnit::is_active);
        self.hostiles.retain(Hostile::is_active);
        self.projectiles.retain(|projectile| !projectile.spent);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::LoadInput { text } => world.load_input(&text, out_events),
        Command::Start => world.start(out_events),
        Command::Pause => world.pause(out_events),
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::PlaceTower { cell } => world.place_tower(cell, out_events),
        Command::SpawnDataUnit => world.spawn_data_unit(out_events),
        Command::SpawnHostile { route } => world.spawn_hostile(route, out_events),
        Command::AdvanceDataUnit { unit, progress } => {
            world.advance_data_unit(unit, progress, out_events);
        }
        Command::AdvanceHostile { hostile, progress } => {
            world.advance_hostile(hostile, progress, out_events);
        }
        Command::FireProjectile { tower, target } => {
            world.fire_projectile(tower, target, out_events);
        }
        Command::MoveProjectile {
            projectile,
            position,
        } => world.move_projectile(projectile, position),
        Command::StrikeHostile { projectile } => world.strike_hostile(projectile, out_events),
        Command::DiscardProjectile { projectile } => {
            world.discard_projectile(projectile, out_events);
        }
        Command::Cleanup => world.cleanup(),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{DataUnit, Hostile, World};
    use word_defence_core::{
        CellCoord, DataUnitView, GridLayout, HostileView, PlacementError, ProjectileView, Route,
        SessionConfig, SessionSnapshot, SessionSummary, TowerView,
    };

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SessionConfig {
        &world.config
    }

    /// Grid dimensions of the session.
    #[must_use]
    pub fn layout(world: &World) -> GridLayout {
        world.layout
    }

    /// Generated routes in index order.
    #[must_use]
    pub fn routes(world: &World) -> &[Route] {
        &world.routes
    }

    /// Reports whether ticks are currently ignored.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Reports whether every queued word was resolved.
    #[must_use]
    pub fn is_complete(world: &World) -> bool {
        world.complete
    }

    /// Number of words still waiting in the queue.
    #[must_use]
    pub fn pending_words(world: &World) -> usize {
        world.word_queue.len()
    }

    /// Number of words moved from the queue into data units since the last load.
    #[must_use]
    pub fn words_dequeued(world: &World) -> usize {
        world.words_dequeued
    }

    /// Number of data units that have not reached a terminal state.
    #[must_use]
    pub fn active_data_units(world: &World) -> usize {
        world
            .data_units
            .iter()
            .filter(|unit| unit.is_active())
            .count()
    }

    /// Captures the data units that have not reached a terminal state.
    #[must_use]
    pub fn data_unit_view(world: &World) -> DataUnitView {
        let route = world.route(word_defence_core::RouteIndex::DELIVERY);
        DataUnitView::from_snapshots(
            world
                .data_units
                .iter()
                .filter(|unit| unit.is_active())
                .map(|unit: &DataUnit| unit.snapshot(route))
                .collect(),
        )
    }

    /// Captures the hostile units that have not reached a terminal state.
    #[must_use]
    pub fn hostile_view(world: &World) -> HostileView {
        HostileView::from_snapshots(
            world
                .hostiles
                .iter()
                .filter(|hostile| hostile.is_active())
                .map(|hostile: &Hostile| hostile.snapshot(world.route(hostile.route)))
                .collect(),
        )
    }

    /// Captures every placed tower.
    #[must_use]
    pub fn tower_view(world: &World) -> TowerView {
        TowerView::from_snapshots(world.towers.iter().map(|tower| tower.snapshot()).collect())
    }

    /// Captures every projectile still in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        ProjectileView::from_snapshots(
            world
                .projectiles
                .iter()
                .filter(|projectile| !projectile.spent)
                .map(|projectile| projectile.snapshot())
                .collect(),
        )
    }

    /// Cells occupied by towers in row-major order.
    #[must_use]
    pub fn occupied_cells(world: &World) -> Vec<CellCoord> {
        world.occupancy.occupied_cells()
    }

    /// Reports whether a tower stands on the cell.
    #[must_use]
    pub fn is_occupied(world: &World, cell: CellCoord) -> bool {
        world.occupancy.is_occupied(cell)
    }

    /// Evaluates whether a tower could be placed on the cell right now.
    pub fn placement_check(world: &World, cell: CellCoord) -> Result<(), PlacementError> {
        world.placement_check(cell)
    }

    /// Delivered entries in arrival order, corrupted ones included.
    #[must_use]
    pub fn delivered_words(world: &World) -> Vec<&str> {
        world
            .delivered
            .entries()
            .iter()
            .map(|entry| entry.text.as_str())
            .collect()
    }

    /// Delivered data joined by single spaces.
    #[must_use]
    pub fn output_text(world: &World) -> String {
        world.delivered.join()
    }

    /// Economy counters and lifecycle flags.
    #[must_use]
    pub fn summary(world: &World) -> SessionSummary {
        SessionSummary {
            score: world.economy.score,
            balance: world.economy.balance,
            paused: world.paused,
            complete: world.complete,
            delivered: world.delivered.len(),
            corrupted: world.delivered.corrupted(),
            hostiles_destroyed: world.hostiles_destroyed,
            words_pending: world.word_queue.len(),
        }
    }

    /// Owned snapshot of everything a renderer needs.
    #[must_use]
    pub fn snapshot(world: &World) -> SessionSnapshot {
        SessionSnapshot {
            layout: world.layout,
            routes: world.routes.to_vec(),
            occupied: occupied_cells(world),
            data_units: data_unit_view(world),
            hostiles: hostile_view(world),
            towers: tower_view(world),
            projectiles: projectile_view(world),
            summary: summary(world),
        }
    }
}
