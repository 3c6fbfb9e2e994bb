#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Word Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The engine submits [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! hosts to react to. Systems consume event streams, query immutable views, and
//! respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;

pub use config::{
    ConfigError, CorruptionConfig, DeliveryConfig, EconomyConfig, GridConfig, HostileConfig,
    PathConfig, SessionConfig, TowerConfig,
};

/// Number of routes generated for every session: one delivery route and three hostile routes.
pub const ROUTE_COUNT: usize = 4;

/// Half-width of the square exclusion zone centered on the hub.
///
/// A radius of one spans the 3×3 block of cells around the hub.
pub const HUB_EXCLUSION_RADIUS: u32 = 1;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the pending word queue with the whitespace-separated words of `text`.
    LoadInput {
        /// Raw upstream text supplied by the host.
        text: String,
    },
    /// Clears the pause flag so that ticks advance the simulation.
    Start,
    /// Sets the pause flag so that ticks are ignored.
    Pause,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests placement of a tower on the provided cell.
    PlaceTower {
        /// Cell the tower should occupy.
        cell: CellCoord,
    },
    /// Requests that the next queued word enters the delivery route.
    SpawnDataUnit,
    /// Requests that a hostile unit enters the provided hostile route.
    SpawnHostile {
        /// Hostile route the unit should walk.
        route: RouteIndex,
    },
    /// Moves a data unit to the provided progress along the delivery route.
    AdvanceDataUnit {
        /// Identifier of the data unit to move.
        unit: DataUnitId,
        /// Fractional index along the route the unit should occupy.
        progress: f32,
    },
    /// Moves a hostile unit to the provided progress along its route.
    AdvanceHostile {
        /// Identifier of the hostile unit to move.
        hostile: HostileId,
        /// Fractional index along the route the unit should occupy.
        progress: f32,
    },
    /// Requests that a ready tower fires a projectile at the provided hostile.
    FireProjectile {
        /// Tower that fires the projectile.
        tower: TowerId,
        /// Hostile unit the projectile homes in on.
        target: HostileId,
    },
    /// Moves an in-flight projectile to a new position.
    MoveProjectile {
        /// Identifier of the projectile to move.
        projectile: ProjectileId,
        /// Position the projectile occupies after moving.
        position: CellPoint,
    },
    /// Resolves a projectile against its target, applying damage when the target is still valid.
    StrikeHostile {
        /// Identifier of the projectile reaching its target.
        projectile: ProjectileId,
    },
    /// Discards a projectile whose target vanished.
    DiscardProjectile {
        /// Identifier of the projectile to discard.
        projectile: ProjectileId,
    },
    /// Removes units and projectiles that reached a terminal state during the tick.
    Cleanup,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that new input replaced the pending word queue.
    InputLoaded {
        /// Number of words queued from the input.
        words: usize,
    },
    /// Announces that the simulation left the paused state.
    Started,
    /// Announces that the simulation entered the paused state.
    Paused,
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that every queued word was resolved and the session finished.
    SessionCompleted {
        /// Number of entries in the delivered data.
        delivered: usize,
        /// Number of delivered entries that were corrupted.
        corrupted: usize,
    },
    /// Confirms that a queued word entered the delivery route.
    DataUnitSpawned {
        /// Identifier assigned to the data unit.
        unit: DataUnitId,
        /// Word carried by the unit.
        word: String,
    },
    /// Confirms that a data unit reached the hub and its word was delivered.
    DataDelivered {
        /// Identifier of the data unit that arrived.
        unit: DataUnitId,
        /// Position of the word within the delivered data.
        index: usize,
    },
    /// Confirms that a hostile unit entered a hostile route.
    HostileSpawned {
        /// Identifier assigned to the hostile unit.
        hostile: HostileId,
        /// Route the hostile unit walks.
        route: RouteIndex,
    },
    /// Reports that a hostile unit reached the hub.
    HostileReachedHub {
        /// Identifier of the hostile unit that arrived.
        hostile: HostileId,
    },
    /// Reports that a delivered entry was overwritten by an arriving hostile unit.
    DataCorrupted {
        /// Identifier of the hostile unit that corrupted the entry.
        hostile: HostileId,
        /// Position of the corrupted entry within the delivered data.
        index: usize,
    },
    /// Reports that a projectile damaged a hostile unit without destroying it.
    HostileDamaged {
        /// Identifier of the damaged hostile unit.
        hostile: HostileId,
        /// Hit points left after the hit.
        remaining: u32,
    },
    /// Reports that a hostile unit was destroyed by a projectile.
    HostileDestroyed {
        /// Identifier of the destroyed hostile unit.
        hostile: HostileId,
    },
    /// Confirms that a tower was placed into the world.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a tower fired a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Tower that fired the projectile.
        tower: TowerId,
        /// Hostile unit targeted by the projectile.
        target: HostileId,
    },
    /// Reports that a projectile was discarded without effect.
    ProjectileDiscarded {
        /// Identifier of the discarded projectile.
        projectile: ProjectileId,
    },
}

/// Unique identifier assigned to a data unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataUnitId(u32);

impl DataUnitId {
    /// Creates a new data unit identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a hostile unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a new hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column().abs_diff(other.column()) + self.row().abs_diff(other.row())
    }

    /// Continuous grid position of the cell.
    #[must_use]
    pub fn to_point(self) -> CellPoint {
        CellPoint::new(self.column as f32, self.row as f32)
    }
}

/// Continuous position measured in grid units.
///
/// Whole values coincide with cell coordinates, so a unit halfway between
/// `(2, 3)` and `(3, 3)` sits at `(2.5, 3.0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellPoint {
    column: f32,
    row: f32,
}

impl CellPoint {
    /// Creates a new point from fractional column and row coordinates.
    #[must_use]
    pub const fn new(column: f32, row: f32) -> Self {
        Self { column, row }
    }

    /// Fractional column coordinate.
    #[must_use]
    pub const fn column(&self) -> f32 {
        self.column
    }

    /// Fractional row coordinate.
    #[must_use]
    pub const fn row(&self) -> f32 {
        self.row
    }

    /// Euclidean distance between two points in grid units.
    #[must_use]
    pub fn distance(self, other: CellPoint) -> f32 {
        (other.column - self.column).hypot(other.row - self.row)
    }

    /// Linearly interpolates towards `other` by the factor `t`.
    #[must_use]
    pub fn lerp(self, other: CellPoint, t: f32) -> CellPoint {
        CellPoint::new(
            self.column + (other.column - self.column) * t,
            self.row + (other.row - self.row) * t,
        )
    }

    /// Moves towards `target` by at most `max_distance`, landing on it when close enough.
    #[must_use]
    pub fn step_towards(self, target: CellPoint, max_distance: f32) -> CellPoint {
        let distance = self.distance(target);
        if distance <= max_distance || distance <= f32::EPSILON {
            return target;
        }

        self.lerp(target, max_distance / distance)
    }
}

/// Index of one of the four generated routes.
///
/// Route `0` carries data units to the hub; routes `1` to `3` carry hostile
/// units from the top, right, and bottom edges respectively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteIndex(u8);

impl RouteIndex {
    /// Route walked by data units, starting on the left edge.
    pub const DELIVERY: RouteIndex = RouteIndex(0);

    /// Routes walked by hostile units, starting on the top, right, and bottom edges.
    pub const HOSTILE: [RouteIndex; 3] = [RouteIndex(1), RouteIndex(2), RouteIndex(3)];

    /// Every route in index order.
    pub const ALL: [RouteIndex; ROUTE_COUNT] =
        [RouteIndex(0), RouteIndex(1), RouteIndex(2), RouteIndex(3)];

    /// Creates a route index, rejecting values outside `0..4`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < ROUTE_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Index usable for slice access.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }

    /// Reports whether the index denotes the delivery route.
    #[must_use]
    pub const fn is_delivery(&self) -> bool {
        self.0 == 0
    }
}

/// Fixed dimensions of the play field and the landmarks derived from them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridLayout {
    columns: u32,
    rows: u32,
}

impl GridLayout {
    /// Creates a layout with the provided dimensions.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Total number of cells in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(0)
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major offset of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }

        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        row.checked_mul(width)?.checked_add(column)
    }

    /// Central cell every route terminates at.
    #[must_use]
    pub const fn hub(&self) -> CellCoord {
        CellCoord::new(self.columns / 2, self.rows / 2)
    }

    /// Reports whether the cell lies inside the 3×3 block centered on the hub.
    #[must_use]
    pub fn in_hub_zone(&self, cell: CellCoord) -> bool {
        let hub = self.hub();
        cell.column().abs_diff(hub.column()) <= HUB_EXCLUSION_RADIUS
            && cell.row().abs_diff(hub.row()) <= HUB_EXCLUSION_RADIUS
    }

    /// Boundary cell a route starts from.
    ///
    /// The delivery route starts on the left edge; hostile routes start on the
    /// top, right, and bottom edges, each aligned with the hub.
    #[must_use]
    pub fn route_origin(&self, route: RouteIndex) -> CellCoord {
        let hub = self.hub();
        match route.get() {
            0 => CellCoord::new(0, hub.row()),
            1 => CellCoord::new(hub.column(), 0),
            2 => CellCoord::new(self.columns.saturating_sub(1), hub.row()),
            _ => CellCoord::new(hub.column(), self.rows.saturating_sub(1)),
        }
    }
}

/// Ordered sequence of cells leading from a boundary point to the hub.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    index: RouteIndex,
    points: Vec<CellCoord>,
    reached_hub: bool,
}

impl Route {
    /// Creates a route from its generated points.
    ///
    /// `reached_hub` is `false` when generation gave up before arriving at the
    /// hub; the route then ends at the last cell it reached.
    #[must_use]
    pub fn new(index: RouteIndex, points: Vec<CellCoord>, reached_hub: bool) -> Self {
        Self {
            index,
            points,
            reached_hub,
        }
    }

    /// Index of the route.
    #[must_use]
    pub const fn index(&self) -> RouteIndex {
        self.index
    }

    /// Cells of the route in walking order.
    #[must_use]
    pub fn points(&self) -> &[CellCoord] {
        &self.points
    }

    /// Reports whether the route terminates at the hub.
    #[must_use]
    pub const fn reached_hub(&self) -> bool {
        self.reached_hub
    }

    /// First cell of the route.
    #[must_use]
    pub fn start(&self) -> Option<CellCoord> {
        self.points.first().copied()
    }

    /// Last cell of the route.
    #[must_use]
    pub fn end(&self) -> Option<CellCoord> {
        self.points.last().copied()
    }

    /// Progress value at which a unit has walked the whole route.
    #[must_use]
    pub fn final_progress(&self) -> f32 {
        self.points.len().saturating_sub(1) as f32
    }

    /// Reports whether the route passes through the cell.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        self.points.contains(&cell)
    }

    /// Interpolated position of a unit at the given progress.
    ///
    /// Progress is clamped to the route, so values past the end resolve to the
    /// final cell.
    #[must_use]
    pub fn position_at(&self, progress: f32) -> CellPoint {
        let Some(last) = self.points.last() else {
            return CellPoint::default();
        };

        let clamped = progress.clamp(0.0, self.final_progress());
        let index = clamped.floor() as usize;
        let Some(current) = self.points.get(index) else {
            return last.to_point();
        };
        let Some(next) = self.points.get(index + 1) else {
            return current.to_point();
        };

        current.to_point().lerp(next.to_point(), clamped - index as f32)
    }
}

/// Immutable representation of a single data unit used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct DataUnitSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: DataUnitId,
    /// Word carried by the unit.
    pub word: String,
    /// Fractional index along the delivery route.
    pub progress: f32,
    /// Interpolated grid position.
    pub position: CellPoint,
    /// Remaining hit points.
    pub hit_points: u32,
    /// Hit points the unit spawned with.
    pub max_hit_points: u32,
    /// Movement speed in cells per second.
    pub speed: f32,
}

impl DataUnitSnapshot {
    /// Remaining health as a fraction of the spawn health.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        health_ratio(self.hit_points, self.max_hit_points)
    }
}

/// Immutable representation of a single hostile unit used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct HostileSnapshot {
    /// Unique identifier assigned to the unit.
    pub id: HostileId,
    /// Route the unit walks.
    pub route: RouteIndex,
    /// Fractional index along the route.
    pub progress: f32,
    /// Interpolated grid position.
    pub position: CellPoint,
    /// Remaining hit points.
    pub hit_points: u32,
    /// Hit points the unit spawned with.
    pub max_hit_points: u32,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Collision damage carried by the unit. Never applied.
    pub damage: u32,
}

impl HostileSnapshot {
    /// Remaining health as a fraction of the spawn health.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        health_ratio(self.hit_points, self.max_hit_points)
    }
}

/// Immutable representation of a single tower used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Detection range in grid units.
    pub range: f32,
    /// Damage dealt by each projectile.
    pub damage: u32,
    /// Delay between consecutive shots.
    pub cooldown: Duration,
    /// Time left until the tower may fire again.
    pub ready_in: Duration,
}

impl TowerSnapshot {
    /// Reports whether the tower's cooldown elapsed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.ready_in.is_zero()
    }
}

/// Immutable representation of a projectile in flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated to the projectile by the world.
    pub id: ProjectileId,
    /// Tower that fired the projectile.
    pub tower: TowerId,
    /// Hostile unit the projectile homes in on.
    pub target: HostileId,
    /// Current position in grid units.
    pub position: CellPoint,
    /// Flight speed in cells per second.
    pub speed: f32,
    /// Damage applied on impact.
    pub damage: u32,
}

/// Target assignment computed for a ready tower.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerTarget {
    /// Tower that acquired the target.
    pub tower: TowerId,
    /// Hostile unit selected as the target.
    pub hostile: HostileId,
    /// Distance between the tower and the target in grid units.
    pub distance: f32,
}

/// Read-only snapshot describing all active data units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataUnitView {
    snapshots: Vec<DataUnitSnapshot>,
}

impl DataUnitView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<DataUnitSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &DataUnitSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<DataUnitSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all active hostile units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostileView {
    snapshots: Vec<HostileSnapshot>,
}

impl HostileView {
    /// Creates a new view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<HostileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &HostileSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a hostile unit by identifier.
    #[must_use]
    pub fn get(&self, id: HostileId) -> Option<&HostileSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<HostileSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all towers placed on the grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TowerView {
    snapshots: Vec<TowerSnapshot>,
}

impl TowerView {
    /// Creates a new tower view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TowerSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured tower snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TowerSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a tower by identifier.
    #[must_use]
    pub fn get(&self, id: TowerId) -> Option<&TowerSnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Number of captured towers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no towers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TowerSnapshot> {
        self.snapshots
    }
}

/// Read-only snapshot describing all projectiles in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured projectile snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured projectiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view holds no projectiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}

/// Summary surfaced to hosts for on-screen display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Accumulated score. Never spent.
    pub score: u64,
    /// Spendable resource balance.
    pub balance: u32,
    /// Whether ticks are currently ignored.
    pub paused: bool,
    /// Whether every queued word was resolved.
    pub complete: bool,
    /// Number of entries in the delivered data.
    pub delivered: usize,
    /// Number of delivered entries that were corrupted.
    pub corrupted: usize,
    /// Number of hostile units destroyed by towers.
    pub hostiles_destroyed: u32,
    /// Number of words still waiting in the queue.
    pub words_pending: usize,
}

/// Owned snapshot of everything a renderer needs to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// Grid dimensions.
    pub layout: GridLayout,
    /// Generated routes in index order.
    pub routes: Vec<Route>,
    /// Cells occupied by towers in row-major order.
    pub occupied: Vec<CellCoord>,
    /// Active data units.
    pub data_units: DataUnitView,
    /// Active hostile units.
    pub hostiles: HostileView,
    /// Placed towers.
    pub towers: TowerView,
    /// Projectiles in flight.
    pub projectiles: ProjectileView,
    /// Economy and lifecycle flags.
    pub summary: SessionSummary,
}

/// Reasons a tower placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The requested cell lies outside the grid.
    #[error("cell lies outside the grid")]
    OutOfBounds,
    /// The requested cell lies inside the 3×3 block around the hub.
    #[error("cell lies inside the hub exclusion zone")]
    HubZone,
    /// The requested cell lies on one of the generated routes.
    #[error("cell lies on a generated route")]
    OnRoute,
    /// The requested cell already holds a tower.
    #[error("cell is already occupied by a tower")]
    Occupied,
    /// The resource balance does not cover the tower cost.
    #[error("insufficient resources to build a tower")]
    InsufficientFunds,
}

fn health_ratio(hit_points: u32, max_hit_points: u32) -> f32 {
    if max_hit_points == 0 {
        return 0.0;
    }

    (hit_points as f32 / max_hit_points as f32).clamp(0.0, 1.0)
}
