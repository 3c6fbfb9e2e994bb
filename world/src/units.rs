//! Mobile entities owned by the world: data units, hostile units, and projectiles.

use word_defence_core::{
    CellPoint, DataUnitId, DataUnitSnapshot, HostileId, HostileSnapshot, ProjectileId,
    ProjectileSnapshot, Route, RouteIndex, TowerId,
};

/// Lifecycle of a unit walking a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UnitState {
    Active,
    Dead,
    ReachedHub,
}

#[derive(Clone, Debug)]
pub(crate) struct DataUnit {
    pub(crate) id: DataUnitId,
    pub(crate) word: String,
    pub(crate) progress: f32,
    pub(crate) hit_points: u32,
    pub(crate) max_hit_points: u32,
    pub(crate) speed: f32,
    pub(crate) state: UnitState,
}

impl DataUnit {
    pub(crate) fn is_active(&self) -> bool {
        self.state == UnitState::Active
    }

    pub(crate) fn snapshot(&self, route: &Route) -> DataUnitSnapshot {
        DataUnitSnapshot {
            id: self.id,
            word: self.word.clone(),
            progress: self.progress,
            position: route.position_at(self.progress),
            hit_points: self.hit_points,
            max_hit_points: self.max_hit_points,
            speed: self.speed,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Hostile {
    pub(crate) id: HostileId,
    pub(crate) route: RouteIndex,
    pub(crate) progress: f32,
    pub(crate) hit_points: u32,
    pub(crate) max_hit_points: u32,
    pub(crate) speed: f32,
    pub(crate) damage: u32,
    pub(crate) state: UnitState,
}

impl Hostile {
    pub(crate) fn is_active(&self) -> bool {
        self.state == UnitState::Active
    }

    pub(crate) fn snapshot(&self, route: &Route) -> HostileSnapshot {
        HostileSnapshot {
            id: self.id,
            route: self.route,
            progress: self.progress,
            position: route.position_at(self.progress),
            hit_points: self.hit_points,
            max_hit_points: self.max_hit_points,
            speed: self.speed,
            damage: self.damage,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) tower: TowerId,
    pub(crate) target: HostileId,
    pub(crate) position: CellPoint,
    pub(crate) speed: f32,
    pub(crate) damage: u32,
    /// Set once the projectile hit or lost its target; swept during cleanup.
    pub(crate) spent: bool,
}

impl Projectile {
    pub(crate) fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            tower: self.tower,
            target: self.target,
            position: self.position,
            speed: self.speed,
            damage: self.damage,
        }
    }
}

/// Monotonic identifier counters; identifiers are never reused within a session.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    data_units: u32,
    hostiles: u32,
    projectiles: u32,
}

impl IdAllocator {
    pub(crate) fn data_unit(&mut self) -> DataUnitId {
        DataUnitId::new(advance(&mut self.data_units))
    }

    pub(crate) fn hostile(&mut self) -> HostileId {
        HostileId::new(advance(&mut self.hostiles))
    }

    pub(crate) fn projectile(&mut self) -> ProjectileId {
        ProjectileId::new(advance(&mut self.projectiles))
    }
}

fn advance(counter: &mut u32) -> u32 {
    let value = *counter;
    *counter = counter.saturating_add(1);
    value
}
