//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use word_defence_core::{CellCoord, TowerConfig, TowerId, TowerSnapshot};

/// Snapshot of a tower stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TowerState {
    /// Identifier allocated by the world for the tower.
    pub(crate) id: TowerId,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    /// Detection range in grid units.
    pub(crate) range: f32,
    /// Damage carried by every projectile the tower fires.
    pub(crate) damage: u32,
    /// Delay applied after every shot.
    pub(crate) cooldown: Duration,
    /// Time left until the tower may fire again.
    pub(crate) ready_in: Duration,
}

impl TowerState {
    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            cell: self.cell,
            range: self.range,
            damage: self.damage,
            cooldown: self.cooldown,
            ready_in: self.ready_in,
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerState>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Builds a ready-to-fire tower on the cell and returns its identifier.
    pub(crate) fn insert(&mut self, cell: CellCoord, tuning: &TowerConfig) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let previous = self.entries.insert(
            id,
            TowerState {
                id,
                cell,
                range: tuning.range,
                damage: tuning.damage,
                cooldown: tuning.cooldown(),
                ready_in: Duration::ZERO,
            },
        );
        debug_assert!(previous.is_none(), "tower identifiers are never reused");
        id
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerState> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &TowerState> {
        self.entries.values()
    }

    /// Counts every tower's cooldown down by the elapsed time.
    pub(crate) fn cool_down(&mut self, dt: Duration) {
        for tower in self.entries.values_mut() {
            tower.ready_in = tower.ready_in.saturating_sub(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_allocates_sequential_identifiers() {
        let mut registry = TowerRegistry::new();
        let tuning = TowerConfig::default();

        let first = registry.insert(CellCoord::new(1, 1), &tuning);
        let second = registry.insert(CellCoord::new(2, 1), &tuning);

        assert_eq!(first, TowerId::new(0));
        assert_eq!(second, TowerId::new(1));
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn new_towers_start_ready_and_cool_down_saturates() {
        let mut registry = TowerRegistry::new();
        let tuning = TowerConfig::default();
        let id = registry.insert(CellCoord::new(4, 4), &tuning);

        assert!(registry.iter().all(|tower| tower.snapshot().is_ready()));

        if let Some(tower) = registry.get_mut(id) {
            tower.ready_in = tower.cooldown;
        }
        registry.cool_down(Duration::from_millis(300));
        let remaining = registry.iter().next().map(|tower| tower.ready_in);
        assert_eq!(remaining, Some(tuning.cooldown() - Duration::from_millis(300)));

        registry.cool_down(Duration::from_secs(10));
        assert!(registry.iter().all(|tower| tower.ready_in.is_zero()));
    }
}
