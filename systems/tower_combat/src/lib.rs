#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that fires projectiles from targeting data and resolves them in flight.

use word_defence_core::{Command, Event, HostileView, ProjectileView, TowerTarget, TowerView};

/// Tower combat system that queues firing and projectile resolution commands.
#[derive(Debug, Default)]
pub struct TowerCombat {
    scratch: Vec<Command>,
}

impl TowerCombat {
    /// Creates a new tower combat system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for towers ready to fire.
    pub fn fire(&mut self, towers: &TowerView, tower_targets: &[TowerTarget], out: &mut Vec<Command>) {
        if tower_targets.is_empty() {
            return;
        }

        self.scratch.clear();
        for target in tower_targets {
            let ready = towers
                .get(target.tower)
                .map_or(false, |snapshot| snapshot.is_ready());
            if ready {
                self.scratch.push(Command::FireProjectile {
                    tower: target.tower,
                    target: target.hostile,
                });
            }
        }

        out.append(&mut self.scratch);
    }

    /// Emits one resolution command per projectile in flight.
    ///
    /// Projectiles whose target vanished are discarded. Projectiles that can
    /// cover the remaining distance this tick strike their target; the rest
    /// home in by the distance they travel.
    pub fn resolve(
        &mut self,
        events: &[Event],
        projectiles: &ProjectileView,
        hostiles: &HostileView,
        out: &mut Vec<Command>,
    ) {
        let elapsed: f32 = events
            .iter()
            .filter_map(|event| match event {
                Event::TimeAdvanced { dt } => Some(dt.as_secs_f32()),
                _ => None,
            })
            .sum();

        if elapsed <= 0.0 {
            return;
        }

        for projectile in projectiles.iter() {
            let Some(target) = hostiles.get(projectile.target) else {
                out.push(Command::DiscardProjectile {
                    projectile: projectile.id,
                });
                continue;
            };

            let travel = projectile.speed * elapsed;
            if projectile.position.distance(target.position) <= travel {
                out.push(Command::StrikeHostile {
                    projectile: projectile.id,
                });
            } else {
                out.push(Command::MoveProjectile {
                    projectile: projectile.id,
                    position: projectile.position.step_towards(target.position, travel),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use word_defence_core::{CellCoord, HostileId, TowerId, TowerSnapshot};

    fn tower(id: u32, ready_in: Duration) -> TowerSnapshot {
        TowerSnapshot {
            id: TowerId::new(id),
            cell: CellCoord::new(id, 0),
            range: 3.5,
            damage: 25,
            cooldown: Duration::from_millis(800),
            ready_in,
        }
    }

    fn target(tower: u32, hostile: u32) -> TowerTarget {
        TowerTarget {
            tower: TowerId::new(tower),
            hostile: HostileId::new(hostile),
            distance: 1.0,
        }
    }

    #[test]
    fn firing_respects_cooldown_readiness() {
        let mut combat = TowerCombat::new();
        let towers = TowerView::from_snapshots(vec![
            tower(0, Duration::ZERO),
            tower(1, Duration::from_millis(200)),
        ]);
        let mut out = Vec::new();

        combat.fire(&towers, &[target(0, 5), target(1, 5)], &mut out);

        assert_eq!(
            out,
            vec![Command::FireProjectile {
                tower: TowerId::new(0),
                target: HostileId::new(5),
            }]
        );
    }

    #[test]
    fn unknown_towers_are_skipped() {
        let mut combat = TowerCombat::new();
        let towers = TowerView::from_snapshots(vec![tower(0, Duration::ZERO)]);
        let mut out = Vec::new();

        combat.fire(&towers, &[target(9, 1)], &mut out);

        assert!(out.is_empty());
    }
}
