#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that computes deterministic tower targets from world snapshots.

use word_defence_core::{CellPoint, HostileId, HostileView, TowerId, TowerTarget, TowerView};

/// Tower targeting system that reuses scratch buffers to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    tower_workspace: Vec<TowerWorkspace>,
    hostile_workspace: Vec<HostileCandidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes a target for every ready tower.
    ///
    /// Each tower picks the nearest hostile whose interpolated position lies
    /// within its range. Equal distances keep the hostile seen first in
    /// identifier order. The output buffer is cleared before populating it.
    pub fn handle(&mut self, towers: &TowerView, hostiles: &HostileView, out: &mut Vec<TowerTarget>) {
        out.clear();

        self.prepare_tower_workspace(towers);
        if self.tower_workspace.is_empty() {
            return;
        }

        self.prepare_hostile_workspace(hostiles);
        if self.hostile_workspace.is_empty() {
            return;
        }

        for tower in &self.tower_workspace {
            let mut best: Option<HostileCandidate> = None;
            let mut best_distance = f32::INFINITY;

            for candidate in &self.hostile_workspace {
                let distance = tower.center.distance(candidate.position);
                if distance > tower.range || distance >= best_distance {
                    continue;
                }

                best = Some(*candidate);
                best_distance = distance;
            }

            if let Some(candidate) = best {
                out.push(TowerTarget {
                    tower: tower.id,
                    hostile: candidate.id,
                    distance: best_distance,
                });
            }
        }
    }

    fn prepare_tower_workspace(&mut self, towers: &TowerView) {
        self.tower_workspace.clear();
        self.tower_workspace.extend(
            towers
                .iter()
                .filter(|snapshot| snapshot.is_ready())
                .map(|snapshot| TowerWorkspace {
                    id: snapshot.id,
                    center: snapshot.cell.to_point(),
                    range: snapshot.range,
                }),
        );
    }

    fn prepare_hostile_workspace(&mut self, hostiles: &HostileView) {
        self.hostile_workspace.clear();
        self.hostile_workspace
            .extend(hostiles.iter().map(|snapshot| HostileCandidate {
                id: snapshot.id,
                position: snapshot.position,
            }));
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct TowerWorkspace {
    id: TowerId,
    center: CellPoint,
    range: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct HostileCandidate {
    id: HostileId,
    position: CellPoint,
}
