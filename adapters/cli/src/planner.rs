//! Greedy tower placement that stands in for a player during headless runs.

use std::collections::{HashSet, VecDeque};

use word_defence_core::{CellCoord, SessionSnapshot, TowerConfig};
use word_defence_rendering::{FrameInput, Scene};

use crate::headless::InputSource;

/// Clicks on the free cell covering the most hostile route cells whenever a tower is affordable.
#[derive(Debug)]
pub(crate) struct TowerPlanner {
    candidates: VecDeque<CellCoord>,
    cost: u32,
}

impl TowerPlanner {
    /// Ranks every buildable cell of the session by hostile route coverage.
    pub(crate) fn new(snapshot: &SessionSnapshot, tower: &TowerConfig) -> Self {
        let layout = snapshot.layout;
        let mut route_cells = HashSet::new();
        let mut hostile_cells = Vec::new();
        for route in &snapshot.routes {
            for cell in route.points() {
                let _ = route_cells.insert(*cell);
                if !route.index().is_delivery() {
                    hostile_cells.push(*cell);
                }
            }
        }

        let mut ranked = Vec::new();
        for row in 0..layout.rows() {
            for column in 0..layout.columns() {
                let cell = CellCoord::new(column, row);
                if route_cells.contains(&cell) || layout.in_hub_zone(cell) {
                    continue;
                }

                let coverage = hostile_cells
                    .iter()
                    .filter(|target| cell.to_point().distance(target.to_point()) <= tower.range)
                    .count();
                if coverage > 0 {
                    ranked.push((coverage, cell));
                }
            }
        }
        ranked.sort_by(|(left_coverage, left), (right_coverage, right)| {
            right_coverage.cmp(left_coverage).then(left.cmp(right))
        });

        Self {
            candidates: ranked.into_iter().map(|(_, cell)| cell).collect(),
            cost: tower.cost,
        }
    }

    /// Number of cells still considered for placement.
    pub(crate) fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

impl InputSource for TowerPlanner {
    fn next_input(&mut self, scene: &Scene) -> FrameInput {
        let summary = scene.hud.summary;
        if summary.complete || summary.balance < self.cost {
            return FrameInput::default();
        }

        while let Some(cell) = self.candidates.pop_front() {
            if scene.towers.iter().any(|tower| tower.cell == cell) {
                continue;
            }

            return FrameInput {
                click_world_space: Some(scene.tile_grid.cell_center(cell)),
                ..FrameInput::default()
            };
        }

        FrameInput::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use word_defence_core::{GridLayout, Route, RouteIndex, SessionSummary};
    use word_defence_rendering::{Palette, TileGridPresentation};

    fn snapshot(balance: u32) -> SessionSnapshot {
        let delivery = Route::new(
            RouteIndex::DELIVERY,
            (0..=5).map(|column| CellCoord::new(column, 5)).collect(),
            true,
        );
        let hostile = Route::new(
            RouteIndex::HOSTILE[0],
            (0..=5).map(|row| CellCoord::new(5, row)).collect(),
            true,
        );
        SessionSnapshot {
            layout: GridLayout::new(11, 11),
            routes: vec![delivery, hostile],
            occupied: Vec::new(),
            data_units: Default::default(),
            hostiles: Default::default(),
            towers: Default::default(),
            projectiles: Default::default(),
            summary: SessionSummary {
                balance,
                ..SessionSummary::default()
            },
        }
    }

    fn tuning() -> TowerConfig {
        TowerConfig {
            range: 1.0,
            ..TowerConfig::default()
        }
    }

    fn scene(snapshot: &SessionSnapshot) -> Scene {
        let grid = TileGridPresentation::new(11, 11, 10.0).expect("valid grid");
        Scene::from_snapshot(snapshot, grid, &Palette::default())
    }

    #[test]
    fn candidates_avoid_routes_and_the_hub_zone() {
        let snapshot = snapshot(0);
        let planner = TowerPlanner::new(&snapshot, &tuning());

        for cell in &planner.candidates {
            assert!(snapshot.routes.iter().all(|route| !route.contains(*cell)));
            assert!(!snapshot.layout.in_hub_zone(*cell));
        }
        assert_eq!(planner.remaining(), 8);
    }

    #[test]
    fn clicks_only_when_a_tower_is_affordable() {
        let poor = snapshot(10);
        let mut planner = TowerPlanner::new(&poor, &tuning());
        assert_eq!(planner.next_input(&scene(&poor)), FrameInput::default());

        let rich = snapshot(500);
        let input = planner.next_input(&scene(&rich));
        let click = input.click_world_space.expect("affordable tower is placed");
        let grid = TileGridPresentation::new(11, 11, 10.0).expect("valid grid");
        assert_eq!(grid.cell_at(click), Some(CellCoord::new(4, 0)));
        assert_eq!(planner.remaining(), 7);
    }
}
