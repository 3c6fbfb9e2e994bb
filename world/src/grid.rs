//! Dense tower occupancy grid and the cells towers may never claim.

use word_defence_core::{CellCoord, GridLayout, PlacementError, Route};

/// Row-major occupancy flags alongside a mask of route cells.
#[derive(Clone, Debug)]
pub(crate) struct OccupancyGrid {
    layout: GridLayout,
    occupied: Vec<bool>,
    on_route: Vec<bool>,
}

impl OccupancyGrid {
    pub(crate) fn new(layout: GridLayout, routes: &[Route]) -> Self {
        let capacity = layout.cell_count();
        let mut on_route = vec![false; capacity];
        for cell in routes.iter().flat_map(Route::points) {
            if let Some(index) = layout.index(*cell) {
                on_route[index] = true;
            }
        }

        Self {
            layout,
            occupied: vec![false; capacity],
            on_route,
        }
    }

    /// Checks every structural placement rule, leaving affordability to the caller.
    pub(crate) fn check(&self, cell: CellCoord) -> Result<(), PlacementError> {
        let Some(index) = self.layout.index(cell) else {
            return Err(PlacementError::OutOfBounds);
        };

        if self.layout.in_hub_zone(cell) {
            return Err(PlacementError::HubZone);
        }

        if self.on_route[index] {
            return Err(PlacementError::OnRoute);
        }

        if self.occupied[index] {
            return Err(PlacementError::Occupied);
        }

        Ok(())
    }

    pub(crate) fn occupy(&mut self, cell: CellCoord) {
        if let Some(index) = self.layout.index(cell) {
            self.occupied[index] = true;
        }
    }

    pub(crate) fn is_occupied(&self, cell: CellCoord) -> bool {
        self.layout
            .index(cell)
            .map_or(false, |index| self.occupied[index])
    }

    /// Occupied cells in row-major order.
    pub(crate) fn occupied_cells(&self) -> Vec<CellCoord> {
        let columns = self.layout.columns();
        let mut cells = Vec::new();
        for row in 0..self.layout.rows() {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                if self.is_occupied(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }
}
