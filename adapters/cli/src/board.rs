//! Plain-text rendering of a session snapshot for terminal output.

use word_defence_core::{CellCoord, CellPoint, GridLayout, SessionSnapshot};

const FREE: char = '.';
const DELIVERY_ROUTE: char = '=';
const HOSTILE_ROUTE: char = '~';
const HUB: char = 'H';
const TOWER: char = 'T';
const DATA_UNIT: char = 'd';
const HOSTILE: char = 'x';
const PROJECTILE: char = '*';

/// Draws the grid one character per cell, one line per row.
///
/// Later layers overwrite earlier ones: routes, hub, towers, data units,
/// hostiles, then projectiles.
pub(crate) fn render(snapshot: &SessionSnapshot) -> String {
    let layout = snapshot.layout;
    let mut cells = vec![FREE; layout.cell_count()];

    for route in &snapshot.routes {
        let symbol = if route.index().is_delivery() {
            DELIVERY_ROUTE
        } else {
            HOSTILE_ROUTE
        };
        for cell in route.points() {
            paint(&mut cells, layout, *cell, symbol);
        }
    }
    paint(&mut cells, layout, layout.hub(), HUB);
    for tower in snapshot.towers.iter() {
        paint(&mut cells, layout, tower.cell, TOWER);
    }
    for unit in snapshot.data_units.iter() {
        paint_point(&mut cells, layout, unit.position, DATA_UNIT);
    }
    for hostile in snapshot.hostiles.iter() {
        paint_point(&mut cells, layout, hostile.position, HOSTILE);
    }
    for projectile in snapshot.projectiles.iter() {
        paint_point(&mut cells, layout, projectile.position, PROJECTILE);
    }

    let width = usize::try_from(layout.columns()).unwrap_or(usize::MAX).max(1);
    let mut board = String::with_capacity(cells.len() + cells.len() / width);
    for row in cells.chunks(width) {
        board.extend(row);
        board.push('\n');
    }
    board
}

fn paint(cells: &mut [char], layout: GridLayout, cell: CellCoord, symbol: char) {
    if let Some(slot) = layout.index(cell).and_then(|index| cells.get_mut(index)) {
        *slot = symbol;
    }
}

fn paint_point(cells: &mut [char], layout: GridLayout, point: CellPoint, symbol: char) {
    let column = point.column().round();
    let row = point.row().round();
    if column < 0.0 || row < 0.0 {
        return;
    }
    paint(
        cells,
        layout,
        CellCoord::new(column as u32, row as u32),
        symbol,
    );
}
