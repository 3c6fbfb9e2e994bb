#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Word Defence adapters.
//!
//! A [`Scene`] is a fully owned, world-space description of one frame built
//! from a [`SessionSnapshot`]. Backends draw scenes without touching the
//! engine; the [`TileGridPresentation`] converts between world-space positions
//! and grid cells so clicks can be turned into tower placements.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;
use word_defence_core::{
    CellCoord, CellPoint, PlacementError, RouteIndex, SessionSnapshot, SessionSummary,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used for every kind of scene element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Grid lines.
    pub grid_line: Color,
    /// Cells of the delivery route.
    pub delivery_route: Color,
    /// Cells of the hostile routes.
    pub hostile_route: Color,
    /// The hub cell.
    pub hub: Color,
    /// Data units at full health.
    pub data_unit: Color,
    /// Hostile units at full health.
    pub hostile: Color,
    /// Towers ready to fire.
    pub tower: Color,
    /// Projectiles in flight.
    pub projectile: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid_line: Color::from_rgb_u8(0x2a, 0x2e, 0x37),
            delivery_route: Color::from_rgb_u8(0x1f, 0x6f, 0x8b),
            hostile_route: Color::from_rgb_u8(0x7a, 0x2e, 0x2e),
            hub: Color::from_rgb_u8(0xf2, 0xc9, 0x4c),
            data_unit: Color::from_rgb_u8(0x4c, 0xc9, 0xf0),
            hostile: Color::from_rgb_u8(0xe6, 0x39, 0x46),
            tower: Color::from_rgb_u8(0x90, 0xbe, 0x6d),
            projectile: Color::from_rgb_u8(0xf8, 0xf9, 0xfa),
        }
    }
}

impl Palette {
    /// Color of the cells belonging to the route.
    #[must_use]
    pub fn route(&self, index: RouteIndex) -> Color {
        if index.is_delivery() {
            self.delivery_route
        } else {
            self.hostile_route
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the adapter detected a pause toggle on this frame.
    pub toggle_pause: bool,
    /// Position of a placement click expressed in world units, if any.
    pub click_world_space: Option<Vec2>,
    /// Cursor position expressed in world units, used for placement previews.
    pub cursor_world_space: Option<Vec2>,
}

/// Decision returned by the scene update closure after every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Stop the backend and return from [`RenderingBackend::run`].
    Exit,
}

/// Describes the square cell grid that composes the play area.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single cell expressed in world units.
    pub cell_length: f32,
}

impl TileGridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when `cell_length` is not a positive finite number.
    pub fn new(columns: u32, rows: u32, cell_length: f32) -> Result<Self, RenderingError> {
        if !cell_length.is_finite() || cell_length <= 0.0 {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            columns,
            rows,
            cell_length,
        })
    }

    /// Calculates the total width of the grid.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_length
    }

    /// Calculates the total height of the grid.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_length
    }

    /// Cell under a world-space position, or `None` outside the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        if position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let column = (position.x / self.cell_length).floor();
        let row = (position.y / self.cell_length).floor();
        if column >= self.columns as f32 || row >= self.rows as f32 {
            return None;
        }

        Some(CellCoord::new(column as u32, row as u32))
    }

    /// World-space center of a continuous grid position.
    ///
    /// Whole grid coordinates map to the centers of their cells.
    #[must_use]
    pub fn to_world(&self, point: CellPoint) -> Vec2 {
        Vec2::new(point.column() + 0.5, point.row() + 0.5) * self.cell_length
    }

    /// World-space center of a cell.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.to_world(cell.to_point())
    }
}

/// Route drawn as a chain of cell centers.
#[derive(Clone, Debug, PartialEq)]
pub struct RoutePresentation {
    /// Index of the route.
    pub index: RouteIndex,
    /// World-space centers of the route cells in walking order.
    pub points: Vec<Vec2>,
    /// Whether the route stopped short of the hub.
    pub truncated: bool,
    /// Fill color of the route cells.
    pub color: Color,
}

/// Unit drawn as a disc with a health bar.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitPresentation {
    /// World-space center of the unit.
    pub position: Vec2,
    /// Remaining health in the range 0.0..=1.0.
    pub health_ratio: f32,
    /// Caption drawn next to the unit.
    pub label: Option<String>,
    /// Fill color of the unit.
    pub color: Color,
}

/// Tower drawn on its cell together with its detection radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPresentation {
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// World-space center of the tower.
    pub center: Vec2,
    /// Detection radius expressed in world units.
    pub range_radius: f32,
    /// Fill color of the tower, dimmed while cooling down.
    pub color: Color,
}

/// Outcome of hovering a cell while considering a tower placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Hovered cell.
    pub cell: CellCoord,
    /// Result the engine reported for the cell.
    pub verdict: Result<(), PlacementError>,
}

/// Text shown above the play area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Economy counters and lifecycle flags.
    pub summary: SessionSummary,
    /// Short status line such as `running` or `complete`.
    pub status: String,
}

impl HudPresentation {
    /// Builds the heads-up display from a session summary.
    #[must_use]
    pub fn from_summary(summary: SessionSummary) -> Self {
        let status = if summary.complete {
            "complete"
        } else if summary.paused {
            "paused"
        } else {
            "running"
        };

        Self {
            summary,
            status: status.to_owned(),
        }
    }
}

/// Scene description combining the grid, routes and every live entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid that composes the play area.
    pub tile_grid: TileGridPresentation,
    /// World-space center of the hub.
    pub hub: Vec2,
    /// Routes in index order.
    pub routes: Vec<RoutePresentation>,
    /// Placed towers.
    pub towers: Vec<TowerPresentation>,
    /// Data units walking the delivery route, captioned with their word.
    pub data_units: Vec<UnitPresentation>,
    /// Hostile units walking the hostile routes.
    pub hostiles: Vec<UnitPresentation>,
    /// World-space positions of projectiles in flight.
    pub projectiles: Vec<Vec2>,
    /// Optional placement preview for the hovered cell.
    pub placement_preview: Option<PlacementPreview>,
    /// Heads-up display contents.
    pub hud: HudPresentation,
}

impl Scene {
    /// Converts a session snapshot into world-space scene content.
    #[must_use]
    pub fn from_snapshot(
        snapshot: &SessionSnapshot,
        tile_grid: TileGridPresentation,
        palette: &Palette,
    ) -> Self {
        let routes = snapshot
            .routes
            .iter()
            .map(|route| RoutePresentation {
                index: route.index(),
                points: route
                    .points()
                    .iter()
                    .map(|cell| tile_grid.cell_center(*cell))
                    .collect(),
                truncated: !route.reached_hub(),
                color: palette.route(route.index()),
            })
            .collect();

        let towers = snapshot
            .towers
            .iter()
            .map(|tower| TowerPresentation {
                cell: tower.cell,
                center: tile_grid.cell_center(tower.cell),
                range_radius: tower.range * tile_grid.cell_length,
                color: if tower.is_ready() {
                    palette.tower
                } else {
                    palette.tower.lighten(0.5)
                },
            })
            .collect();

        let data_units = snapshot
            .data_units
            .iter()
            .map(|unit| UnitPresentation {
                position: tile_grid.to_world(unit.position),
                health_ratio: unit.health_ratio(),
                label: Some(unit.word.clone()),
                color: palette.data_unit,
            })
            .collect();

        let hostiles = snapshot
            .hostiles
            .iter()
            .map(|hostile| UnitPresentation {
                position: tile_grid.to_world(hostile.position),
                health_ratio: hostile.health_ratio(),
                label: None,
                color: palette.hostile.lighten(1.0 - hostile.health_ratio()),
            })
            .collect();

        let projectiles = snapshot
            .projectiles
            .iter()
            .map(|projectile| tile_grid.to_world(projectile.position))
            .collect();

        Self {
            tile_grid,
            hub: tile_grid.cell_center(snapshot.layout.hub()),
            routes,
            towers,
            data_units,
            hostiles,
            projectiles,
            placement_preview: None,
            hud: HudPresentation::from_summary(snapshot.summary),
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Colors used for scene elements.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Word Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the update closure asks it to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and per-frame input captured by the adapter, and rebuilds the scene
    /// before it is presented.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameControl;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Cells must have a positive, finite side length.
    #[error("cell_length must be a positive finite number (received {cell_length})")]
    InvalidCellLength {
        /// Provided length that failed validation.
        cell_length: f32,
    },
}
