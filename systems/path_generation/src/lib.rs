#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Procedural route generation for the delivery and hostile routes.
//!
//! Each route starts on a fixed boundary cell and walks one cell at a time
//! towards the hub. Most steps follow the axis with the greater remaining
//! distance; the rest wiggle perpendicular to it, which gives the routes their
//! organic shape. A step budget bounds every walk so generation terminates even
//! under an unlucky run of wiggles.

use rand::Rng;
use word_defence_core::{CellCoord, GridLayout, PathConfig, Route, RouteIndex, ROUTE_COUNT};

/// Result of a single bounded walk towards the hub.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Walk {
    /// Cells visited in order, starting with the origin.
    pub points: Vec<CellCoord>,
    /// Whether the walk ended on the goal before the step budget ran out.
    pub reached_goal: bool,
}

/// Generates all four routes of a session in index order.
pub fn generate_routes<R>(
    layout: GridLayout,
    tuning: &PathConfig,
    rng: &mut R,
) -> [Route; ROUTE_COUNT]
where
    R: Rng + ?Sized,
{
    RouteIndex::ALL.map(|index| generate_route(layout, index, tuning, &mut *rng))
}

/// Generates a single route, retrying until it reaches the hub.
///
/// When every attempt exhausts its step budget the last partial walk is kept
/// and the returned route reports `reached_hub() == false`.
pub fn generate_route<R>(
    layout: GridLayout,
    index: RouteIndex,
    tuning: &PathConfig,
    rng: &mut R,
) -> Route
where
    R: Rng + ?Sized,
{
    let origin = layout.route_origin(index);
    let hub = layout.hub();
    let attempts = tuning.attempts.max(1);
    let shortest = origin.manhattan_distance(hub) as usize + 1;

    let mut partial = vec![origin];
    for attempt in 1..=attempts {
        let attempt_walk = walk(
            layout,
            origin,
            hub,
            tuning.goal_bias,
            tuning.step_budget,
            rng,
        );
        if attempt_walk.reached_goal {
            tracing::debug!(
                route = index.get(),
                attempt,
                length = attempt_walk.points.len(),
                detour = attempt_walk.points.len().saturating_sub(shortest),
                "route generated"
            );
            return Route::new(index, attempt_walk.points, true);
        }
        partial = attempt_walk.points;
    }

    tracing::warn!(
        route = index.get(),
        attempts,
        length = partial.len(),
        "route generation exhausted its step budget before reaching the hub"
    );
    Route::new(index, partial, false)
}

/// Walks from `origin` towards `goal`, taking at most `step_budget` steps.
///
/// `goal_bias` is the probability of stepping along the dominant axis. Every
/// step is clamped to the grid, so a wiggle against an edge leaves the walker
/// in place.
pub fn walk<R>(
    layout: GridLayout,
    origin: CellCoord,
    goal: CellCoord,
    goal_bias: f32,
    step_budget: u32,
    rng: &mut R,
) -> Walk
where
    R: Rng + ?Sized,
{
    let bias = if goal_bias.is_finite() {
        f64::from(goal_bias.clamp(0.0, 1.0))
    } else {
        1.0
    };
    let max_column = i64::from(layout.columns().saturating_sub(1));
    let max_row = i64::from(layout.rows().saturating_sub(1));

    let mut current = origin;
    let mut points = vec![origin];
    let mut steps = 0;

    while current != goal && steps < step_budget {
        steps += 1;

        let dx = i64::from(goal.column()) - i64::from(current.column());
        let dy = i64::from(goal.row()) - i64::from(current.row());
        let horizontal = dx.abs() >= dy.abs();

        let mut column = i64::from(current.column());
        let mut row = i64::from(current.row());

        if rng.gen_bool(bias) {
            if horizontal {
                column += dx.signum();
            } else {
                row += dy.signum();
            }
        } else {
            let sign = if rng.gen_bool(0.5) { 1 } else { -1 };
            if horizontal {
                row += sign;
            } else {
                column += sign;
            }
        }

        let next = CellCoord::new(
            column.clamp(0, max_column) as u32,
            row.clamp(0, max_row) as u32,
        );
        if next != current {
            points.push(next);
            current = next;
        }
    }

    Walk {
        points,
        reached_goal: current == goal,
    }
}
