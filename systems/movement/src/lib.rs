#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that advances units along their routes.

use word_defence_core::{Command, DataUnitView, Event, HostileView};

/// Pure system that reacts to elapsed time and emits progress commands.
///
/// Data units are always emitted before hostile units so a word that reaches
/// the hub in the same tick as a hostile is delivered before it can be
/// corrupted.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Consumes world events and immutable views to emit movement commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        data_units: &DataUnitView,
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

        for unit in data_units.iter() {
            out.push(Command::AdvanceDataUnit {
                unit: unit.id,
                progress: unit.progress + unit.speed * elapsed,
            });
        }

        for hostile in hostiles.iter() {
            out.push(Command::AdvanceHostile {
                hostile: hostile.id,
                progress: hostile.progress + hostile.speed * elapsed,
            });
        }
    }
}
