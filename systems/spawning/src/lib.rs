#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting data and hostile spawn commands.
//!
//! Both spawn kinds run on tick-relative countdowns that start expired, so the
//! first running tick spawns immediately. Each tick emits at most one command
//! per kind regardless of how much time elapsed.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use word_defence_core::{Command, Event, RouteIndex};

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    delivery_interval: Duration,
    hostile_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadences and seed.
    #[must_use]
    pub const fn new(delivery_interval: Duration, hostile_interval: Duration, rng_seed: u64) -> Self {
        Self {
            delivery_interval,
            hostile_interval,
            rng_seed,
        }
    }
}

/// Queue state the spawning decision depends on, captured before the tick spawns anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnInputs {
    /// Words still waiting in the queue.
    pub pending_words: usize,
    /// Data units walking the delivery route.
    pub active_data_units: usize,
}

/// Pure system that emits spawn commands whenever a countdown expires.
#[derive(Debug)]
pub struct Spawning {
    delivery_interval: Duration,
    hostile_interval: Duration,
    delivery_countdown: Duration,
    hostile_countdown: Duration,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            delivery_interval: config.delivery_interval,
            hostile_interval: config.hostile_interval,
            delivery_countdown: Duration::ZERO,
            hostile_countdown: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Expires both countdowns so the next running tick spawns immediately.
    pub fn reset(&mut self) {
        self.delivery_countdown = Duration::ZERO;
        self.hostile_countdown = Duration::ZERO;
    }

    /// Consumes the tick's events and queue state to emit spawn commands.
    ///
    /// Nothing happens unless the events report elapsed time.
    pub fn handle(&mut self, events: &[Event], inputs: SpawnInputs, out: &mut Vec<Command>) {
        let mut elapsed = None;
        for event in events {
            if let Event::TimeAdvanced { dt } = event {
                elapsed = Some(elapsed.unwrap_or(Duration::ZERO).saturating_add(*dt));
            }
        }

        let Some(elapsed) = elapsed else {
            return;
        };

        self.delivery_countdown = self.delivery_countdown.saturating_sub(elapsed);
        self.hostile_countdown = self.hostile_countdown.saturating_sub(elapsed);

        if inputs.pending_words > 0 && self.delivery_countdown.is_zero() {
            self.delivery_countdown = self.delivery_interval;
            out.push(Command::SpawnDataUnit);
        }

        let data_in_play = inputs.pending_words > 0 || inputs.active_data_units > 0;
        if data_in_play && self.hostile_countdown.is_zero() {
            self.hostile_countdown = self.hostile_interval;
            let route = self.select_route();
            out.push(Command::SpawnHostile { route });
        }
    }

    fn select_route(&mut self) -> RouteIndex {
        let index = self.rng.gen_range(0..RouteIndex::HOSTILE.len());
        RouteIndex::HOSTILE[index]
    }
}
