//! Session tuning loaded once before the simulation starts.
//!
//! Every section derives `Deserialize` with `#[serde(default)]`, so a TOML file
//! only needs to name the values it overrides.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::GridLayout;

/// Smallest grid edge that keeps the hub zone clear of all four route origins.
const MIN_GRID_EDGE: u32 = 5;

/// Aggregated tuning knobs for a single session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Play field dimensions.
    pub grid: GridConfig,
    /// Starting balance, rewards, and score awards.
    pub economy: EconomyConfig,
    /// Tower cost and combat parameters.
    pub tower: TowerConfig,
    /// Data unit parameters and spawn cadence.
    pub delivery: DeliveryConfig,
    /// Hostile unit parameters and spawn cadence.
    pub hostile: HostileConfig,
    /// Characters used when a hostile unit corrupts delivered data.
    pub corruption: CorruptionConfig,
    /// Route generation parameters.
    pub paths: PathConfig,
    /// Seed for every random decision in the session; drawn from entropy when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Checks that the configuration describes a playable session.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridConfig { columns, rows } = self.grid;
        if columns < MIN_GRID_EDGE || rows < MIN_GRID_EDGE {
            return Err(ConfigError::GridTooSmall { columns, rows });
        }

        positive("delivery.spawn_interval_ms", self.delivery.spawn_interval_ms)?;
        positive("hostile.spawn_interval_ms", self.hostile.spawn_interval_ms)?;
        positive("delivery.hit_points", u64::from(self.delivery.hit_points))?;
        positive("hostile.hit_points", u64::from(self.hostile.hit_points))?;
        positive("paths.step_budget", u64::from(self.paths.step_budget))?;
        positive("paths.attempts", u64::from(self.paths.attempts))?;

        non_negative("delivery.speed", self.delivery.speed)?;
        non_negative("hostile.speed", self.hostile.speed)?;
        non_negative("tower.range", self.tower.range)?;
        non_negative("tower.projectile_speed", self.tower.projectile_speed)?;
        if self.tower.projectile_speed == 0.0 {
            return Err(ConfigError::ZeroValue {
                field: "tower.projectile_speed",
            });
        }

        let bias = self.paths.goal_bias;
        if !(0.0..=1.0).contains(&bias) {
            return Err(ConfigError::GoalBias(bias));
        }

        if self.corruption.alphabet.chars().next().is_none() {
            return Err(ConfigError::EmptyAlphabet);
        }

        Ok(())
    }
}

/// Play field dimensions measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of columns.
    pub columns: u32,
    /// Number of rows.
    pub rows: u32,
}

impl GridConfig {
    /// Layout described by the configured dimensions.
    #[must_use]
    pub const fn layout(&self) -> GridLayout {
        GridLayout::new(self.columns, self.rows)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 20,
            rows: 15,
        }
    }
}

/// Starting balance and the rewards granted by the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Resource balance available when the session is created.
    pub starting_balance: u32,
    /// Resource granted when a data unit reaches the hub.
    pub delivery_reward: u32,
    /// Score granted when a data unit reaches the hub.
    pub delivery_score: u64,
    /// Resource granted when a tower destroys a hostile unit.
    pub kill_reward: u32,
    /// Score granted when a tower destroys a hostile unit.
    pub kill_score: u64,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            starting_balance: 100,
            delivery_reward: 10,
            delivery_score: 100,
            kill_reward: 15,
            kill_score: 25,
        }
    }
}

/// Tower cost and combat parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TowerConfig {
    /// Resource debited when a tower is placed.
    pub cost: u32,
    /// Detection range in grid units.
    pub range: f32,
    /// Damage applied by every projectile.
    pub damage: u32,
    /// Delay between consecutive shots in milliseconds.
    pub cooldown_ms: u64,
    /// Projectile flight speed in cells per second.
    pub projectile_speed: f32,
}

impl TowerConfig {
    /// Delay between consecutive shots.
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

impl Default for TowerConfig {
    fn default() -> Self {
        Self {
            cost: 50,
            range: 3.5,
            damage: 25,
            cooldown_ms: 800,
            projectile_speed: 8.0,
        }
    }
}

/// Data unit parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Hit points every data unit spawns with.
    pub hit_points: u32,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Minimum delay between two data unit spawns in milliseconds.
    pub spawn_interval_ms: u64,
}

impl DeliveryConfig {
    /// Minimum delay between two data unit spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            hit_points: 100,
            speed: 1.5,
            spawn_interval_ms: 1_500,
        }
    }
}

/// Hostile unit parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostileConfig {
    /// Hit points every hostile unit spawns with.
    pub hit_points: u32,
    /// Movement speed in cells per second.
    pub speed: f32,
    /// Collision damage carried by each unit. Reserved; never applied.
    pub damage: u32,
    /// Minimum delay between two hostile spawns in milliseconds.
    pub spawn_interval_ms: u64,
}

impl HostileConfig {
    /// Minimum delay between two hostile spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

impl Default for HostileConfig {
    fn default() -> Self {
        Self {
            hit_points: 60,
            speed: 1.2,
            damage: 10,
            spawn_interval_ms: 2_000,
        }
    }
}

/// Characters a corrupted entry is rebuilt from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorruptionConfig {
    /// Candidate characters; each corrupted character is drawn uniformly from this set.
    pub alphabet: String,
}

impl CorruptionConfig {
    /// Characters of the alphabet in declaration order.
    #[must_use]
    pub fn symbols(&self) -> Vec<char> {
        self.alphabet.chars().collect()
    }
}

impl Default for CorruptionConfig {
    fn default() -> Self {
        Self {
            alphabet: "#@$%&*!?~^".to_owned(),
        }
    }
}

/// Route generation parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Probability of stepping along the axis with the greater remaining distance.
    pub goal_bias: f32,
    /// Maximum number of steps a single generation attempt may take.
    pub step_budget: u32,
    /// Number of attempts made before a route that misses the hub is accepted.
    pub attempts: u32,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            goal_bias: 0.8,
            step_budget: 1_000,
            attempts: 8,
        }
    }
}

/// Reasons a [`SessionConfig`] may be rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid cannot hold the hub zone and four distinct route origins.
    #[error("grid of {columns}x{rows} cells is smaller than the 5x5 minimum")]
    GridTooSmall {
        /// Configured column count.
        columns: u32,
        /// Configured row count.
        rows: u32,
    },
    /// A value that must be positive was zero.
    #[error("{field} must be greater than zero")]
    ZeroValue {
        /// Dotted path of the offending field.
        field: &'static str,
    },
    /// A floating point value was negative or not finite.
    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidNumber {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Value found in the configuration.
        value: f32,
    },
    /// The goal bias is not a probability.
    #[error("paths.goal_bias must lie within 0.0..=1.0 (got {0})")]
    GoalBias(f32),
    /// The corruption alphabet holds no characters.
    #[error("corruption.alphabet must contain at least one character")]
    EmptyAlphabet,
}

fn positive(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::ZeroValue { field });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidNumber { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(SessionConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_intervals_match_canonical_cadence() {
        let config = SessionConfig::default();
        assert_eq!(
            config.delivery.spawn_interval(),
            Duration::from_millis(1_500)
        );
        assert_eq!(config.hostile.spawn_interval(), Duration::from_secs(2));
        assert_eq!(config.paths.step_budget, 1_000);
    }

    #[test]
    fn partial_toml_overrides_only_named_values() {
        let config: SessionConfig = toml::from_str(
            r#"
            seed = 7

            [tower]
            cost = 80

            [grid]
            columns = 31
            "#,
        )
        .expect("partial config parses");

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tower.cost, 80);
        assert_eq!(config.tower.damage, TowerConfig::default().damage);
        assert_eq!(config.grid.columns, 31);
        assert_eq!(config.grid.rows, GridConfig::default().rows);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn small_grid_is_rejected() {
        let mut config = SessionConfig::default();
        config.grid.rows = 4;
        assert_eq!(
            config.validate(),
            Err(ConfigError::GridTooSmall {
                columns: 20,
                rows: 4
            })
        );
    }

    #[test]
    fn zero_spawn_interval_is_rejected() {
        let mut config = SessionConfig::default();
        config.hostile.spawn_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroValue {
                field: "hostile.spawn_interval_ms"
            })
        );
    }

    #[test]
    fn zero_hostile_speed_is_accepted() {
        let mut config = SessionConfig::default();
        config.hostile.speed = 0.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_speed_and_bad_bias_are_rejected() {
        let mut config = SessionConfig::default();
        config.delivery.speed = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNumber {
                field: "delivery.speed",
                ..
            })
        ));

        let mut config = SessionConfig::default();
        config.paths.goal_bias = 1.5;
        assert_eq!(config.validate(), Err(ConfigError::GoalBias(1.5)));
    }

    #[test]
    fn empty_alphabet_is_rejected() {
        let mut config = SessionConfig::default();
        config.corruption.alphabet.clear();
        assert_eq!(config.validate(), Err(ConfigError::EmptyAlphabet));
    }
}
