//! Engine configuration parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::ConfigError;

/// Engine configuration parameters.
///
/// Every field has a default, so a JSON document only needs the fields it
/// overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rounds per lap. `max_rounds = laps * blocks_per_lap`.
    pub blocks_per_lap: u32,

    /// Probability that a participant receives a boost after a round.
    pub boost_chance: f64,

    /// Faces on each die. Rolls are uniform in `[1, dice_sides]`.
    pub dice_sides: i32,

    /// Pause between rounds during a full simulation, in milliseconds.
    /// Presentation only; 0 runs the simulation flat out.
    pub round_delay_ms: u64,

    /// Default number of entries returned by history listings.
    pub history_limit: usize,

    /// Most completed races the service keeps. Older entries are dropped.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blocks_per_lap: 5,
            boost_chance: 0.3,
            dice_sides: 6,
            round_delay_ms: 0,
            history_limit: 20,
            history_capacity: 100,
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON, filling missing fields with defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the resulting values fail
    /// `validate()`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.boost_chance) {
            return Err(ConfigError::BoostChance(self.boost_chance));
        }
        if self.blocks_per_lap == 0 {
            return Err(ConfigError::ZeroBlocksPerLap);
        }
        if self.dice_sides < 1 {
            return Err(ConfigError::DiceSides(self.dice_sides));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }
        Ok(())
    }

    /// Pacing delay as a `Duration`.
    #[must_use]
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    /// Set the pacing delay between simulated rounds.
    #[must_use]
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Set the per-round boost probability.
    #[must_use]
    pub fn with_boost_chance(mut self, chance: f64) -> Self {
        self.boost_chance = chance;
        self
    }

    /// Set the number of rounds per lap.
    #[must_use]
    pub fn with_blocks_per_lap(mut self, blocks: u32) -> Self {
        self.blocks_per_lap = blocks;
        self
    }

    /// Set the number of faces on each die.
    #[must_use]
    pub fn with_dice_sides(mut self, sides: i32) -> Self {
        self.dice_sides = sides;
        self
    }

    /// Set the default history listing size.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    /// Set how many completed races are retained.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}
