//! Battle configuration.
//!
//! Hosts configure the engine at startup by providing a `BattleConfig`:
//! - Grid shape (reel count, rows per reel, actionable row)
//! - Player health
//! - RNG seed
//! - `WaitTimings` for the pauses between visual beats
//!
//! Every field has a default, so a config file only needs to name what
//! it changes:
//!
//! ```
//! use reel_battle::core::BattleConfig;
//!
//! let config = BattleConfig::from_json(r#"{ "player_max_hp": 30 }"#).unwrap();
//! assert_eq!(config.player_max_hp, 30);
//! assert_eq!(config.reel_count, 5);
//! assert_eq!(config.center_row(), 1);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating a `BattleConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse battle config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("grid must have at least one reel")]
    NoReels,

    #[error("reels must have at least one row")]
    NoRows,

    #[error("center row {row} is outside a {rows}-row reel")]
    CenterRowOutOfRange { row: usize, rows: usize },

    #[error("player max hp must be positive, got {0}")]
    NonPositiveHp(i32),
}

/// Durations of the named suspension points in a turn, in milliseconds.
///
/// These are scheduling delays for a presentation layer, never deadlines.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitTimings {
    /// Pause before a side's turn begins resolving.
    pub pre_turn_ms: u64,
    /// Pause between two player casts.
    pub cast_gap_ms: u64,
    /// Pause between two enemy actions.
    pub enemy_action_gap_ms: u64,
    /// Pause after a side's turn finishes resolving.
    pub post_turn_ms: u64,
}

impl Default for WaitTimings {
    fn default() -> Self {
        Self {
            pre_turn_ms: 500,
            cast_gap_ms: 400,
            enemy_action_gap_ms: 600,
            post_turn_ms: 500,
        }
    }
}

impl WaitTimings {
    /// Zero-length waits, for tests and headless simulation.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            pre_turn_ms: 0,
            cast_gap_ms: 0,
            enemy_action_gap_ms: 0,
            post_turn_ms: 0,
        }
    }

    #[must_use]
    pub fn pre_turn(&self) -> Duration {
        Duration::from_millis(self.pre_turn_ms)
    }

    #[must_use]
    pub fn cast_gap(&self) -> Duration {
        Duration::from_millis(self.cast_gap_ms)
    }

    #[must_use]
    pub fn enemy_action_gap(&self) -> Duration {
        Duration::from_millis(self.enemy_action_gap_ms)
    }

    #[must_use]
    pub fn post_turn(&self) -> Duration {
        Duration::from_millis(self.post_turn_ms)
    }
}

/// Complete battle configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Number of reels (grid columns).
    pub reel_count: usize,

    /// Visible rows per reel.
    pub rows_per_reel: usize,

    /// The actionable row. `None` uses the middle row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center_row: Option<usize>,

    /// Player starting and maximum health.
    pub player_max_hp: i32,

    /// Seed for reel spins and intent rolls.
    pub seed: u64,

    /// Suspension point durations.
    pub timings: WaitTimings,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            reel_count: 5,
            rows_per_reel: 3,
            center_row: None,
            player_max_hp: 20,
            seed: 0,
            timings: WaitTimings::default(),
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the grid shape and health values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reel_count == 0 {
            return Err(ConfigError::NoReels);
        }
        if self.rows_per_reel == 0 {
            return Err(ConfigError::NoRows);
        }
        if let Some(row) = self.center_row {
            if row >= self.rows_per_reel {
                return Err(ConfigError::CenterRowOutOfRange {
                    row,
                    rows: self.rows_per_reel,
                });
            }
        }
        if self.player_max_hp <= 0 {
            return Err(ConfigError::NonPositiveHp(self.player_max_hp));
        }
        Ok(())
    }

    /// The actionable row index.
    #[must_use]
    pub fn center_row(&self) -> usize {
        self.center_row.unwrap_or(self.rows_per_reel / 2)
    }

    /// Set the grid shape (builder pattern).
    #[must_use]
    pub fn with_grid(mut self, reels: usize, rows: usize) -> Self {
        self.reel_count = reels;
        self.rows_per_reel = rows;
        self
    }

    /// Set the player's max health (builder pattern).
    #[must_use]
    pub fn with_player_hp(mut self, hp: i32) -> Self {
        self.player_max_hp = hp;
        self
    }

    /// Set the RNG seed (builder pattern).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the wait timings (builder pattern).
    #[must_use]
    pub fn with_timings(mut self, timings: WaitTimings) -> Self {
        self.timings = timings;
        self
    }
}
