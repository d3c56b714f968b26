//! Core engine types: identifiers, RNG, configuration.
//!
//! This module contains the building blocks shared by every other module.
//! Hosts configure the engine via `BattleConfig` rather than modifying it.

pub mod ids;
pub mod rng;
pub mod config;

pub use ids::{CellPos, CombatantId, SpellId};
pub use rng::BattleRng;
pub use config::{BattleConfig, ConfigError, WaitTimings};
