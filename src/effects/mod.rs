//! Effect system for spell casts.
//!
//! Effects are the numeric building blocks of spells:
//! - `Effect`: damage, heal, shield, over-time, charge and tally
//! - `TargetResolver`: picks the combatants an effect lands on
//! - `EffectResolver`: applies an effect to combat state
//!
//! ## Design Philosophy
//!
//! Effects are plain data. They carry base amounts and targeting intent
//! but no behaviour; the resolvers interpret them against the current
//! `CombatManager` and the casting `RuntimeSpell`. This keeps every
//! runtime copy independently clonable.

mod effect;
mod targeting;
mod resolver;

pub use effect::{Effect, EffectKind, TargetType, TargetingMode};
pub use targeting::{TargetResolver, TargetingContext, Targets};
pub use resolver::EffectResolver;
