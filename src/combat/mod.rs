//! Combat state: combatants, statuses and the combat manager.
//!
//! - `Combatant`: health, shield and statuses for one participant
//! - `StatusController`: timed over-time effects owned by a combatant
//! - `CombatManager`: the roster, plus every numeric change to it
//! - `CombatEvent`: change records for the presentation layer

mod combatant;
mod status;
mod manager;
mod events;

pub use combatant::{Combatant, DamageResult, Side};
pub use status::{
    OverTimeKind, StatusApplied, StatusController, StatusEffectInstance, StatusKey, StatusSource,
    StatusTick, TickReport, TickTiming,
};
pub use manager::CombatManager;
pub use events::CombatEvent;
