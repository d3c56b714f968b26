//! Battle flow: turn phases, enemy intents and the sequencer.
//!
//! - `Battle`: owns combat state, the grid and intents; drives turns
//! - `BattlePhase`: the turn state machine's states
//! - `IntentPool`: weighted enemy spells with a pre-rolled intent

mod intent;
mod phase;
mod sequencer;

pub use intent::IntentPool;
pub use phase::{BattleOutcome, BattlePhase};
pub use sequencer::Battle;
