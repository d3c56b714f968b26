//! Casting a single spell.
//!
//! - `CastContext`: the board, casting cell and targeting snapshot
//! - `SpellCaster`: the condition pass, main effects, charge and cleanup
//!
//! One cast runs to completion before the next begins; the battle
//! sequencer guarantees that ordering.

mod caster;
mod context;

pub use caster::{CastOutcome, CastReport, SpellCaster};
pub use context::CastContext;
