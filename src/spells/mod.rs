//! Spells: authored definitions and their runtime instances.
//!
//! - `SpellDefinition`: immutable authored data, shared by `Arc`
//! - `RuntimeSpell`: per-battle copy with charges, tally and potency
//! - `SpellLibrary`: definition registry and JSON content loading

mod definition;
mod instance;
mod library;

pub use definition::{SpellColor, SpellDefinition};
pub use instance::RuntimeSpell;
pub use library::{EnemyDefinition, IntentEntry, LibraryError, SpellLibrary};
