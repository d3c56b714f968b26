//! # reel-battle
//!
//! Spell resolution and turn engine for a slot-reel battler.
//!
//! A grid of reels produces spells each turn. The centre row is cast
//! left to right through a small rules engine: conditions inspect the
//! board and can trigger extra effects, boost potency or skip the cast;
//! effects resolve their targets and change health, shields, statuses or
//! the spell itself. Enemies answer with pre-rolled intents.
//!
//! ## Design Principles
//!
//! 1. **Never fail a turn**: The cast and turn path has no error type.
//!    Unknown content fails closed, missing data is a no-op, and every
//!    anomaly is logged through `tracing` where it is detected.
//!
//! 2. **Data-driven content**: Spells, conditions, effects and enemies
//!    are plain serde data loaded from JSON.
//!
//! 3. **Presentation at arm's length**: Audio, flashes and pacing go
//!    through the `Feedback` and `Scheduler` hooks. Tests run with no-op
//!    implementations.
//!
//! ## Architecture
//!
//! - **Closed variant sets**: Conditions and effects are enums matched
//!   exhaustively rather than open trait objects.
//!
//! - **Persistent roster**: The enemy roster is an `im::Vector`, so each
//!   cast snapshots the line-up in O(1).
//!
//! - **Deterministic**: Reel spins and intent rolls use seeded ChaCha
//!   streams.
//!
//! ## Modules
//!
//! - `core`: IDs, cell positions, RNG, configuration
//! - `combat`: Combatants, statuses, the combat manager, change records
//! - `spells`: Spell definitions, runtime spells, the content library
//! - `grid`: Reels, the spell grid and the read-only grid view
//! - `effects`: Effects, target resolution, effect application
//! - `conditions`: Grid-position, adjacency and composite conditions
//! - `cast`: The per-spell cast pipeline
//! - `battle`: Turn phases, enemy intents and the battle sequencer
//! - `presentation`: Feedback and scheduling hooks

pub mod core;
pub mod combat;
pub mod spells;
pub mod grid;
pub mod effects;
pub mod conditions;
pub mod cast;
pub mod battle;
pub mod presentation;

// Re-export commonly used types
pub use crate::core::{
    CellPos, CombatantId, SpellId,
    BattleRng,
    BattleConfig, ConfigError, WaitTimings,
};

pub use crate::combat::{
    Combatant, Side, DamageResult,
    CombatManager, CombatEvent,
    StatusController, StatusEffectInstance, OverTimeKind, TickTiming,
};

pub use crate::spells::{
    SpellColor, SpellDefinition, RuntimeSpell,
    SpellLibrary, EnemyDefinition, LibraryError,
};

pub use crate::grid::{GridView, Reel, SpellGrid};

pub use crate::effects::{
    Effect, EffectKind, TargetType, TargetingMode,
    TargetingContext, TargetResolver, EffectResolver,
};

pub use crate::conditions::{
    Condition, ConditionResult, Outcome,
    GridPositionCondition, GridPredicate,
    AdjacencyCondition, AdjacencyScope, Comparison,
    CompositeCondition, CompositeOp,
};

pub use crate::cast::{CastContext, CastOutcome, CastReport, SpellCaster};

pub use crate::battle::{Battle, BattleOutcome, BattlePhase, IntentPool};

pub use crate::presentation::{
    Feedback, NoFeedback,
    Scheduler, ImmediateScheduler, RecordingScheduler, WaitKind, WaitStep,
};
