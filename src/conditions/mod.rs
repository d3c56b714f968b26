//! Spell conditions.
//!
//! Conditions let a spell react to the board it was cast from:
//! - `GridPositionCondition`: where the casting cell is
//! - `AdjacencyCondition`: what surrounds it, with a match count
//! - `CompositeCondition`: AND / OR / NOT over two child conditions
//!
//! Each passing condition yields one `Outcome`: trigger an extra
//! effect, multiply the cast's potency, or skip the main effects.
//! Unknown scopes, comparisons and predicates evaluate to `false`.

mod adjacency;
mod composite;
mod condition;
mod grid_position;
mod outcome;

pub use adjacency::{AdjacencyCondition, AdjacencyScope, Comparison};
pub use composite::{CompositeCondition, CompositeOp};
pub use condition::{Condition, Evaluation};
pub use grid_position::{GridPositionCondition, GridPredicate};
pub use outcome::{ConditionResult, Outcome};
