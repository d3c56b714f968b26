//! The condition family and its shared contract.

use serde::{Deserialize, Serialize};

use super::adjacency::AdjacencyCondition;
use super::composite::CompositeCondition;
use super::grid_position::GridPositionCondition;
use super::outcome::ConditionResult;
use crate::cast::CastContext;
use crate::effects::Effect;
use crate::spells::RuntimeSpell;

/// A condition attached to a spell.
///
/// Conditions are pure predicates over the board at cast time. The cast
/// pipeline evaluates them in authored order and acts on the outcome of
/// each one that passes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Condition {
    GridPosition(GridPositionCondition),
    Adjacency(AdjacencyCondition),
    Composite(CompositeCondition),
}

/// Result of evaluating a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub passed: bool,
    /// Match count, for adjacency conditions that inspected the grid.
    pub matches: Option<u32>,
}

impl Evaluation {
    const FAILED: Self = Self {
        passed: false,
        matches: None,
    };
}

impl Condition {
    /// Whether the condition holds for `spell` cast in `cx`.
    #[must_use]
    pub fn evaluate(&self, spell: &RuntimeSpell, cx: &CastContext<'_>) -> bool {
        self.evaluate_detailed(spell, cx).passed
    }

    /// Evaluate, keeping the adjacency match count.
    #[must_use]
    pub fn evaluate_detailed(&self, spell: &RuntimeSpell, cx: &CastContext<'_>) -> Evaluation {
        match self {
            Self::GridPosition(condition) => Evaluation {
                passed: condition.evaluate(cx.cell, cx.grid),
                matches: None,
            },
            Self::Adjacency(condition) => match condition.count_matches(spell, cx.cell, cx.grid) {
                Some(matches) => Evaluation {
                    passed: condition.passes(matches),
                    matches: Some(matches),
                },
                None => Evaluation::FAILED,
            },
            Self::Composite(condition) => Evaluation {
                passed: condition.evaluate(spell, cx),
                matches: None,
            },
        }
    }

    #[must_use]
    pub fn result_type(&self) -> ConditionResult {
        match self {
            Self::GridPosition(condition) => condition.outcome.result_type(),
            Self::Adjacency(condition) => condition.outcome.result_type(),
            Self::Composite(_) => ConditionResult::TriggerEffect,
        }
    }

    /// The effect applied when a `TriggerEffect` condition passes.
    #[must_use]
    pub fn linked_effect(&self) -> Option<&Effect> {
        match self {
            Self::GridPosition(condition) => condition.outcome.linked_effect(),
            Self::Adjacency(condition) => condition.outcome.linked_effect(),
            Self::Composite(condition) => condition.effect.as_ref(),
        }
    }

    /// The multiplier applied when a `ModifyPotency` condition passes.
    #[must_use]
    pub fn potency_multiplier(&self) -> f32 {
        match self {
            Self::GridPosition(condition) => condition.outcome.potency_multiplier(),
            Self::Adjacency(condition) => condition.outcome.potency_multiplier(),
            Self::Composite(_) => 1.0,
        }
    }

    /// The linked effect as it should be applied after `evaluation`.
    ///
    /// Scaling adjacency conditions multiply a scalable effect by the
    /// match count. The authored effect is never modified.
    #[must_use]
    pub fn effect_for(&self, evaluation: &Evaluation) -> Option<Effect> {
        let effect = self.linked_effect()?;
        match (self, evaluation.matches) {
            (Self::Adjacency(condition), Some(matches))
                if condition.scale_effect_with_matches && effect.supports_scaling() =>
            {
                Some(effect.scaled(matches))
            }
            _ => Some(effect.clone()),
        }
    }
}

impl From<GridPositionCondition> for Condition {
    fn from(condition: GridPositionCondition) -> Self {
        Self::GridPosition(condition)
    }
}

impl From<AdjacencyCondition> for Condition {
    fn from(condition: AdjacencyCondition) -> Self {
        Self::Adjacency(condition)
    }
}

impl From<CompositeCondition> for Condition {
    fn from(condition: CompositeCondition) -> Self {
        Self::Composite(condition)
    }
}
