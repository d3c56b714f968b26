//! What a condition does when it passes.

use serde::{Deserialize, Serialize};

use crate::effects::Effect;

/// Result type reported by a condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConditionResult {
    TriggerEffect,
    ModifyPotency,
    SkipSpell,
}

/// Authored outcome of a passing condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result")]
pub enum Outcome {
    /// Apply `effect` in addition to the spell's main effects.
    /// A missing effect is a no-op.
    TriggerEffect {
        #[serde(default)]
        effect: Option<Effect>,
    },

    /// Multiply this cast's potency.
    ModifyPotency { multiplier: f32 },

    /// Abort the main-effect pass.
    SkipSpell,
}

impl Outcome {
    #[must_use]
    pub fn trigger(effect: Effect) -> Self {
        Self::TriggerEffect { effect: Some(effect) }
    }

    #[must_use]
    pub fn potency(multiplier: f32) -> Self {
        Self::ModifyPotency { multiplier }
    }

    #[must_use]
    pub fn result_type(&self) -> ConditionResult {
        match self {
            Self::TriggerEffect { .. } => ConditionResult::TriggerEffect,
            Self::ModifyPotency { .. } => ConditionResult::ModifyPotency,
            Self::SkipSpell => ConditionResult::SkipSpell,
        }
    }

    #[must_use]
    pub fn linked_effect(&self) -> Option<&Effect> {
        match self {
            Self::TriggerEffect { effect } => effect.as_ref(),
            _ => None,
        }
    }

    /// The potency multiplier, 1.0 for non-potency outcomes.
    #[must_use]
    pub fn potency_multiplier(&self) -> f32 {
        match self {
            Self::ModifyPotency { multiplier } => *multiplier,
            _ => 1.0,
        }
    }
}
