//! Boolean combinations of conditions.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::condition::Condition;
use crate::cast::CastContext;
use crate::effects::Effect;
use crate::spells::RuntimeSpell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompositeOp {
    And,
    Or,
    /// Negates `first`; `second` is ignored.
    Not,
}

/// Two child conditions under a boolean operator.
///
/// A composite always reports `TriggerEffect` with its own linked
/// effect. The children's outcomes are never applied; only their pass or
/// fail result is used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompositeCondition {
    pub op: CompositeOp,
    pub first: Box<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<Box<Condition>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<Effect>,
}

impl CompositeCondition {
    #[must_use]
    pub fn and(first: Condition, second: Condition, effect: Effect) -> Self {
        Self {
            op: CompositeOp::And,
            first: Box::new(first),
            second: Some(Box::new(second)),
            effect: Some(effect),
        }
    }

    #[must_use]
    pub fn or(first: Condition, second: Condition, effect: Effect) -> Self {
        Self {
            op: CompositeOp::Or,
            ..Self::and(first, second, effect)
        }
    }

    #[must_use]
    pub fn not(inner: Condition, effect: Effect) -> Self {
        Self {
            op: CompositeOp::Not,
            first: Box::new(inner),
            second: None,
            effect: Some(effect),
        }
    }

    /// Evaluate the children. A missing second child fails closed.
    #[must_use]
    pub fn evaluate(&self, spell: &RuntimeSpell, cx: &CastContext<'_>) -> bool {
        let second = || match &self.second {
            Some(condition) => condition.evaluate(spell, cx),
            None => {
                warn!(
                    op = ?self.op,
                    spell = spell.name(),
                    "composite condition missing its second child"
                );
                false
            }
        };
        match self.op {
            CompositeOp::And => self.first.evaluate(spell, cx) && second(),
            CompositeOp::Or => self.first.evaluate(spell, cx) || second(),
            CompositeOp::Not => !self.first.evaluate(spell, cx),
        }
    }
}
