//! Effect definitions.
//!
//! Effects are the numeric building blocks of spells. Each one names a
//! kind (damage, heal, ...), a base amount, and which side it aims at.
//!
//! ## Magnitude
//!
//! ```text
//! magnitude = round(base * spell potency * condition scale)
//! ```
//!
//! Potency comes from the casting `RuntimeSpell` and starts at 1.0 each
//! cast. Scale is a match count pushed in by an adjacency condition and
//! defaults to 1.
//!
//! ## Spell-internal effects
//!
//! `Charge` and `Tally` change the casting spell instance rather than a
//! combatant, so they always target the caster's own spell.

use serde::{Deserialize, Serialize};

use crate::combat::{OverTimeKind, TickTiming};

/// Which side an effect is aimed at, relative to the caster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetType {
    Ally,
    Enemy,
}

/// How the concrete target list is chosen.
///
/// Unrecognized modes in content deserialize to `Unknown`, which resolves
/// to no targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingMode {
    #[serde(rename = "Self")]
    SelfTarget,
    SingleEnemy,
    AllEnemies,
    SingleAlly,
    AllAllies,
    #[serde(other)]
    Unknown,
}

/// The kind of change an effect makes, with its base numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EffectKind {
    // === Combatant effects ===

    /// Damage, absorbed by shield first.
    Damage { amount: i32 },

    /// Healing, clamped to max HP.
    Heal { amount: i32 },

    /// Additive, unbounded shield.
    Shield { amount: i32 },

    /// Attach a timed status. Potency scales the per-tick amount; a
    /// condition match count scales the duration.
    OverTime {
        kind: OverTimeKind,
        amount: i32,
        duration: u32,
        #[serde(default)]
        timing: TickTiming,
    },

    // === Spell-internal effects ===

    /// Add charges to the casting spell.
    Charge { amount: i32 },

    /// Shift the casting spell's tally.
    Tally { amount: i32 },
}

fn unit_scale() -> u32 {
    1
}

/// An effect as authored on a spell or condition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(flatten)]
    pub kind: EffectKind,

    /// Side to aim at. `None` picks the natural side for the kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetType>,

    /// Targeting mode. `None` picks the natural mode for the side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targeting: Option<TargetingMode>,

    /// Condition match-count multiplier. Runtime only.
    #[serde(skip, default = "unit_scale")]
    scale: u32,
}

impl Effect {
    /// Create an effect aimed at its natural side.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target: None,
            targeting: None,
            scale: 1,
        }
    }

    #[must_use]
    pub fn damage(amount: i32) -> Self {
        Self::new(EffectKind::Damage { amount })
    }

    #[must_use]
    pub fn heal(amount: i32) -> Self {
        Self::new(EffectKind::Heal { amount })
    }

    #[must_use]
    pub fn shield(amount: i32) -> Self {
        Self::new(EffectKind::Shield { amount })
    }

    #[must_use]
    pub fn charge(amount: i32) -> Self {
        Self::new(EffectKind::Charge { amount })
    }

    #[must_use]
    pub fn tally(amount: i32) -> Self {
        Self::new(EffectKind::Tally { amount })
    }

    #[must_use]
    pub fn over_time(kind: OverTimeKind, amount: i32, duration: u32, timing: TickTiming) -> Self {
        Self::new(EffectKind::OverTime {
            kind,
            amount,
            duration,
            timing,
        })
    }

    /// Aim at a specific side (builder pattern).
    #[must_use]
    pub fn at(mut self, target: TargetType) -> Self {
        self.target = Some(target);
        self
    }

    /// Use a specific targeting mode (builder pattern).
    #[must_use]
    pub fn with_targeting(mut self, mode: TargetingMode) -> Self {
        self.targeting = Some(mode);
        self
    }

    /// Whether the effect changes the casting spell instead of a combatant.
    #[must_use]
    pub fn is_spell_internal(&self) -> bool {
        matches!(self.kind, EffectKind::Charge { .. } | EffectKind::Tally { .. })
    }

    /// The side this effect aims at.
    #[must_use]
    pub fn target_type(&self) -> TargetType {
        if let Some(target) = self.target {
            return target;
        }
        match &self.kind {
            EffectKind::Damage { .. } => TargetType::Enemy,
            EffectKind::OverTime { kind: OverTimeKind::Damage, .. } => TargetType::Enemy,
            _ => TargetType::Ally,
        }
    }

    /// The targeting mode, before any spell-level override.
    #[must_use]
    pub fn targeting_mode(&self) -> TargetingMode {
        if self.is_spell_internal() {
            return TargetingMode::SelfTarget;
        }
        if let Some(mode) = self.targeting {
            return mode;
        }
        match self.target_type() {
            TargetType::Enemy => TargetingMode::SingleEnemy,
            TargetType::Ally => TargetingMode::SelfTarget,
        }
    }

    /// Whether a condition match count may scale this effect.
    #[must_use]
    pub fn supports_scaling(&self) -> bool {
        !self.is_spell_internal()
    }

    #[must_use]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: u32) {
        self.scale = scale;
    }

    /// Copy of this effect with a different scale.
    #[must_use]
    pub fn scaled(&self, scale: u32) -> Self {
        let mut effect = self.clone();
        effect.scale = scale;
        effect
    }

    /// Base amount before potency and scale.
    #[must_use]
    pub fn base_amount(&self) -> i32 {
        match &self.kind {
            EffectKind::Damage { amount }
            | EffectKind::Heal { amount }
            | EffectKind::Shield { amount }
            | EffectKind::Charge { amount }
            | EffectKind::Tally { amount }
            | EffectKind::OverTime { amount, .. } => *amount,
        }
    }

    /// Final amount for a cast at `potency`.
    ///
    /// Over-time effects scale their duration rather than their per-tick
    /// amount, so only potency applies to them here.
    #[must_use]
    pub fn magnitude(&self, potency: f32) -> i32 {
        let scale = match self.kind {
            EffectKind::OverTime { .. } => 1.0,
            _ => self.scale as f32,
        };
        (self.base_amount() as f32 * potency * scale).round() as i32
    }

    /// Duration of an over-time effect after scaling.
    #[must_use]
    pub fn scaled_duration(&self) -> Option<u32> {
        match self.kind {
            EffectKind::OverTime { duration, .. } => Some(duration.saturating_mul(self.scale)),
            _ => None,
        }
    }
}
