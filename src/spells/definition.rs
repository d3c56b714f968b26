//! Spell definitions - authored, immutable spell data.
//!
//! `SpellDefinition` holds what a spell *is*: "Strike" deals 5 damage
//! to the leftmost enemy. Many `RuntimeSpell`s on the reels can share
//! one definition through an `Arc`.
//!
//! Per-battle mutable state (charges, tallies, potency) lives in
//! `RuntimeSpell`.

use serde::{Deserialize, Serialize};

use crate::conditions::Condition;
use crate::core::SpellId;
use crate::effects::{Effect, TargetingMode};

/// Colour family of a spell, used by colour-match conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellColor {
    #[default]
    Neutral,
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

/// Static spell definition.
///
/// ## Example
///
/// ```
/// use reel_battle::core::SpellId;
/// use reel_battle::effects::Effect;
/// use reel_battle::spells::{SpellColor, SpellDefinition};
///
/// let strike = SpellDefinition::new(SpellId::new(1), "Strike")
///     .with_color(SpellColor::Red)
///     .with_tag("attack")
///     .with_effect(Effect::damage(5));
///
/// assert!(strike.has_tag("attack"));
/// assert_eq!(strike.effects.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpellDefinition {
    /// Unique identifier for this definition.
    pub id: SpellId,

    /// Display name.
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub color: SpellColor,

    /// Capability tags ("attack", "fire", ...) for tag-match conditions.
    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub icon: Option<String>,

    /// Whether the spell tracks charges. Without charges the spell is
    /// treated as having unlimited uses.
    #[serde(default)]
    pub has_charges: bool,

    #[serde(default)]
    pub starting_charges: u32,

    /// Whether the spell tracks a tally counter.
    #[serde(default)]
    pub has_tallies: bool,

    #[serde(default)]
    pub starting_tally: i32,

    /// Main effects, applied in order when no condition skips the cast.
    #[serde(default)]
    pub effects: Vec<Effect>,

    /// Conditions, evaluated in order before the main effects.
    #[serde(default)]
    pub conditions: Vec<Condition>,

    /// Replaces the targeting mode of every combatant-targeting effect.
    #[serde(default)]
    pub targeting_override: Option<TargetingMode>,

    /// Audio cue played when the cast starts.
    #[serde(default)]
    pub cast_sound: Option<String>,

    /// Audio cue played when an effect lands.
    #[serde(default)]
    pub impact_sound: Option<String>,
}

impl SpellDefinition {
    /// Create a definition with no effects or conditions.
    #[must_use]
    pub fn new(id: SpellId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            color: SpellColor::default(),
            tags: Vec::new(),
            icon: None,
            has_charges: false,
            starting_charges: 0,
            has_tallies: false,
            starting_tally: 0,
            effects: Vec::new(),
            conditions: Vec::new(),
            targeting_override: None,
            cast_sound: None,
            impact_sound: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: SpellColor) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Enable charges, starting at `count`.
    #[must_use]
    pub fn with_charges(mut self, count: u32) -> Self {
        self.has_charges = true;
        self.starting_charges = count;
        self
    }

    /// Enable the tally counter, starting at `value`.
    #[must_use]
    pub fn with_tally(mut self, value: i32) -> Self {
        self.has_tallies = true;
        self.starting_tally = value;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn with_targeting(mut self, mode: TargetingMode) -> Self {
        self.targeting_override = Some(mode);
        self
    }

    #[must_use]
    pub fn with_sounds(mut self, cast: impl Into<String>, impact: impl Into<String>) -> Self {
        self.cast_sound = Some(cast.into());
        self.impact_sound = Some(impact.into());
        self
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
