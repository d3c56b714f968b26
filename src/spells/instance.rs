//! Runtime spells - per-battle mutable spell state.
//!
//! `RuntimeSpell` is what sits on a reel. It shares its
//! `SpellDefinition` through an `Arc` but owns deep copies of the
//! definition's effects and conditions, so scaling or tweaking one
//! instance never touches another.
//!
//! ## Transient state
//!
//! Potency and the skip/modified flags only live for one cast. The cast
//! pipeline resets them in its cleanup step.

use std::sync::Arc;

use tracing::warn;

use super::definition::SpellDefinition;
use crate::conditions::Condition;
use crate::core::SpellId;
use crate::effects::Effect;

/// A spell instance on a reel or in an enemy's intent pool.
#[derive(Clone, Debug)]
pub struct RuntimeSpell {
    definition: Arc<SpellDefinition>,

    charges: u32,
    tally: i32,
    previous_tally: i32,

    potency: f32,
    marked_to_skip: bool,
    potency_modified: bool,
    disabled: bool,

    effects: Vec<Effect>,
    conditions: Vec<Condition>,
}

impl RuntimeSpell {
    /// Create a fresh instance of a definition.
    #[must_use]
    pub fn new(definition: Arc<SpellDefinition>) -> Self {
        let effects = definition.effects.clone();
        let conditions = definition.conditions.clone();
        Self {
            charges: definition.starting_charges,
            tally: definition.starting_tally,
            previous_tally: definition.starting_tally,
            potency: 1.0,
            marked_to_skip: false,
            potency_modified: false,
            disabled: false,
            effects,
            conditions,
            definition,
        }
    }

    /// Convenience for tests and one-off spells.
    #[must_use]
    pub fn from_definition(definition: SpellDefinition) -> Self {
        Self::new(Arc::new(definition))
    }

    // === Identity ===

    #[must_use]
    pub fn definition(&self) -> &SpellDefinition {
        &self.definition
    }

    /// The shared definition handle.
    #[must_use]
    pub fn definition_arc(&self) -> &Arc<SpellDefinition> {
        &self.definition
    }

    #[must_use]
    pub fn id(&self) -> SpellId {
        self.definition.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// Check whether two instances come from the same definition.
    #[must_use]
    pub fn same_definition(&self, other: &RuntimeSpell) -> bool {
        self.id() == other.id()
    }

    // === Charges ===

    #[must_use]
    pub fn has_charges(&self) -> bool {
        self.definition.has_charges
    }

    /// Current charges, or `None` for spells without charges (unbounded).
    #[must_use]
    pub fn charges(&self) -> Option<u32> {
        self.has_charges().then_some(self.charges)
    }

    /// Add (or with a negative delta, remove) charges, flooring at zero.
    ///
    /// Returns `false` and does nothing for spells without charges.
    pub fn add_charges(&mut self, delta: i32) -> bool {
        if !self.has_charges() {
            warn!(spell = %self.name(), "charge change on a spell without charges");
            return false;
        }
        self.charges = self.charges.saturating_add_signed(delta);
        true
    }

    /// Spend one charge, never going below zero.
    pub fn consume_charge(&mut self) {
        if self.has_charges() {
            self.charges = self.charges.saturating_sub(1);
        }
    }

    // === Tally ===

    #[must_use]
    pub fn has_tallies(&self) -> bool {
        self.definition.has_tallies
    }

    /// Current tally, or `None` for spells without a tally.
    #[must_use]
    pub fn tally(&self) -> Option<i32> {
        self.has_tallies().then_some(self.tally)
    }

    /// Shift the tally. Returns `false` for spells without a tally.
    pub fn add_tally(&mut self, delta: i32) -> bool {
        if !self.has_tallies() {
            warn!(spell = %self.name(), "tally change on a spell without a tally");
            return false;
        }
        self.tally = self.tally.saturating_add(delta);
        true
    }

    /// Whether the tally moved since the last `commit_tally`.
    #[must_use]
    pub fn tally_changed(&self) -> bool {
        self.has_tallies() && self.tally != self.previous_tally
    }

    /// Record the current tally as the baseline for `tally_changed`.
    pub fn commit_tally(&mut self) {
        self.previous_tally = self.tally;
    }

    // === Per-cast state ===

    /// Multiplier applied to every effect magnitude this cast.
    #[must_use]
    pub fn potency(&self) -> f32 {
        self.potency
    }

    pub fn multiply_potency(&mut self, multiplier: f32) {
        self.potency *= multiplier;
        self.potency_modified = true;
    }

    #[must_use]
    pub fn was_potency_modified(&self) -> bool {
        self.potency_modified
    }

    pub fn mark_to_skip(&mut self) {
        self.marked_to_skip = true;
    }

    #[must_use]
    pub fn was_marked_to_skip(&self) -> bool {
        self.marked_to_skip
    }

    /// Reset potency and the per-cast flags.
    pub fn clear_transient(&mut self) {
        self.potency = 1.0;
        self.marked_to_skip = false;
        self.potency_modified = false;
    }

    // === Disable toggle ===

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // === Owned effect/condition copies ===

    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut [Effect] {
        &mut self.effects
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effect;

    fn battery() -> RuntimeSpell {
        RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Battery")
                .with_charges(1)
                .with_tally(0)
                .with_effect(Effect::damage(2)),
        )
    }

    #[test]
    fn test_starts_from_definition() {
        let spell = battery();
        assert_eq!(spell.charges(), Some(1));
        assert_eq!(spell.tally(), Some(0));
        assert_eq!(spell.potency(), 1.0);
        assert_eq!(spell.effects().len(), 1);
    }

    #[test]
    fn test_charges_floor_at_zero() {
        let mut spell = battery();
        spell.consume_charge();
        spell.consume_charge();
        assert_eq!(spell.charges(), Some(0));

        spell.add_charges(-5);
        assert_eq!(spell.charges(), Some(0));

        spell.add_charges(3);
        assert_eq!(spell.charges(), Some(3));
    }

    #[test]
    fn test_no_charge_capability() {
        let mut spell =
            RuntimeSpell::from_definition(SpellDefinition::new(SpellId::new(2), "Strike"));
        assert_eq!(spell.charges(), None);
        assert!(!spell.add_charges(1));
        assert!(!spell.add_tally(1));
        assert!(!spell.tally_changed());
    }

    #[test]
    fn test_tally_change_detection() {
        let mut spell = battery();
        assert!(!spell.tally_changed());

        spell.add_tally(2);
        assert!(spell.tally_changed());

        spell.commit_tally();
        assert!(!spell.tally_changed());
    }

    #[test]
    fn test_effect_copies_are_independent() {
        let definition = Arc::new(
            SpellDefinition::new(SpellId::new(1), "Strike").with_effect(Effect::damage(5)),
        );
        let mut a = RuntimeSpell::new(Arc::clone(&definition));
        let b = RuntimeSpell::new(Arc::clone(&definition));

        a.effects_mut()[0].set_scale(3);

        assert_eq!(a.effects()[0].scale(), 3);
        assert_eq!(b.effects()[0].scale(), 1);
        assert_eq!(definition.effects[0].scale(), 1);
    }

    #[test]
    fn test_clear_transient() {
        let mut spell = battery();
        spell.multiply_potency(2.0);
        spell.multiply_potency(1.5);
        spell.mark_to_skip();
        assert_eq!(spell.potency(), 3.0);
        assert!(spell.was_potency_modified());

        spell.clear_transient();
        assert_eq!(spell.potency(), 1.0);
        assert!(!spell.was_marked_to_skip());
        assert!(!spell.was_potency_modified());
    }
}
