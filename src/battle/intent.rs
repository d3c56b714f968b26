//! Enemy intents: weighted spell pools with a pre-rolled current pick.

use tracing::debug;

use crate::core::BattleRng;
use crate::spells::RuntimeSpell;

/// An enemy's castable spells, with the intent rolled for its next action.
///
/// Each entry is a runtime spell, so charges and tallies on an intent
/// persist between the enemy's turns.
#[derive(Clone, Debug, Default)]
pub struct IntentPool {
    spells: Vec<RuntimeSpell>,
    weights: Vec<f32>,
    current: Option<usize>,
}

impl IntentPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spell with a relative weight.
    pub fn push(&mut self, spell: RuntimeSpell, weight: f32) {
        self.spells.push(spell);
        self.weights.push(weight);
    }

    /// Add a spell (builder pattern).
    #[must_use]
    pub fn with(mut self, spell: RuntimeSpell, weight: f32) -> Self {
        self.push(spell, weight);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.spells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Pick the next intent. Clears the intent if nothing can be picked.
    pub fn roll(&mut self, rng: &mut BattleRng) -> Option<&RuntimeSpell> {
        self.current = rng.choose_weighted(&self.weights);
        if self.current.is_none() {
            debug!(spells = self.spells.len(), "no intent could be rolled");
        }
        self.current()
    }

    /// Force a specific intent by index.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.spells.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// The rolled intent, shown to the player ahead of the enemy's turn.
    #[must_use]
    pub fn current(&self) -> Option<&RuntimeSpell> {
        self.current.and_then(|index| self.spells.get(index))
    }

    pub fn current_mut(&mut self) -> Option<&mut RuntimeSpell> {
        self.current.and_then(|index| self.spells.get_mut(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuntimeSpell> {
        self.spells.iter()
    }
}
