//! A single reel: a looping strip of spell slots.
//!
//! The reel shows a window of `rows` consecutive slots starting at its
//! stop index. Row `r` of the window shows strip slot `(stop + r) % len`.
//! Spells live in the strip, so a spell keeps its charges and tally when
//! it scrolls out of view and back in.

use crate::core::BattleRng;
use crate::spells::RuntimeSpell;

/// A looping strip of optional spells with a stop position.
#[derive(Clone, Debug, Default)]
pub struct Reel {
    strip: Vec<Option<RuntimeSpell>>,
    stop: usize,
}

impl Reel {
    /// Create a reel from a strip, stopped at slot 0.
    #[must_use]
    pub fn new(strip: Vec<Option<RuntimeSpell>>) -> Self {
        Self { strip, stop: 0 }
    }

    /// Create a reel where every slot holds a spell.
    #[must_use]
    pub fn from_spells(spells: impl IntoIterator<Item = RuntimeSpell>) -> Self {
        Self::new(spells.into_iter().map(Some).collect())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strip.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strip.is_empty()
    }

    /// Strip index at the top of the window.
    #[must_use]
    pub fn stop(&self) -> usize {
        self.stop
    }

    /// Stop at a specific strip index (wrapped to the strip length).
    pub fn set_stop(&mut self, stop: usize) {
        self.stop = if self.strip.is_empty() { 0 } else { stop % self.strip.len() };
    }

    /// Move the window by `steps` slots, wrapping around the strip.
    pub fn nudge(&mut self, steps: i32) {
        let len = self.strip.len() as i64;
        if len == 0 {
            return;
        }
        let stop = (self.stop as i64 + i64::from(steps)).rem_euclid(len);
        self.stop = stop as usize;
    }

    /// Stop at a random slot.
    pub fn spin(&mut self, rng: &mut BattleRng) {
        if self.strip.is_empty() {
            return;
        }
        self.stop = rng.gen_range_usize(0..self.strip.len());
    }

    /// Strip index shown at window row `row`.
    ///
    /// `None` if the strip is shorter than the row, so a short strip
    /// never shows the same slot twice.
    #[must_use]
    pub fn slot_index(&self, row: usize) -> Option<usize> {
        if row >= self.strip.len() {
            return None;
        }
        Some((self.stop + row) % self.strip.len())
    }

    /// The spell shown at window row `row`.
    #[must_use]
    pub fn spell_at_row(&self, row: usize) -> Option<&RuntimeSpell> {
        let index = self.slot_index(row)?;
        self.strip[index].as_ref()
    }

    pub fn spell_at_row_mut(&mut self, row: usize) -> Option<&mut RuntimeSpell> {
        let index = self.slot_index(row)?;
        self.strip[index].as_mut()
    }

    /// Remove the spell shown at `row`, leaving the slot empty.
    pub fn take(&mut self, row: usize) -> Option<RuntimeSpell> {
        let index = self.slot_index(row)?;
        self.strip[index].take()
    }

    /// Put a spell back into the slot shown at `row`.
    ///
    /// Returns the spell if the row does not map to a slot.
    pub fn restore(&mut self, row: usize, spell: RuntimeSpell) -> Result<(), RuntimeSpell> {
        match self.slot_index(row) {
            Some(index) => {
                self.strip[index] = Some(spell);
                Ok(())
            }
            None => Err(spell),
        }
    }

    /// Replace the slot at strip index `index`.
    pub fn replace_slot(
        &mut self,
        index: usize,
        spell: Option<RuntimeSpell>,
    ) -> Option<RuntimeSpell> {
        let slot = self.strip.get_mut(index)?;
        std::mem::replace(slot, spell)
    }

    /// Every spell on the strip, visible or not.
    pub fn spells(&self) -> impl Iterator<Item = &RuntimeSpell> {
        self.strip.iter().flatten()
    }

    pub fn spells_mut(&mut self) -> impl Iterator<Item = &mut RuntimeSpell> {
        self.strip.iter_mut().flatten()
    }
}
