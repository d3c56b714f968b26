//! The reel grid owned by a battle.

use tracing::warn;

use super::reel::Reel;
use super::view::GridView;
use crate::core::{BattleConfig, BattleRng, CellPos};
use crate::spells::RuntimeSpell;

/// A row of reels with a fixed visible window height.
///
/// The configured reel count is authoritative. If fewer reels were
/// supplied, missing reels read as hidden and empty; extra reels are
/// never shown.
#[derive(Clone, Debug)]
pub struct SpellGrid {
    reels: Vec<Reel>,
    reel_count: usize,
    rows_per_reel: usize,
    center_row: usize,
}

impl SpellGrid {
    /// An empty grid sized by `config`, one blank strip per reel.
    #[must_use]
    pub fn new(config: &BattleConfig) -> Self {
        let reels = (0..config.reel_count)
            .map(|_| Reel::new(vec![None; config.rows_per_reel]))
            .collect();
        Self {
            reels,
            reel_count: config.reel_count,
            rows_per_reel: config.rows_per_reel,
            center_row: config.center_row(),
        }
    }

    /// An empty `reels` x `rows` grid with the default centre row.
    #[must_use]
    pub fn empty(reels: usize, rows: usize) -> Self {
        Self::new(&BattleConfig::default().with_grid(reels, rows))
    }

    /// A grid over host-supplied reels.
    #[must_use]
    pub fn from_reels(config: &BattleConfig, reels: Vec<Reel>) -> Self {
        if reels.len() != config.reel_count {
            warn!(
                expected = config.reel_count,
                supplied = reels.len(),
                "reel count mismatch"
            );
        }
        Self {
            reels,
            reel_count: config.reel_count,
            rows_per_reel: config.rows_per_reel,
            center_row: config.center_row(),
        }
    }

    /// Place a spell directly into a visible cell (builder pattern).
    #[must_use]
    pub fn with_spell(mut self, pos: CellPos, spell: RuntimeSpell) -> Self {
        self.place(pos, spell);
        self
    }

    #[must_use]
    pub fn reel(&self, index: usize) -> Option<&Reel> {
        self.reels.get(index)
    }

    pub fn reel_mut(&mut self, index: usize) -> Option<&mut Reel> {
        self.reels.get_mut(index)
    }

    /// Replace a reel. Returns `false` if `index` is outside the grid.
    pub fn set_reel(&mut self, index: usize, reel: Reel) -> bool {
        if index >= self.reel_count {
            warn!(index, reels = self.reel_count, "set_reel outside the grid");
            return false;
        }
        if index >= self.reels.len() {
            self.reels.resize_with(index + 1, Reel::default);
        }
        self.reels[index] = reel;
        true
    }

    /// Put a spell into the slot shown at `pos`, returning the old one.
    ///
    /// Cells outside the grid or past a short strip are left alone.
    pub fn place(&mut self, pos: CellPos, spell: RuntimeSpell) -> Option<RuntimeSpell> {
        if !self.contains(pos) {
            warn!(%pos, "place outside the grid");
            return None;
        }
        let reel = self.reels.get_mut(pos.reel)?;
        let index = reel.slot_index(pos.row)?;
        reel.replace_slot(index, Some(spell))
    }

    pub fn spell_at_mut(&mut self, pos: CellPos) -> Option<&mut RuntimeSpell> {
        if pos.row >= self.rows_per_reel {
            return None;
        }
        self.reels.get_mut(pos.reel)?.spell_at_row_mut(pos.row)
    }

    /// Lift the spell out of a cell for the duration of its cast.
    pub fn take(&mut self, pos: CellPos) -> Option<RuntimeSpell> {
        if !self.contains(pos) {
            return None;
        }
        self.reels.get_mut(pos.reel)?.take(pos.row)
    }

    /// Return a spell lifted with `take`.
    pub fn restore(&mut self, pos: CellPos, spell: RuntimeSpell) {
        let Some(reel) = self.reels.get_mut(pos.reel) else {
            warn!(%pos, spell = spell.name(), "restore to a missing reel; spell dropped");
            return;
        };
        if let Err(spell) = reel.restore(pos.row, spell) {
            warn!(%pos, spell = spell.name(), "restore to a missing slot; spell dropped");
        }
    }

    /// The centre row, one entry per configured reel, left to right.
    ///
    /// Logs a warning if the supplied reels do not match the configured
    /// count; missing reels read as empty.
    #[must_use]
    pub fn materialize_center_row(&self) -> Vec<(usize, Option<&RuntimeSpell>)> {
        if self.reels.len() != self.reel_count {
            warn!(
                expected = self.reel_count,
                available = self.reels.len(),
                "reel count mismatch while materializing; using available reels"
            );
        }
        (0..self.reel_count)
            .map(|reel| (reel, self.spell_at(CellPos::new(reel, self.center_row))))
            .collect()
    }

    /// Non-empty centre-row cells, left to right.
    #[must_use]
    pub fn center_cells(&self) -> Vec<CellPos> {
        self.materialize_center_row()
            .into_iter()
            .filter(|(_, spell)| spell.is_some())
            .map(|(reel, _)| CellPos::new(reel, self.center_row))
            .collect()
    }

    /// Record every spell's tally as the baseline for change detection.
    pub fn commit_tallies(&mut self) {
        for reel in &mut self.reels {
            reel.spells_mut().for_each(RuntimeSpell::commit_tally);
        }
    }

    /// Spin every reel.
    pub fn spin_all(&mut self, rng: &mut BattleRng) {
        for reel in &mut self.reels {
            reel.spin(rng);
        }
    }
}

impl GridView for SpellGrid {
    fn reel_count(&self) -> usize {
        self.reel_count
    }

    fn rows_per_reel(&self) -> usize {
        self.rows_per_reel
    }

    fn center_row(&self) -> usize {
        self.center_row
    }

    fn spell_at(&self, pos: CellPos) -> Option<&RuntimeSpell> {
        if !self.contains(pos) {
            return None;
        }
        self.reels.get(pos.reel)?.spell_at_row(pos.row)
    }

    fn is_visible(&self, pos: CellPos) -> bool {
        self.contains(pos)
            && self
                .reels
                .get(pos.reel)
                .is_some_and(|reel| reel.slot_index(pos.row).is_some())
    }
}
