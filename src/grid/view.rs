//! Read-only grid access for condition evaluation.

use crate::core::CellPos;
use crate::spells::RuntimeSpell;

/// Neighbour offsets `(dx, dy)`, with `dy` growing downwards.
pub mod offsets {
    pub const HORIZONTAL: [(i32, i32); 2] = [(-1, 0), (1, 0)];
    pub const VERTICAL: [(i32, i32); 2] = [(0, -1), (0, 1)];
    pub const CARDINAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    pub const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, 1), (1, -1), (-1, 1)];
    pub const SURROUNDING: [(i32, i32); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
    ];
}

/// Read-only view of the spell grid.
///
/// Conditions only ever see the grid through this trait, so hosts can
/// back it with whatever reel model they render.
pub trait GridView {
    fn reel_count(&self) -> usize;

    fn rows_per_reel(&self) -> usize;

    /// The actionable row.
    fn center_row(&self) -> usize {
        self.rows_per_reel() / 2
    }

    /// The spell in a cell, if the cell is on the grid and not empty.
    fn spell_at(&self, pos: CellPos) -> Option<&RuntimeSpell>;

    /// Whether a cell is currently shown.
    fn is_visible(&self, pos: CellPos) -> bool;

    /// Whether `pos` lies inside the grid bounds.
    fn contains(&self, pos: CellPos) -> bool {
        pos.reel < self.reel_count() && pos.row < self.rows_per_reel()
    }

    /// Every visible, non-empty cell in reel-major order.
    fn all_spells(&self) -> Vec<(CellPos, &RuntimeSpell)> {
        let mut spells = Vec::new();
        for reel in 0..self.reel_count() {
            for row in 0..self.rows_per_reel() {
                let pos = CellPos::new(reel, row);
                if !self.is_visible(pos) {
                    continue;
                }
                if let Some(spell) = self.spell_at(pos) {
                    spells.push((pos, spell));
                }
            }
        }
        spells
    }

    /// The visible cells at `offsets` from `origin`.
    ///
    /// Offsets that leave the grid or land on hidden cells are dropped.
    /// Empty cells are kept as `None`.
    fn cells_at_offsets(
        &self,
        origin: CellPos,
        offsets: &[(i32, i32)],
    ) -> Vec<(CellPos, Option<&RuntimeSpell>)> {
        offsets
            .iter()
            .filter_map(|&(dx, dy)| origin.offset(dx, dy, self.reel_count(), self.rows_per_reel()))
            .filter(|&pos| self.is_visible(pos))
            .map(|pos| (pos, self.spell_at(pos)))
            .collect()
    }

    /// The visible spell at `origin + (dx, dy)`.
    fn spell_at_offset(&self, origin: CellPos, dx: i32, dy: i32) -> Option<&RuntimeSpell> {
        let pos = origin.offset(dx, dy, self.reel_count(), self.rows_per_reel())?;
        if !self.is_visible(pos) {
            return None;
        }
        self.spell_at(pos)
    }
}
