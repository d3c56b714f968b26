//! Adjacency conditions: what sits around the casting cell.
//!
//! An adjacency condition inspects the cells in its scope, counts those
//! that satisfy its comparison, and passes when the count reaches
//! `required_matches`.
//!
//! ## Mirror comparisons
//!
//! `IsMirrored` and `MirroredDuplicate` count pairs rather than cells.
//!
//! - Local scopes pair each offset with its negation, so `Horizontal`
//!   yields one pair (left, right). `IsMirrored` needs both cells of a
//!   pair to share a definition; `MirroredDuplicate` also needs that
//!   definition to be the caster's.
//! - `GlobalGrid` pairs the casting cell with its point reflection
//!   `(reels - 1 - x, rows - 1 - y)`, and both comparisons need the
//!   reflected cell to hold the caster's definition.
//!
//! Hidden cells are never inspected.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::outcome::Outcome;
use crate::core::{CellPos, SpellId};
use crate::grid::{offsets, GridView};
use crate::spells::{RuntimeSpell, SpellColor};

/// Which cells around the casting cell are inspected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjacencyScope {
    Cardinal,
    Diagonal,
    AllSurrounding,
    Horizontal,
    Vertical,
    /// The single offset named by `AdjacencyCondition::offset`.
    ExactOffset,
    GlobalGrid,
    #[serde(other)]
    Unknown,
}

impl AdjacencyScope {
    /// Relative offsets for local scopes. Empty for `GlobalGrid` and `Unknown`.
    #[must_use]
    pub fn offsets(self, exact: (i32, i32)) -> Vec<(i32, i32)> {
        match self {
            Self::Cardinal => offsets::CARDINAL.to_vec(),
            Self::Diagonal => offsets::DIAGONAL.to_vec(),
            Self::AllSurrounding => offsets::SURROUNDING.to_vec(),
            Self::Horizontal => offsets::HORIZONTAL.to_vec(),
            Self::Vertical => offsets::VERTICAL.to_vec(),
            Self::ExactOffset => vec![exact],
            Self::GlobalGrid | Self::Unknown => Vec::new(),
        }
    }
}

/// What a neighbouring spell is compared against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "compare")]
pub enum Comparison {
    // === Against configured values ===

    Tag { tag: String },
    Color { color: SpellColor },
    ExactSpell { spell: SpellId },
    TallyEquals { value: i32 },
    ChargeEquals { value: u32 },
    /// Tally moved since the start of this resolution pass.
    TallyChanged,

    // === Against the caster ===

    IsDuplicate,
    IsMirrored,
    MirroredDuplicate,

    #[serde(other)]
    Unknown,
}

impl Comparison {
    fn is_mirror(&self) -> bool {
        matches!(self, Self::IsMirrored | Self::MirroredDuplicate)
    }

    /// Per-cell test for non-mirror comparisons.
    fn matches(&self, neighbour: &RuntimeSpell, caster: &RuntimeSpell) -> bool {
        match self {
            Self::Tag { tag } => neighbour.definition().has_tag(tag),
            Self::Color { color } => neighbour.definition().color == *color,
            Self::ExactSpell { spell } => neighbour.id() == *spell,
            Self::TallyEquals { value } => neighbour.tally() == Some(*value),
            Self::ChargeEquals { value } => neighbour.charges() == Some(*value),
            Self::TallyChanged => neighbour.tally_changed(),
            Self::IsDuplicate => neighbour.same_definition(caster),
            Self::IsMirrored | Self::MirroredDuplicate | Self::Unknown => false,
        }
    }
}

fn default_required() -> u32 {
    1
}

fn is_default_offset(offset: &(i32, i32)) -> bool {
    *offset == (0, 0)
}

/// Fires when enough cells in scope satisfy a comparison.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyCondition {
    pub scope: AdjacencyScope,

    /// Offset for `AdjacencyScope::ExactOffset`.
    #[serde(default, skip_serializing_if = "is_default_offset")]
    pub offset: (i32, i32),

    pub comparison: Comparison,

    /// Minimum match count for the condition to pass.
    #[serde(default = "default_required")]
    pub required_matches: u32,

    /// Multiply the linked effect by the match count.
    #[serde(default)]
    pub scale_effect_with_matches: bool,

    pub outcome: Outcome,
}

impl AdjacencyCondition {
    #[must_use]
    pub fn new(scope: AdjacencyScope, comparison: Comparison, outcome: Outcome) -> Self {
        Self {
            scope,
            offset: (0, 0),
            comparison,
            required_matches: 1,
            scale_effect_with_matches: false,
            outcome,
        }
    }

    /// Inspect the single cell at `(dx, dy)`.
    #[must_use]
    pub fn at_offset(dx: i32, dy: i32, comparison: Comparison, outcome: Outcome) -> Self {
        Self {
            offset: (dx, dy),
            ..Self::new(AdjacencyScope::ExactOffset, comparison, outcome)
        }
    }

    #[must_use]
    pub fn with_required(mut self, required: u32) -> Self {
        self.required_matches = required;
        self
    }

    #[must_use]
    pub fn scaling(mut self) -> Self {
        self.scale_effect_with_matches = true;
        self
    }

    /// Count matches around `cell` for `caster`.
    ///
    /// Returns `None` when nothing can be inspected: no casting cell, an
    /// unknown scope, or an unknown comparison.
    #[must_use]
    pub fn count_matches(
        &self,
        caster: &RuntimeSpell,
        cell: Option<CellPos>,
        grid: &dyn GridView,
    ) -> Option<u32> {
        let cell = cell?;
        if self.scope == AdjacencyScope::Unknown {
            warn!(spell = caster.name(), "unknown adjacency scope");
            return None;
        }
        if self.comparison == Comparison::Unknown {
            warn!(spell = caster.name(), "unknown adjacency comparison");
            return None;
        }

        let count = match (self.scope, self.comparison.is_mirror()) {
            (AdjacencyScope::GlobalGrid, true) => self.count_global_mirror(caster, cell, grid),
            (AdjacencyScope::GlobalGrid, false) => grid
                .all_spells()
                .into_iter()
                .filter(|&(pos, spell)| pos != cell && self.comparison.matches(spell, caster))
                .count(),
            (_, true) => self.count_local_mirror(caster, cell, grid),
            (_, false) => grid
                .cells_at_offsets(cell, &self.scope.offsets(self.offset))
                .into_iter()
                .filter_map(|(_, spell)| spell)
                .filter(|spell| self.comparison.matches(spell, caster))
                .count(),
        };
        Some(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn count_global_mirror(
        &self,
        caster: &RuntimeSpell,
        cell: CellPos,
        grid: &dyn GridView,
    ) -> usize {
        let Some(mirror) = cell.mirrored(grid.reel_count(), grid.rows_per_reel()) else {
            warn!(%cell, "casting cell outside the grid; no mirror");
            return 0;
        };
        if mirror == cell || !grid.is_visible(mirror) {
            return 0;
        }
        let reflected = grid.spell_at(mirror);
        usize::from(reflected.is_some_and(|spell| spell.same_definition(caster)))
    }

    fn count_local_mirror(
        &self,
        caster: &RuntimeSpell,
        cell: CellPos,
        grid: &dyn GridView,
    ) -> usize {
        let offsets = self.scope.offsets(self.offset);
        mirror_pairs(&offsets)
            .filter(|&((ax, ay), (bx, by))| {
                let a = grid.spell_at_offset(cell, ax, ay);
                let b = grid.spell_at_offset(cell, bx, by);
                match (a, b, &self.comparison) {
                    (Some(a), Some(b), Comparison::IsMirrored) => a.same_definition(b),
                    (Some(a), Some(b), Comparison::MirroredDuplicate) => {
                        a.same_definition(caster) && b.same_definition(caster)
                    }
                    _ => false,
                }
            })
            .count()
    }

    /// Whether the match count reaches the threshold.
    #[must_use]
    pub fn passes(&self, matches: u32) -> bool {
        matches >= self.required_matches
    }
}

/// Offsets paired with their negation, each pair listed once.
fn mirror_pairs(offsets: &[(i32, i32)]) -> impl Iterator<Item = ((i32, i32), (i32, i32))> + '_ {
    offsets
        .iter()
        .copied()
        .filter(|&(dx, dy)| (dx, dy) != (0, 0))
        .filter(move |&(dx, dy)| (dx, dy) < (-dx, -dy) || !offsets.contains(&(-dx, -dy)))
        .map(|(dx, dy)| ((dx, dy), (-dx, -dy)))
}
