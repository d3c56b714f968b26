//! Grid-position conditions: where on the board the spell was cast.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::outcome::Outcome;
use crate::core::CellPos;
use crate::grid::GridView;

/// A positional test on the casting cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridPredicate {
    TopRow,
    BottomRow,
    CenterRow,
    LeftReel,
    RightReel,
    CenterReel,
    SecondReel,
    ThirdReel,
    Corner,
    /// The cell named by `GridPositionCondition::cell`.
    Exact,
    #[serde(other)]
    Unknown,
}

impl GridPredicate {
    /// Test `cell` on `grid`.
    #[must_use]
    pub fn matches(self, cell: CellPos, exact: Option<CellPos>, grid: &dyn GridView) -> bool {
        let last_reel = grid.reel_count().saturating_sub(1);
        let last_row = grid.rows_per_reel().saturating_sub(1);
        match self {
            Self::TopRow => cell.row == 0,
            Self::BottomRow => cell.row == last_row,
            Self::CenterRow => cell.row == grid.center_row(),
            Self::LeftReel => cell.reel == 0,
            Self::RightReel => cell.reel == last_reel,
            Self::CenterReel => cell.reel == grid.reel_count() / 2,
            Self::SecondReel => cell.reel == 1,
            Self::ThirdReel => cell.reel == 2,
            Self::Corner => {
                let edge_reel = cell.reel == 0 || cell.reel == last_reel;
                edge_reel && (cell.row == 0 || cell.row == last_row)
            }
            Self::Exact => match exact {
                Some(target) => target == cell,
                None => {
                    warn!("exact grid predicate without a cell");
                    false
                }
            },
            Self::Unknown => {
                warn!("unknown grid predicate");
                false
            }
        }
    }
}

/// Fires when the casting cell satisfies a positional predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridPositionCondition {
    pub predicate: GridPredicate,

    /// Target cell for `GridPredicate::Exact`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<CellPos>,

    pub outcome: Outcome,
}

impl GridPositionCondition {
    #[must_use]
    pub fn new(predicate: GridPredicate, outcome: Outcome) -> Self {
        Self {
            predicate,
            cell: None,
            outcome,
        }
    }

    /// Match one exact cell.
    #[must_use]
    pub fn exact(cell: CellPos, outcome: Outcome) -> Self {
        Self {
            predicate: GridPredicate::Exact,
            cell: Some(cell),
            outcome,
        }
    }

    /// Pure function of the cell coordinates. Casts without a cell never match.
    #[must_use]
    pub fn evaluate(&self, cell: Option<CellPos>, grid: &dyn GridView) -> bool {
        cell.is_some_and(|cell| self.predicate.matches(cell, self.cell, grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::SpellGrid;

    fn check(predicate: GridPredicate, reel: usize, row: usize) -> bool {
        let grid = SpellGrid::empty(5, 3);
        GridPositionCondition::new(predicate, Outcome::SkipSpell)
            .evaluate(Some(CellPos::new(reel, row)), &grid)
    }

    #[test]
    fn test_rows_and_reels() {
        assert!(check(GridPredicate::TopRow, 2, 0));
        assert!(!check(GridPredicate::TopRow, 2, 1));
        assert!(check(GridPredicate::BottomRow, 0, 2));
        assert!(check(GridPredicate::CenterRow, 4, 1));
        assert!(check(GridPredicate::LeftReel, 0, 1));
        assert!(check(GridPredicate::RightReel, 4, 1));
        assert!(check(GridPredicate::CenterReel, 2, 1));
        assert!(check(GridPredicate::SecondReel, 1, 1));
        assert!(check(GridPredicate::ThirdReel, 2, 2));
        assert!(!check(GridPredicate::ThirdReel, 3, 2));
    }

    #[test]
    fn test_corners() {
        assert!(check(GridPredicate::Corner, 0, 0));
        assert!(check(GridPredicate::Corner, 4, 2));
        assert!(!check(GridPredicate::Corner, 0, 1));
        assert!(!check(GridPredicate::Corner, 2, 0));
    }

    #[test]
    fn test_exact_and_missing_cell() {
        let grid = SpellGrid::empty(5, 3);
        let condition = GridPositionCondition::exact(CellPos::new(3, 1), Outcome::SkipSpell);
        assert!(condition.evaluate(Some(CellPos::new(3, 1)), &grid));
        assert!(!condition.evaluate(Some(CellPos::new(1, 3)), &grid));
        assert!(!condition.evaluate(None, &grid));
    }

    #[test]
    fn test_unknown_predicate_fails_closed() {
        assert!(!check(GridPredicate::Unknown, 0, 0));
    }
}
