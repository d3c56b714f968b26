//! Identifiers for combatants, spells and grid cells.
//!
//! ## ID Layout
//!
//! Combatant IDs are allocated as follows:
//! - `0`: Reserved for the player
//! - `1..`: Enemies, in spawn order
//!
//! ```
//! use reel_battle::core::CombatantId;
//!
//! let player = CombatantId::PLAYER;
//! let first_enemy = CombatantId::enemy(0);
//!
//! assert!(player.is_player());
//! assert!(!first_enemy.is_player());
//! assert_eq!(first_enemy.enemy_index(), Some(0));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a combatant (the player or an enemy).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    /// The player's combatant ID.
    pub const PLAYER: Self = Self(0);

    /// Create the ID for the enemy spawned at `index` (0-based).
    #[must_use]
    pub const fn enemy(index: u32) -> Self {
        Self(index + 1)
    }

    /// Check if this ID refers to the player.
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == 0
    }

    /// Spawn index if this is an enemy ID.
    #[must_use]
    pub const fn enemy_index(self) -> Option<u32> {
        if self.is_player() {
            None
        } else {
            Some(self.0 - 1)
        }
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_player() {
            write!(f, "Player")
        } else {
            write!(f, "Enemy({})", self.0 - 1)
        }
    }
}

/// Unique identifier for a spell definition.
///
/// This identifies the authored spell ("Strike"), not a runtime
/// instance sitting on a reel. Duplicate and mirror comparisons
/// compare these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpellId(pub u32);

impl SpellId {
    /// Create a new spell ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SpellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Spell({})", self.0)
    }
}

/// A (reel, row) position on the spell grid.
///
/// `reel` counts left to right, `row` top to bottom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub reel: usize,
    pub row: usize,
}

impl CellPos {
    /// Create a new cell position.
    #[must_use]
    pub const fn new(reel: usize, row: usize) -> Self {
        Self { reel, row }
    }

    /// Offset this position, returning `None` if it leaves the
    /// `reels` x `rows` bounds.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, reels: usize, rows: usize) -> Option<Self> {
        let reel = self.reel as i64 + i64::from(dx);
        let row = self.row as i64 + i64::from(dy);
        if reel < 0 || row < 0 || reel >= reels as i64 || row >= rows as i64 {
            return None;
        }
        Some(Self::new(reel as usize, row as usize))
    }

    /// Point reflection through the grid centre.
    ///
    /// `(x, y)` maps to `(reels - 1 - x, rows - 1 - y)`. Returns `None`
    /// for a cell outside the `reels` x `rows` bounds.
    #[must_use]
    pub fn mirrored(self, reels: usize, rows: usize) -> Option<Self> {
        let reel = reels.checked_sub(1)?.checked_sub(self.reel)?;
        let row = rows.checked_sub(1)?.checked_sub(self.row)?;
        Some(Self::new(reel, row))
    }
}

impl std::fmt::Display for CellPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.reel, self.row)
    }
}
