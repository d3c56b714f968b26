//! Per-cast context.

use crate::combat::CombatManager;
use crate::core::{CellPos, CombatantId};
use crate::effects::TargetingContext;
use crate::grid::GridView;

/// Everything a cast reads besides the spell and the combat state.
///
/// Built once per cast and dropped when the cast ends. The casting spell
/// and the `CombatManager` are passed alongside rather than stored here,
/// since both are mutated while the context is alive.
pub struct CastContext<'a> {
    /// The board as it stands at cast time.
    pub grid: &'a dyn GridView,
    /// The casting cell. `None` for enemy casts.
    pub cell: Option<CellPos>,
    /// Caster, player and enemy-roster snapshot.
    pub targeting: TargetingContext,
}

impl<'a> CastContext<'a> {
    /// Context for a player spell cast from `cell`.
    #[must_use]
    pub fn for_player(
        grid: &'a dyn GridView,
        cell: CellPos,
        combat: &CombatManager,
        target_override: Option<CombatantId>,
    ) -> Self {
        Self {
            grid,
            cell: Some(cell),
            targeting: TargetingContext::for_player(combat, target_override),
        }
    }

    /// Context for an enemy's intent cast.
    #[must_use]
    pub fn for_enemy(grid: &'a dyn GridView, combat: &CombatManager, enemy: CombatantId) -> Self {
        Self {
            grid,
            cell: None,
            targeting: TargetingContext::for_enemy(combat, enemy),
        }
    }

    #[must_use]
    pub fn is_enemy_cast(&self) -> bool {
        self.targeting.is_enemy_caster()
    }

    #[must_use]
    pub fn acting_enemy(&self) -> Option<CombatantId> {
        self.targeting.acting_enemy()
    }

    #[must_use]
    pub fn caster(&self) -> CombatantId {
        self.targeting.caster
    }
}
