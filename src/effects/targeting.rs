//! Target resolution.
//!
//! Turns a target type and targeting mode into the concrete combatants
//! an effect lands on, branching on whether the player or an enemy is
//! casting:
//!
//! | Mode          | Player casts                          | Enemy casts                  |
//! |---------------|---------------------------------------|------------------------------|
//! | `SelfTarget`  | the player                            | the casting enemy            |
//! | `SingleEnemy` | override target, else leftmost enemy | the player                   |
//! | `AllEnemies`  | every living enemy                    | the player                   |
//! | `SingleAlly`  | nobody                                | lowest-HP living enemy       |
//! | `AllAllies`   | the player                            | every living enemy           |
//!
//! Only living combatants are ever returned.

use im::Vector;
use smallvec::SmallVec;
use tracing::{debug, warn};

use super::effect::{TargetType, TargetingMode};
use crate::combat::CombatManager;
use crate::core::CombatantId;

/// A resolved target list. Most effects hit one or a handful of targets.
pub type Targets = SmallVec<[CombatantId; 4]>;

/// Snapshot of who is casting and who is on the field.
///
/// Built once per cast. The enemy line-up is captured when the snapshot
/// is taken; enemies that die afterwards are filtered out at resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetingContext {
    /// The acting combatant.
    pub caster: CombatantId,
    /// The player combatant.
    pub player: CombatantId,
    /// Living enemies at snapshot time, in registration order.
    pub enemies: Vector<CombatantId>,
    /// Player-chosen single target for this turn.
    pub target_override: Option<CombatantId>,
}

impl TargetingContext {
    /// Snapshot for a player cast.
    #[must_use]
    pub fn for_player(combat: &CombatManager, target_override: Option<CombatantId>) -> Self {
        Self {
            caster: CombatantId::PLAYER,
            player: CombatantId::PLAYER,
            enemies: combat.roster(),
            target_override,
        }
    }

    /// Snapshot for an enemy cast. Overrides never apply to enemies.
    #[must_use]
    pub fn for_enemy(combat: &CombatManager, enemy: CombatantId) -> Self {
        Self {
            caster: enemy,
            player: CombatantId::PLAYER,
            enemies: combat.roster(),
            target_override: None,
        }
    }

    #[must_use]
    pub fn is_enemy_caster(&self) -> bool {
        !self.caster.is_player()
    }

    /// The acting enemy, if an enemy is casting.
    #[must_use]
    pub fn acting_enemy(&self) -> Option<CombatantId> {
        self.is_enemy_caster().then_some(self.caster)
    }
}

/// Resolves targeting modes against combat state.
pub struct TargetResolver;

impl TargetResolver {
    /// Resolve the combatants an effect should land on.
    ///
    /// Unknown modes log a warning and resolve to no targets.
    pub fn resolve(
        target_type: TargetType,
        mode: TargetingMode,
        ctx: &TargetingContext,
        combat: &CombatManager,
    ) -> Targets {
        let mismatched = matches!(
            (target_type, mode),
            (TargetType::Ally, TargetingMode::SingleEnemy | TargetingMode::AllEnemies)
                | (TargetType::Enemy, TargetingMode::SingleAlly | TargetingMode::AllAllies)
        );
        if mismatched {
            debug!(?target_type, ?mode, "targeting mode disagrees with target type");
        }

        let alive = |id: &CombatantId| combat.is_alive(*id);
        let mut targets = Targets::new();

        match mode {
            TargetingMode::SelfTarget => {
                targets.extend(Some(ctx.caster).filter(alive));
            }
            TargetingMode::SingleEnemy if ctx.is_enemy_caster() => {
                targets.extend(Some(ctx.player).filter(alive));
            }
            TargetingMode::SingleEnemy => {
                let chosen = ctx
                    .target_override
                    .filter(|id| !id.is_player() && combat.is_alive(*id))
                    .or_else(|| ctx.enemies.iter().copied().find(alive));
                targets.extend(chosen);
            }
            TargetingMode::AllEnemies if ctx.is_enemy_caster() => {
                targets.extend(Some(ctx.player).filter(alive));
            }
            TargetingMode::AllEnemies => {
                targets.extend(ctx.enemies.iter().copied().filter(alive));
            }
            TargetingMode::SingleAlly if ctx.is_enemy_caster() => {
                let weakest = ctx
                    .enemies
                    .iter()
                    .copied()
                    .filter(alive)
                    .min_by_key(|id| combat.get(*id).map_or(i32::MAX, |c| c.hp()));
                targets.extend(weakest);
            }
            TargetingMode::SingleAlly => {
                debug!("SingleAlly has no meaning for the player; no targets");
            }
            TargetingMode::AllAllies if ctx.is_enemy_caster() => {
                targets.extend(ctx.enemies.iter().copied().filter(alive));
            }
            TargetingMode::AllAllies => {
                targets.extend(Some(ctx.player).filter(alive));
            }
            TargetingMode::Unknown => {
                warn!(?target_type, "unknown targeting mode; no targets");
            }
        }

        targets
    }
}
