//! Turn phases.

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattleOutcome {
    Won,
    Lost,
}

/// Where the battle is in its turn cycle.
///
/// ```text
/// PlayerTurnStart -> AwaitingPlayerInput -> ResolvingPlayerSpells
///        ^                                          |
///        |                                          v
/// ResolvingEnemyActions  <-----------------  EnemyTurnStart
///
/// any resolving or start phase -> BattleEnded(outcome)
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    PlayerTurnStart,
    AwaitingPlayerInput,
    ResolvingPlayerSpells,
    EnemyTurnStart,
    ResolvingEnemyActions,
    BattleEnded(BattleOutcome),
}

impl BattlePhase {
    #[must_use]
    pub fn is_ended(self) -> bool {
        matches!(self, Self::BattleEnded(_))
    }

    #[must_use]
    pub fn outcome(self) -> Option<BattleOutcome> {
        match self {
            Self::BattleEnded(outcome) => Some(outcome),
            _ => None,
        }
    }
}
