//! Change records emitted by the combat manager.
//!
//! The UI layer drains these to animate health bars and status icons.
//! Nothing in the engine reads them back.

use serde::{Deserialize, Serialize};

use super::status::StatusKey;
use crate::core::CombatantId;

/// A single observable state change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    HealthChanged {
        target: CombatantId,
        old: i32,
        new: i32,
    },
    ShieldChanged {
        target: CombatantId,
        old: i32,
        new: i32,
    },
    StatusApplied {
        target: CombatantId,
        status: StatusKey,
        remaining: u32,
    },
    StatusRefreshed {
        target: CombatantId,
        status: StatusKey,
        remaining: u32,
    },
    StatusExpired {
        target: CombatantId,
        status: StatusKey,
    },
    Died {
        target: CombatantId,
    },
}

impl CombatEvent {
    /// The combatant this event concerns.
    #[must_use]
    pub fn target(&self) -> CombatantId {
        match self {
            Self::HealthChanged { target, .. }
            | Self::ShieldChanged { target, .. }
            | Self::StatusApplied { target, .. }
            | Self::StatusRefreshed { target, .. }
            | Self::StatusExpired { target, .. }
            | Self::Died { target } => *target,
        }
    }
}
