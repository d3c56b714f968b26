//! Combatants - health, shield and statuses for the player and enemies.
//!
//! ## Shield absorption
//!
//! Incoming damage is taken from the shield first. Whatever the shield
//! cannot absorb comes off health. Health is not clamped at zero here:
//! callers treat `hp <= 0` as dead.
//!
//! ```
//! use reel_battle::combat::Combatant;
//! use reel_battle::core::CombatantId;
//!
//! let mut player = Combatant::player(20);
//! player.gain_shield(3);
//!
//! let hit = player.take_damage(5);
//! assert_eq!(hit.absorbed, 3);
//! assert_eq!(hit.hp_lost, 2);
//! assert_eq!(player.shield(), 0);
//! assert_eq!(player.hp(), 18);
//! ```

use serde::{Deserialize, Serialize};

use super::status::StatusController;
use crate::core::CombatantId;

/// Which team a combatant fights for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy {
        /// Slot in the enemy line-up, left to right.
        position: usize,
        /// Threat/impact score shown to the player.
        threat: i32,
    },
}

/// Breakdown of a `take_damage` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageResult {
    /// Damage soaked by the shield.
    pub absorbed: i32,
    /// Damage that reached health.
    pub hp_lost: i32,
}

/// A participant in the battle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    side: Side,
    hp: i32,
    max_hp: i32,
    shield: i32,
    status: StatusController,
}

impl Combatant {
    /// Create the player combatant at full health.
    #[must_use]
    pub fn player(max_hp: i32) -> Self {
        Self {
            id: CombatantId::PLAYER,
            name: "Player".to_string(),
            side: Side::Player,
            hp: max_hp,
            max_hp,
            shield: 0,
            status: StatusController::new(),
        }
    }

    /// Create an enemy at full health in line-up slot `position`.
    #[must_use]
    pub fn enemy(position: usize, name: impl Into<String>, max_hp: i32, threat: i32) -> Self {
        Self {
            id: CombatantId::enemy(position as u32),
            name: name.into(),
            side: Side::Enemy { position, threat },
            hp: max_hp,
            max_hp,
            shield: 0,
            status: StatusController::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CombatantId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn side(&self) -> &Side {
        &self.side
    }

    #[must_use]
    pub fn is_player(&self) -> bool {
        matches!(self.side, Side::Player)
    }

    /// Current health. May be negative after a killing blow.
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    #[must_use]
    pub fn shield(&self) -> i32 {
        self.shield
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[must_use]
    pub fn status(&self) -> &StatusController {
        &self.status
    }

    pub fn status_mut(&mut self) -> &mut StatusController {
        &mut self.status
    }

    /// Set current health directly, clamped to `max_hp` (setup and tests).
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.min(self.max_hp);
    }

    /// Apply damage, shield first. Negative amounts are treated as zero.
    pub fn take_damage(&mut self, amount: i32) -> DamageResult {
        let amount = amount.max(0);
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;
        let hp_lost = amount - absorbed;
        self.hp -= hp_lost;
        DamageResult { absorbed, hp_lost }
    }

    /// Restore health up to `max_hp`. Returns the amount actually healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        if before >= self.max_hp {
            self.hp = self.max_hp;
            return 0;
        }
        self.hp = (before + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    /// Add shield. Shield has no upper bound.
    pub fn gain_shield(&mut self, amount: i32) {
        self.shield += amount.max(0);
    }

    /// Drop the shield to zero. Returns the shield that was removed.
    pub fn reset_shield(&mut self) -> i32 {
        std::mem::take(&mut self.shield)
    }
}
