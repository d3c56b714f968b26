//! Combat manager - the player, the enemy roster and every HP/shield change.
//!
//! All numeric changes to combatants go through the manager so that it can:
//! - Remove enemies from the active roster the moment they die
//! - Record a `CombatEvent` for each observable change
//!
//! ## Roster
//!
//! The active roster is an `im::Vector` in registration order. Cloning it
//! is O(1), which is how cast contexts snapshot the enemy line-up.
//! Dead enemies stay addressable through `get` but never reappear in the
//! roster, so snapshots taken after a death cannot see them.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::combatant::{Combatant, DamageResult};
use super::events::CombatEvent;
use super::status::{OverTimeKind, StatusApplied, StatusEffectInstance, TickTiming};
use crate::core::CombatantId;

/// Owns every combatant in the battle.
#[derive(Clone, Debug, Default)]
pub struct CombatManager {
    player: Option<Combatant>,
    enemies: FxHashMap<CombatantId, Combatant>,
    roster: Vector<CombatantId>,
    events: Vec<CombatEvent>,
}

impl CombatManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Registration ===

    /// Set the player combatant, replacing any previous one.
    pub fn register_player(&mut self, player: Combatant) {
        if !player.is_player() {
            warn!(id = %player.id(), "register_player called with an enemy; ignoring");
            return;
        }
        self.player = Some(player);
    }

    /// Add an enemy to the active roster.
    ///
    /// Returns `false` (and changes nothing) if an enemy with the same ID
    /// is already registered, or if the enemy is already dead.
    pub fn register_enemy(&mut self, enemy: Combatant) -> bool {
        let id = enemy.id();
        if enemy.is_player() {
            warn!("register_enemy called with the player; ignoring");
            return false;
        }
        if self.enemies.contains_key(&id) {
            debug!(%id, "enemy already registered");
            return false;
        }
        if !enemy.is_alive() {
            debug!(%id, "not registering a dead enemy");
            return false;
        }
        self.enemies.insert(id, enemy);
        self.roster.push_back(id);
        true
    }

    // === Lookup ===

    #[must_use]
    pub fn player(&self) -> Option<&Combatant> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Combatant> {
        self.player.as_mut()
    }

    /// Look up any combatant, dead enemies included.
    #[must_use]
    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        if id.is_player() {
            self.player.as_ref()
        } else {
            self.enemies.get(&id)
        }
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        if id.is_player() {
            self.player.as_mut()
        } else {
            self.enemies.get_mut(&id)
        }
    }

    /// Check whether a combatant exists and has HP above zero.
    #[must_use]
    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    /// The living enemies, in registration order.
    #[must_use]
    pub fn roster(&self) -> Vector<CombatantId> {
        self.roster.clone()
    }

    /// The first enemy index above every registered enemy, dead or alive.
    #[must_use]
    pub fn next_enemy_index(&self) -> u32 {
        self.enemies
            .keys()
            .filter_map(|id| id.enemy_index())
            .max()
            .map_or(0, |index| index + 1)
    }

    /// The first-registered enemy that is still alive.
    #[must_use]
    pub fn leftmost_enemy(&self) -> Option<CombatantId> {
        self.roster.iter().copied().find(|id| self.is_alive(*id))
    }

    #[must_use]
    pub fn all_enemies_defeated(&self) -> bool {
        self.roster.is_empty()
    }

    #[must_use]
    pub fn player_defeated(&self) -> bool {
        self.player.as_ref().map_or(true, |p| !p.is_alive())
    }

    // === Damage, healing, shields ===

    /// Damage an enemy, removing it from the roster if it dies.
    ///
    /// Damage against enemies no longer in the roster is ignored.
    pub fn deal_damage(&mut self, enemy: CombatantId, amount: i32) -> Option<DamageResult> {
        if !self.roster.contains(&enemy) {
            debug!(%enemy, "damage against inactive enemy ignored");
            return None;
        }
        let result = self.damage_unchecked(enemy, amount)?;
        if !self.is_alive(enemy) {
            self.remove_from_roster(enemy);
        }
        Some(result)
    }

    /// Damage the player.
    pub fn deal_damage_to_player(&mut self, amount: i32) -> Option<DamageResult> {
        let result = self.damage_unchecked(CombatantId::PLAYER, amount)?;
        if self.player_defeated() {
            debug!("player died");
            self.events.push(CombatEvent::Died {
                target: CombatantId::PLAYER,
            });
        }
        Some(result)
    }

    /// Damage any combatant.
    pub fn damage(&mut self, target: CombatantId, amount: i32) -> Option<DamageResult> {
        if target.is_player() {
            self.deal_damage_to_player(amount)
        } else {
            self.deal_damage(target, amount)
        }
    }

    pub fn heal_player(&mut self, amount: i32) -> i32 {
        self.heal(CombatantId::PLAYER, amount)
    }

    /// Heal a living combatant. Returns the amount actually restored.
    pub fn heal(&mut self, target: CombatantId, amount: i32) -> i32 {
        let Some(combatant) = self.living_mut(target) else {
            return 0;
        };
        let old = combatant.hp();
        let healed = combatant.heal(amount);
        let new = combatant.hp();
        if healed != 0 {
            self.events.push(CombatEvent::HealthChanged { target, old, new });
        }
        healed
    }

    pub fn shield_player(&mut self, amount: i32) {
        self.shield(CombatantId::PLAYER, amount);
    }

    /// Add shield to a living combatant.
    pub fn shield(&mut self, target: CombatantId, amount: i32) {
        let Some(combatant) = self.living_mut(target) else {
            return;
        };
        let old = combatant.shield();
        combatant.gain_shield(amount);
        let new = combatant.shield();
        if old != new {
            self.events.push(CombatEvent::ShieldChanged { target, old, new });
        }
    }

    /// Wipe the player's shield (start of the player's turn).
    pub fn reset_player_shield(&mut self) {
        self.reset_shield(CombatantId::PLAYER);
    }

    /// Wipe every living enemy's shield (start of the enemy turn).
    pub fn reset_enemy_shields(&mut self) {
        for id in self.roster.clone() {
            self.reset_shield(id);
        }
    }

    fn reset_shield(&mut self, target: CombatantId) {
        let Some(combatant) = self.get_mut(target) else {
            return;
        };
        let old = combatant.reset_shield();
        if old != 0 {
            self.events.push(CombatEvent::ShieldChanged { target, old, new: 0 });
        }
    }

    // === Statuses ===

    /// Attach an over-time status to a living combatant.
    pub fn apply_status(
        &mut self,
        target: CombatantId,
        status: StatusEffectInstance,
    ) -> StatusApplied {
        let Some(combatant) = self.living_mut(target) else {
            return StatusApplied::Ignored;
        };
        let key = status.key;
        let remaining = status.remaining;
        let applied = combatant.status_mut().apply(status);
        match applied {
            StatusApplied::Added => self.events.push(CombatEvent::StatusApplied {
                target,
                status: key,
                remaining,
            }),
            StatusApplied::Refreshed => self.events.push(CombatEvent::StatusRefreshed {
                target,
                status: key,
                remaining,
            }),
            StatusApplied::Ignored => {}
        }
        applied
    }

    /// Fire a combatant's statuses for `timing` and apply their amounts.
    ///
    /// Returns the number of status applications performed.
    pub fn tick_statuses(&mut self, target: CombatantId, timing: TickTiming) -> usize {
        let Some(combatant) = self.living_mut(target) else {
            return 0;
        };
        let report = combatant.status_mut().tick(timing);

        for tick in &report.ticks {
            if !self.is_alive(target) {
                break;
            }
            match tick.kind() {
                OverTimeKind::Damage => {
                    self.damage(target, tick.amount());
                }
                OverTimeKind::Heal => {
                    self.heal(target, tick.amount());
                }
                OverTimeKind::Shield => self.shield(target, tick.amount()),
            }
        }
        for status in report.expired {
            debug!(%target, %status, "status expired");
            self.events.push(CombatEvent::StatusExpired { target, status });
        }
        report.ticks.len()
    }

    /// Tick the statuses of every living enemy, in roster order.
    pub fn tick_enemy_statuses(&mut self, timing: TickTiming) -> usize {
        self.roster
            .clone()
            .into_iter()
            .map(|id| self.tick_statuses(id, timing))
            .sum()
    }

    // === Events ===

    /// Take all change records recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    // === Internals ===

    fn living_mut(&mut self, target: CombatantId) -> Option<&mut Combatant> {
        match self.get_mut(target) {
            Some(combatant) if combatant.is_alive() => Some(combatant),
            Some(_) => {
                debug!(%target, "ignoring change to dead combatant");
                None
            }
            None => {
                warn!(%target, "unknown combatant");
                None
            }
        }
    }

    fn damage_unchecked(&mut self, target: CombatantId, amount: i32) -> Option<DamageResult> {
        let combatant = self.living_mut(target)?;
        let old_hp = combatant.hp();
        let old_shield = combatant.shield();
        let result = combatant.take_damage(amount);
        let new_hp = combatant.hp();
        let new_shield = combatant.shield();

        if old_shield != new_shield {
            self.events.push(CombatEvent::ShieldChanged {
                target,
                old: old_shield,
                new: new_shield,
            });
        }
        if old_hp != new_hp {
            self.events.push(CombatEvent::HealthChanged {
                target,
                old: old_hp,
                new: new_hp,
            });
        }
        Some(result)
    }

    fn remove_from_roster(&mut self, enemy: CombatantId) {
        if let Some(index) = self.roster.index_of(&enemy) {
            self.roster.remove(index);
            debug!(%enemy, "enemy died");
            self.events.push(CombatEvent::Died { target: enemy });
        }
    }
}
