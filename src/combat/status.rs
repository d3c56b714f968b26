//! Timed over-time effects attached to a combatant.
//!
//! ## Tick semantics
//!
//! - A status applies its amount at ticks matching its `TickTiming`.
//! - Every end-of-turn tick counts down the statuses that have applied
//!   since they were added or refreshed, and removes those at zero.
//! - Duration therefore counts applications: a 2-turn poison hits twice,
//!   and a 1-turn regen gained mid-turn still heals at the next turn
//!   start before the following end-of-turn tick removes it.
//!
//! ## Stacking
//!
//! Statuses are keyed by kind and per-tick amount. Applying a status whose
//! key is already present refreshes the existing one in place instead of
//! adding a second copy.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// What an over-time status does on each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverTimeKind {
    Damage,
    Heal,
    Shield,
}

/// When in the owner's turn a status applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickTiming {
    StartOfTurn,
    #[default]
    EndOfTurn,
}

/// Identity of a status, used for refresh-instead-of-duplicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusKey {
    pub kind: OverTimeKind,
    pub amount: i32,
}

impl std::fmt::Display for StatusKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}x{}", self.kind, self.amount)
    }
}

/// Display metadata for the spell that applied a status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSource {
    pub spell_name: String,
    pub icon: Option<String>,
}

/// An active over-time status on a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffectInstance {
    /// Kind and per-tick amount.
    pub key: StatusKey,
    /// Ticks left before removal.
    pub remaining: u32,
    pub timing: TickTiming,
    pub source: StatusSource,
    /// Set once the status has applied since it was added or refreshed.
    #[serde(default)]
    pub fired: bool,
}

impl StatusEffectInstance {
    /// Create a new status instance.
    #[must_use]
    pub fn new(kind: OverTimeKind, amount: i32, duration: u32, timing: TickTiming) -> Self {
        Self {
            key: StatusKey { kind, amount },
            remaining: duration,
            timing,
            source: StatusSource::default(),
            fired: false,
        }
    }

    /// Attach source spell metadata (builder pattern).
    #[must_use]
    pub fn with_source(mut self, spell_name: impl Into<String>, icon: Option<String>) -> Self {
        self.source = StatusSource {
            spell_name: spell_name.into(),
            icon,
        };
        self
    }

    #[must_use]
    pub fn kind(&self) -> OverTimeKind {
        self.key.kind
    }

    #[must_use]
    pub fn amount(&self) -> i32 {
        self.key.amount
    }
}

/// Outcome of adding a status to a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusApplied {
    /// A new status was attached.
    Added,
    /// An existing status with the same key had its duration reset.
    Refreshed,
    /// Zero-duration statuses are dropped.
    Ignored,
}

/// One application produced by a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusTick {
    pub key: StatusKey,
}

impl StatusTick {
    #[must_use]
    pub fn kind(&self) -> OverTimeKind {
        self.key.kind
    }

    #[must_use]
    pub fn amount(&self) -> i32 {
        self.key.amount
    }
}

/// Result of ticking a controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Applications to perform on the owner, in status order.
    pub ticks: SmallVec<[StatusTick; 4]>,
    /// Statuses that ran out during this tick.
    pub expired: SmallVec<[StatusKey; 4]>,
}

/// Owns a combatant's active statuses.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusController {
    effects: Vec<StatusEffectInstance>,
}

impl StatusController {
    /// Create an empty controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a status, refreshing an existing one with the same key.
    pub fn apply(&mut self, status: StatusEffectInstance) -> StatusApplied {
        if status.remaining == 0 {
            return StatusApplied::Ignored;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.key == status.key) {
            existing.remaining = status.remaining;
            existing.timing = status.timing;
            existing.source = status.source;
            existing.fired = false;
            return StatusApplied::Refreshed;
        }

        self.effects.push(status);
        StatusApplied::Added
    }

    /// Fire the statuses matching `timing`.
    ///
    /// An end-of-turn tick then counts down every status that has fired
    /// and removes the ones that reach zero.
    pub fn tick(&mut self, timing: TickTiming) -> TickReport {
        let mut report = TickReport::default();

        for effect in self.effects.iter_mut().filter(|e| e.timing == timing) {
            report.ticks.push(StatusTick { key: effect.key });
            effect.fired = true;
        }

        if timing == TickTiming::StartOfTurn {
            return report;
        }

        for effect in self.effects.iter_mut().filter(|e| e.fired) {
            effect.remaining = effect.remaining.saturating_sub(1);
        }
        self.effects.retain(|effect| {
            if effect.remaining == 0 {
                report.expired.push(effect.key);
                false
            } else {
                true
            }
        });

        report
    }

    /// Remove every status.
    pub fn clear(&mut self) {
        self.effects.clear();
    }

    /// Look up a status by key.
    #[must_use]
    pub fn get(&self, key: StatusKey) -> Option<&StatusEffectInstance> {
        self.effects.iter().find(|e| e.key == key)
    }

    /// Iterate active statuses in application order.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffectInstance> {
        self.effects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poison(amount: i32, duration: u32) -> StatusEffectInstance {
        StatusEffectInstance::new(OverTimeKind::Damage, amount, duration, TickTiming::EndOfTurn)
    }

    #[test]
    fn test_apply_adds() {
        let mut controller = StatusController::new();
        assert_eq!(controller.apply(poison(2, 3)), StatusApplied::Added);
        assert_eq!(controller.len(), 1);
    }

    #[test]
    fn test_same_key_refreshes() {
        let mut controller = StatusController::new();
        controller.apply(poison(2, 3));
        controller.tick(TickTiming::EndOfTurn);
        assert_eq!(controller.iter().next().unwrap().remaining, 2);

        assert_eq!(controller.apply(poison(2, 3)), StatusApplied::Refreshed);
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.iter().next().unwrap().remaining, 3);
    }

    #[test]
    fn test_different_amount_stacks() {
        let mut controller = StatusController::new();
        controller.apply(poison(2, 3));
        controller.apply(poison(3, 3));
        assert_eq!(controller.len(), 2);
    }

    #[test]
    fn test_zero_duration_ignored() {
        let mut controller = StatusController::new();
        assert_eq!(controller.apply(poison(2, 0)), StatusApplied::Ignored);
        assert!(controller.is_empty());
    }

    #[test]
    fn test_duration_counts_applications() {
        let mut controller = StatusController::new();
        controller.apply(poison(2, 2));

        let first = controller.tick(TickTiming::EndOfTurn);
        assert_eq!(first.ticks.len(), 1);
        assert!(first.expired.is_empty());

        let second = controller.tick(TickTiming::EndOfTurn);
        assert_eq!(second.ticks.len(), 1);
        assert_eq!(
            second.expired.as_slice(),
            &[StatusKey { kind: OverTimeKind::Damage, amount: 2 }]
        );
        assert!(controller.is_empty());
    }

    #[test]
    fn test_refresh_waits_for_next_application() {
        let mut controller = StatusController::new();
        let regen = StatusEffectInstance::new(OverTimeKind::Heal, 2, 2, TickTiming::StartOfTurn);
        controller.apply(regen.clone());
        controller.tick(TickTiming::StartOfTurn);

        assert_eq!(controller.apply(regen), StatusApplied::Refreshed);
        controller.tick(TickTiming::EndOfTurn);
        assert_eq!(controller.iter().next().unwrap().remaining, 2);
    }

    #[test]
    fn test_start_of_turn_survives_end_of_turn() {
        let mut controller = StatusController::new();
        controller.apply(StatusEffectInstance::new(
            OverTimeKind::Heal,
            1,
            1,
            TickTiming::StartOfTurn,
        ));

        // Gained mid-turn: the owner's end of turn does not count it yet
        let end = controller.tick(TickTiming::EndOfTurn);
        assert!(end.ticks.is_empty());
        assert!(end.expired.is_empty());
        assert_eq!(controller.len(), 1);

        let start = controller.tick(TickTiming::StartOfTurn);
        assert_eq!(start.ticks.len(), 1);
        assert!(start.expired.is_empty());

        let end = controller.tick(TickTiming::EndOfTurn);
        assert!(end.ticks.is_empty());
        assert_eq!(end.expired.len(), 1);
        assert!(controller.is_empty());
    }
}
