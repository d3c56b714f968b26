//! The cast pipeline.
//!
//! ## Steps
//!
//! 1. Skip check: a spell already marked to skip clears its flags and stops
//! 2. Disabled check: disabled spells do nothing
//! 3. Context: built by the caller (`CastContext`) before the call
//! 4. Conditions, in authored order:
//!    - `ModifyPotency` multiplies the running potency
//!    - `TriggerEffect` resolves and applies the linked effect at once
//!    - `SkipSpell` marks the spell and stops the condition pass
//! 5. Main effects, unless a condition skipped the spell
//! 6. Charge decrement, unless a condition skipped the spell
//! 7. Cleanup: reset potency and flags, request a cell refresh
//!
//! Effects fired by conditions before a `SkipSpell` stay applied.

use tracing::debug;

use super::context::CastContext;
use crate::combat::CombatManager;
use crate::conditions::ConditionResult;
use crate::effects::EffectResolver;
use crate::presentation::{Feedback, SoundCategory};
use crate::spells::RuntimeSpell;

/// How a cast ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastOutcome {
    /// The spell was already marked to skip; nothing ran.
    Skipped,
    /// The spell is disabled; nothing ran.
    Disabled,
    /// A `SkipSpell` condition stopped the cast before the main effects.
    Aborted,
    /// Main effects ran.
    Completed,
}

/// Summary of one cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CastReport {
    pub outcome: CastOutcome,
    /// Conditions that evaluated true.
    pub conditions_passed: usize,
    /// Effect applications from conditions and main effects combined.
    pub effects_applied: usize,
    /// Potency in force when the main effects ran.
    pub potency: f32,
}

impl CastReport {
    fn idle(outcome: CastOutcome) -> Self {
        Self {
            outcome,
            conditions_passed: 0,
            effects_applied: 0,
            potency: 1.0,
        }
    }

    /// Whether the main-effect pass ran.
    #[must_use]
    pub fn completed(&self) -> bool {
        self.outcome == CastOutcome::Completed
    }
}

/// Runs the cast pipeline for one spell.
pub struct SpellCaster;

impl SpellCaster {
    /// Cast `spell` in `cx`.
    ///
    /// Never fails: missing targets, missing linked effects and unknown
    /// content all degrade to no-ops.
    pub fn cast(
        spell: &mut RuntimeSpell,
        cx: &CastContext<'_>,
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> CastReport {
        if spell.was_marked_to_skip() {
            debug!(spell = spell.name(), "spell marked to skip");
            spell.clear_transient();
            return CastReport::idle(CastOutcome::Skipped);
        }
        if spell.is_disabled() {
            debug!(spell = spell.name(), "spell disabled");
            return CastReport::idle(CastOutcome::Disabled);
        }

        debug!(spell = spell.name(), caster = %cx.caster(), cell = ?cx.cell, "casting");
        if let Some(cue) = &spell.definition().cast_sound {
            feedback.play_sound_cue(cue, SoundCategory::Cast);
        }

        let mut report = CastReport::idle(CastOutcome::Completed);

        let conditions = spell.conditions().to_vec();
        for condition in &conditions {
            let evaluation = condition.evaluate_detailed(spell, cx);
            if !evaluation.passed {
                continue;
            }
            report.conditions_passed += 1;

            match condition.result_type() {
                ConditionResult::ModifyPotency => {
                    let multiplier = condition.potency_multiplier();
                    debug!(spell = spell.name(), multiplier, "condition modified potency");
                    spell.multiply_potency(multiplier);
                }
                ConditionResult::TriggerEffect => match condition.effect_for(&evaluation) {
                    Some(effect) => {
                        debug!(
                            spell = spell.name(),
                            matches = ?evaluation.matches,
                            "condition triggered effect"
                        );
                        report.effects_applied += EffectResolver::resolve_and_apply(
                            &effect,
                            spell,
                            &cx.targeting,
                            combat,
                            feedback,
                        );
                    }
                    None => debug!(spell = spell.name(), "condition has no linked effect"),
                },
                ConditionResult::SkipSpell => {
                    debug!(spell = spell.name(), "condition skipped spell");
                    spell.mark_to_skip();
                    report.outcome = CastOutcome::Aborted;
                    break;
                }
            }
        }

        report.potency = spell.potency();

        if report.outcome == CastOutcome::Completed {
            let effects = spell.effects().to_vec();
            for effect in &effects {
                report.effects_applied += EffectResolver::resolve_and_apply(
                    effect,
                    spell,
                    &cx.targeting,
                    combat,
                    feedback,
                );
            }
            if spell.has_charges() {
                spell.consume_charge();
            }
        }

        spell.clear_transient();
        if let Some(cell) = cx.cell {
            feedback.request_visual_refresh(cell);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::Combatant;
    use crate::conditions::{GridPositionCondition, GridPredicate, Outcome};
    use crate::core::{CellPos, CombatantId, SpellId};
    use crate::effects::Effect;
    use crate::grid::SpellGrid;
    use crate::presentation::NoFeedback;
    use crate::spells::SpellDefinition;

    fn combat() -> CombatManager {
        let mut combat = CombatManager::new();
        combat.register_player(Combatant::player(20));
        combat.register_enemy(Combatant::enemy(0, "A", 30, 1));
        combat
    }

    fn enemy_hp(combat: &CombatManager) -> i32 {
        combat.get(CombatantId::enemy(0)).unwrap().hp()
    }

    fn cast_at(spell: &mut RuntimeSpell, cell: CellPos, combat: &mut CombatManager) -> CastReport {
        let grid = SpellGrid::empty(5, 3);
        let cx = CastContext::for_player(&grid, cell, combat, None);
        SpellCaster::cast(spell, &cx, combat, &mut NoFeedback)
    }

    fn on_left(outcome: Outcome) -> GridPositionCondition {
        GridPositionCondition::new(GridPredicate::LeftReel, outcome)
    }

    #[test]
    fn test_main_effects_and_charge() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap")
                .with_charges(1)
                .with_effect(Effect::damage(4)),
        );

        let report = cast_at(&mut spell, CellPos::new(2, 1), &mut combat);
        assert!(report.completed());
        assert_eq!(report.effects_applied, 1);
        assert_eq!(enemy_hp(&combat), 26);
        assert_eq!(spell.charges(), Some(0));
    }

    #[test]
    fn test_potency_applies_then_resets() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap")
                .with_condition(on_left(Outcome::potency(2.0)).into())
                .with_condition(on_left(Outcome::potency(1.5)).into())
                .with_effect(Effect::damage(4)),
        );

        let report = cast_at(&mut spell, CellPos::new(0, 1), &mut combat);
        assert_eq!(report.potency, 3.0);
        assert_eq!(enemy_hp(&combat), 18);
        assert_eq!(spell.potency(), 1.0);
        assert!(!spell.was_potency_modified());
    }

    #[test]
    fn test_skip_keeps_earlier_triggers() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap")
                .with_charges(2)
                .with_condition(on_left(Outcome::trigger(Effect::damage(1))).into())
                .with_condition(on_left(Outcome::SkipSpell).into())
                .with_condition(on_left(Outcome::trigger(Effect::damage(100))).into())
                .with_effect(Effect::damage(10)),
        );

        let report = cast_at(&mut spell, CellPos::new(0, 1), &mut combat);
        assert_eq!(report.outcome, CastOutcome::Aborted);
        assert_eq!(report.conditions_passed, 2);
        assert_eq!(enemy_hp(&combat), 29);
        assert_eq!(spell.charges(), Some(2));
        assert!(!spell.was_marked_to_skip());
    }

    #[test]
    fn test_failing_conditions_do_nothing() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap")
                .with_condition(on_left(Outcome::SkipSpell).into())
                .with_effect(Effect::damage(5)),
        );

        let report = cast_at(&mut spell, CellPos::new(3, 1), &mut combat);
        assert!(report.completed());
        assert_eq!(report.conditions_passed, 0);
        assert_eq!(enemy_hp(&combat), 25);
    }

    #[test]
    fn test_pre_marked_and_disabled() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap").with_effect(Effect::damage(5)),
        );
        let cell = CellPos::new(0, 1);

        spell.mark_to_skip();
        assert_eq!(cast_at(&mut spell, cell, &mut combat).outcome, CastOutcome::Skipped);
        assert!(!spell.was_marked_to_skip());

        spell.set_disabled(true);
        assert_eq!(cast_at(&mut spell, cell, &mut combat).outcome, CastOutcome::Disabled);
        assert_eq!(enemy_hp(&combat), 30);
    }

    #[test]
    fn test_linked_effect_missing_is_noop() {
        let mut combat = combat();
        let mut spell = RuntimeSpell::from_definition(
            SpellDefinition::new(SpellId::new(1), "Zap")
                .with_condition(on_left(Outcome::TriggerEffect { effect: None }).into())
                .with_effect(Effect::damage(5)),
        );

        let report = cast_at(&mut spell, CellPos::new(0, 1), &mut combat);
        assert_eq!(report.conditions_passed, 1);
        assert_eq!(report.effects_applied, 1);
    }
}
