//! Effect resolution - executing effects on combat state.
//!
//! The `EffectResolver` applies one effect to a resolved target list.
//! Combatant effects go through the `CombatManager`, which records the
//! change; spell-internal effects mutate the casting `RuntimeSpell`.
//!
//! Presentation cues (flash, floating number, impact sound) are fired
//! through the `Feedback` hook after each change. The impact sound of a
//! status application plays in the `Status` category. Nothing here
//! depends on what the hook does.

use tracing::{debug, warn};

use super::effect::{Effect, EffectKind, TargetingMode};
use super::targeting::{TargetResolver, TargetingContext};
use crate::combat::{CombatManager, StatusApplied, StatusEffectInstance};
use crate::core::CombatantId;
use crate::presentation::{Feedback, FlashKind, NumberKind, SoundCategory};
use crate::spells::RuntimeSpell;

/// Applies effects to combat state.
pub struct EffectResolver;

impl EffectResolver {
    /// The targeting mode an effect uses when cast by `spell`.
    ///
    /// A spell-level override replaces every combatant effect's own mode.
    /// Spell-internal effects always target the casting spell.
    #[must_use]
    pub fn effective_mode(effect: &Effect, spell: &RuntimeSpell) -> TargetingMode {
        if effect.is_spell_internal() {
            return TargetingMode::SelfTarget;
        }
        spell
            .definition()
            .targeting_override
            .unwrap_or_else(|| effect.targeting_mode())
    }

    /// Resolve targets for `effect` and apply it.
    ///
    /// Returns the number of applications performed.
    pub fn resolve_and_apply(
        effect: &Effect,
        spell: &mut RuntimeSpell,
        targeting: &TargetingContext,
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> usize {
        let mode = Self::effective_mode(effect, spell);
        let targets = TargetResolver::resolve(effect.target_type(), mode, targeting, combat);
        Self::apply(effect, spell, &targets, combat, feedback)
    }

    /// Apply `effect` to already-resolved targets.
    ///
    /// Spell-internal effects ignore `targets` and apply once to `spell`.
    /// Returns the number of applications performed.
    pub fn apply(
        effect: &Effect,
        spell: &mut RuntimeSpell,
        targets: &[CombatantId],
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> usize {
        match &effect.kind {
            EffectKind::Charge { amount } => return usize::from(spell.add_charges(*amount)),
            EffectKind::Tally { amount } => return usize::from(spell.add_tally(*amount)),
            _ => {}
        }

        if targets.is_empty() {
            debug!(spell = spell.name(), "effect resolved no targets");
            return 0;
        }

        let amount = effect.magnitude(spell.potency());
        let category = match effect.kind {
            EffectKind::OverTime { .. } => SoundCategory::Status,
            _ => SoundCategory::Impact,
        };
        let mut applied = 0;
        for &target in targets {
            let landed = match &effect.kind {
                EffectKind::Damage { .. } => Self::apply_damage(target, amount, combat, feedback),
                EffectKind::Heal { .. } => Self::apply_heal(target, amount, combat, feedback),
                EffectKind::Shield { .. } => Self::apply_shield(target, amount, combat, feedback),
                EffectKind::OverTime { kind, timing, .. } => {
                    let duration = effect.scaled_duration().unwrap_or(0);
                    let status = StatusEffectInstance::new(*kind, amount, duration, *timing)
                        .with_source(spell.name(), spell.definition().icon.clone());
                    let result = combat.apply_status(target, status);
                    if result != StatusApplied::Ignored {
                        feedback.notify_flash(target, FlashKind::Status);
                    }
                    result != StatusApplied::Ignored
                }
                EffectKind::Charge { .. } | EffectKind::Tally { .. } => false,
            };
            if landed {
                applied += 1;
                if let Some(cue) = &spell.definition().impact_sound {
                    feedback.play_sound_cue(cue, category);
                }
            }
        }
        applied
    }

    fn apply_damage(
        target: CombatantId,
        amount: i32,
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> bool {
        let Some(result) = combat.damage(target, amount) else {
            return false;
        };
        feedback.notify_flash(target, FlashKind::Damage);
        if result.absorbed > 0 {
            feedback.notify_floating_number(target, result.absorbed, NumberKind::Absorbed);
        }
        if result.hp_lost > 0 {
            feedback.notify_floating_number(target, result.hp_lost, NumberKind::Damage);
        }
        true
    }

    fn apply_heal(
        target: CombatantId,
        amount: i32,
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> bool {
        if !combat.is_alive(target) {
            return false;
        }
        let healed = combat.heal(target, amount);
        feedback.notify_flash(target, FlashKind::Heal);
        feedback.notify_floating_number(target, healed, NumberKind::Heal);
        true
    }

    fn apply_shield(
        target: CombatantId,
        amount: i32,
        combat: &mut CombatManager,
        feedback: &mut dyn Feedback,
    ) -> bool {
        if !combat.is_alive(target) {
            return false;
        }
        if amount < 0 {
            warn!(%target, amount, "negative shield amount ignored");
            return false;
        }
        combat.shield(target, amount);
        feedback.notify_flash(target, FlashKind::Shield);
        feedback.notify_floating_number(target, amount, NumberKind::Shield);
        true
    }
}
