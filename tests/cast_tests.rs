//! Cast pipeline integration tests.
//!
//! These tests drive `SpellCaster` against a real grid and combat
//! manager, covering charge handling, condition ordering and feedback.

use reel_battle::cast::{CastContext, CastOutcome, SpellCaster};
use reel_battle::combat::{CombatEvent, CombatManager, Combatant, OverTimeKind, TickTiming};
use reel_battle::conditions::{GridPositionCondition, GridPredicate, Outcome};
use reel_battle::core::{CellPos, CombatantId, SpellId};
use reel_battle::effects::{Effect, TargetingMode};
use reel_battle::grid::SpellGrid;
use reel_battle::presentation::{Feedback, FlashKind, NoFeedback, SoundCategory};
use reel_battle::spells::{RuntimeSpell, SpellDefinition};

fn setup() -> CombatManager {
    let mut combat = CombatManager::new();
    combat.register_player(Combatant::player(20));
    combat.register_enemy(Combatant::enemy(0, "Slime", 15, 1));
    combat.register_enemy(Combatant::enemy(1, "Bat", 15, 1));
    combat
}

fn hp(combat: &CombatManager, id: CombatantId) -> i32 {
    combat.get(id).unwrap().hp()
}

fn cast(
    spell: &mut RuntimeSpell,
    grid: &SpellGrid,
    cell: CellPos,
    combat: &mut CombatManager,
) -> CastOutcome {
    let cx = CastContext::for_player(grid, cell, combat, None);
    SpellCaster::cast(spell, &cx, combat, &mut NoFeedback).outcome
}

fn on_left(outcome: Outcome) -> GridPositionCondition {
    GridPositionCondition::new(GridPredicate::LeftReel, outcome)
}

// =============================================================================
// Charges
// =============================================================================

/// Test that a one-charge spell drops to zero and stays there.
#[test]
fn test_charge_never_negative() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Spark")
            .with_charges(1)
            .with_effect(Effect::damage(1)),
    );

    cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);
    assert_eq!(spell.charges(), Some(0));

    for _ in 0..3 {
        cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);
        assert_eq!(spell.charges(), Some(0));
    }
}

/// Test that a charge effect in the main pass lands before the decrement.
#[test]
fn test_charge_effect_then_decrement() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Capacitor")
            .with_charges(0)
            .with_effect(Effect::charge(2)),
    );

    cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);
    assert_eq!(spell.charges(), Some(1));
}

// =============================================================================
// Conditions
// =============================================================================

/// Test that a skip condition stops main effects but keeps earlier triggers.
#[test]
fn test_skip_precedence() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Fizzle")
            .with_condition(on_left(Outcome::trigger(Effect::shield(4))).into())
            .with_condition(on_left(Outcome::SkipSpell).into())
            .with_effect(Effect::damage(9)),
    );

    let outcome = cast(&mut spell, &grid, CellPos::new(0, 1), &mut combat);

    assert_eq!(outcome, CastOutcome::Aborted);
    assert_eq!(hp(&combat, CombatantId::enemy(0)), 15);
    assert_eq!(combat.player().unwrap().shield(), 4);
}

/// Test that the same spell casts normally away from the skip position.
#[test]
fn test_skip_only_where_condition_holds() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Fizzle")
            .with_condition(on_left(Outcome::SkipSpell).into())
            .with_effect(Effect::damage(9)),
    );

    assert_eq!(cast(&mut spell, &grid, CellPos::new(1, 1), &mut combat), CastOutcome::Completed);
    assert_eq!(hp(&combat, CombatantId::enemy(0)), 6);
}

/// Test that potency multipliers stack and round half away from zero.
#[test]
fn test_potency_rounding() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Surge")
            .with_condition(on_left(Outcome::potency(1.5)).into())
            .with_effect(Effect::damage(3)),
    );

    cast(&mut spell, &grid, CellPos::new(0, 1), &mut combat);
    // 3 * 1.5 = 4.5 rounds to 5
    assert_eq!(hp(&combat, CombatantId::enemy(0)), 10);
}

// =============================================================================
// Effects through the pipeline
// =============================================================================

/// Test that a spell-level targeting override hits every enemy.
#[test]
fn test_spell_targeting_override() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Quake")
            .with_targeting(TargetingMode::AllEnemies)
            .with_effect(Effect::damage(4)),
    );

    cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);
    assert_eq!(hp(&combat, CombatantId::enemy(0)), 11);
    assert_eq!(hp(&combat, CombatantId::enemy(1)), 11);
}

/// Test that over-time effects attach a status the combat manager ticks.
#[test]
fn test_over_time_status_ticks() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Venom").with_effect(Effect::over_time(
            OverTimeKind::Damage,
            2,
            2,
            TickTiming::EndOfTurn,
        )),
    );

    cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);
    combat.tick_enemy_statuses(TickTiming::EndOfTurn);
    combat.tick_enemy_statuses(TickTiming::EndOfTurn);
    combat.tick_enemy_statuses(TickTiming::EndOfTurn);

    assert_eq!(hp(&combat, CombatantId::enemy(0)), 11);
    assert!(combat
        .events()
        .iter()
        .any(|event| matches!(event, CombatEvent::StatusExpired { .. })));
}

/// Test that a lethal hit mid-cast removes the enemy before the next effect.
#[test]
fn test_death_mid_cast_retargets() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = CombatManager::new();
    combat.register_player(Combatant::player(20));
    combat.register_enemy(Combatant::enemy(0, "Weak", 3, 1));
    combat.register_enemy(Combatant::enemy(1, "Strong", 15, 1));
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Double Tap")
            .with_effect(Effect::damage(5))
            .with_effect(Effect::damage(5)),
    );

    cast(&mut spell, &grid, CellPos::new(2, 1), &mut combat);

    assert!(!combat.is_alive(CombatantId::enemy(0)));
    assert_eq!(hp(&combat, CombatantId::enemy(1)), 10);
}

// =============================================================================
// Feedback
// =============================================================================

#[derive(Default)]
struct Log {
    cues: Vec<(String, SoundCategory)>,
    flashes: Vec<FlashKind>,
    refreshed: Vec<CellPos>,
}

impl Feedback for Log {
    fn play_sound_cue(&mut self, cue: &str, category: SoundCategory) {
        self.cues.push((cue.to_string(), category));
    }

    fn notify_flash(&mut self, _target: CombatantId, kind: FlashKind) {
        self.flashes.push(kind);
    }

    fn request_visual_refresh(&mut self, cell: CellPos) {
        self.refreshed.push(cell);
    }
}

/// Test that a cast fires its cue, impact flash and cell refresh.
#[test]
fn test_feedback_hooks() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Strike")
            .with_sounds("whoosh", "thud")
            .with_effect(Effect::damage(5)),
    );
    let mut log = Log::default();

    let cell = CellPos::new(3, 1);
    let cx = CastContext::for_player(&grid, cell, &combat, None);
    SpellCaster::cast(&mut spell, &cx, &mut combat, &mut log);

    assert_eq!(
        log.cues,
        vec![
            ("whoosh".to_string(), SoundCategory::Cast),
            ("thud".to_string(), SoundCategory::Impact)
        ]
    );
    assert_eq!(log.flashes, vec![FlashKind::Damage]);
    assert_eq!(log.refreshed, vec![cell]);
}

/// Test that enemy casts request no cell refresh.
#[test]
fn test_enemy_cast_has_no_refresh() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Bite").with_effect(Effect::damage(3)),
    );
    let mut log = Log::default();

    let cx = CastContext::for_enemy(&grid, &combat, CombatantId::enemy(1));
    SpellCaster::cast(&mut spell, &cx, &mut combat, &mut log);

    assert!(log.refreshed.is_empty());
    assert_eq!(hp(&combat, CombatantId::PLAYER), 17);
}

/// Test that applying a status plays its impact cue as a status sound.
#[test]
fn test_status_cue_category() {
    let grid = SpellGrid::empty(5, 3);
    let mut combat = setup();
    let mut spell = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Venom")
            .with_sounds("hiss", "drip")
            .with_effect(Effect::over_time(OverTimeKind::Damage, 2, 2, TickTiming::EndOfTurn)),
    );
    let mut log = Log::default();

    let cx = CastContext::for_player(&grid, CellPos::new(2, 1), &combat, None);
    SpellCaster::cast(&mut spell, &cx, &mut combat, &mut log);

    assert_eq!(
        log.cues,
        vec![
            ("hiss".to_string(), SoundCategory::Cast),
            ("drip".to_string(), SoundCategory::Status)
        ]
    );
    assert_eq!(log.flashes, vec![FlashKind::Status]);
}
