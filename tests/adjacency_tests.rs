//! Adjacency and mirror condition integration tests.
//!
//! These tests cast from a populated 5x3 grid, lifting the casting spell
//! out of its cell the way the battle sequencer does.

use reel_battle::cast::{CastContext, SpellCaster};
use reel_battle::combat::{CombatManager, Combatant};
use reel_battle::conditions::{
    AdjacencyCondition, AdjacencyScope, Comparison, Condition, Outcome,
};
use reel_battle::core::{CellPos, CombatantId, SpellId};
use reel_battle::effects::Effect;
use reel_battle::grid::SpellGrid;
use reel_battle::presentation::NoFeedback;
use reel_battle::spells::{RuntimeSpell, SpellColor, SpellDefinition};

fn combat() -> CombatManager {
    let mut combat = CombatManager::new();
    combat.register_player(Combatant::player(20));
    combat.register_enemy(Combatant::enemy(0, "Dummy", 100, 1));
    combat
}

fn plain(id: u32) -> RuntimeSpell {
    RuntimeSpell::from_definition(SpellDefinition::new(SpellId::new(id), format!("Spell {id}")))
}

fn skip_if(scope: AdjacencyScope, comparison: Comparison) -> AdjacencyCondition {
    AdjacencyCondition::new(scope, comparison, Outcome::SkipSpell)
}

/// Evaluate `condition` for `caster` at `cell` with the cell emptied.
fn evaluate(
    grid: &mut SpellGrid,
    cell: CellPos,
    caster: &RuntimeSpell,
    condition: &Condition,
) -> bool {
    let lifted = grid.take(cell);
    let combat = combat();
    let passed = {
        let cx = CastContext::for_player(&*grid, cell, &combat, None);
        condition.evaluate(caster, &cx)
    };
    if let Some(spell) = lifted {
        grid.restore(cell, spell);
    }
    passed
}

// =============================================================================
// Duplicates
// =============================================================================

/// Test that a spell flanked by two copies meets a two-match threshold.
#[test]
fn test_adjacency_duplicate_count() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(1, 1), plain(7))
        .with_spell(CellPos::new(2, 1), plain(7))
        .with_spell(CellPos::new(3, 1), plain(7));
    let condition: Condition = skip_if(AdjacencyScope::Horizontal, Comparison::IsDuplicate)
        .with_required(2)
        .into();

    assert!(evaluate(&mut grid, CellPos::new(2, 1), &plain(7), &condition));
}

/// Test that one copy falls short of a two-match threshold.
#[test]
fn test_adjacency_threshold_not_met() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(1, 1), plain(7))
        .with_spell(CellPos::new(2, 1), plain(7))
        .with_spell(CellPos::new(3, 1), plain(8));
    let condition: Condition = skip_if(AdjacencyScope::Horizontal, Comparison::IsDuplicate)
        .with_required(2)
        .into();

    assert!(!evaluate(&mut grid, CellPos::new(2, 1), &plain(7), &condition));
}

/// Test that a scaling condition multiplies its effect by the match count.
#[test]
fn test_scaled_trigger_through_cast() {
    let chain = SpellDefinition::new(SpellId::new(3), "Chain").with_condition(
        AdjacencyCondition::new(
            AdjacencyScope::AllSurrounding,
            Comparison::IsDuplicate,
            Outcome::trigger(Effect::damage(2)),
        )
        .scaling()
        .into(),
    );
    let spell = RuntimeSpell::from_definition(chain);
    let cell = CellPos::new(2, 1);
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(1, 0), spell.clone())
        .with_spell(CellPos::new(3, 2), spell.clone())
        .with_spell(CellPos::new(2, 2), spell.clone())
        .with_spell(cell, spell);
    let mut combat = combat();

    let mut caster = grid.take(cell).unwrap();
    {
        let cx = CastContext::for_player(&grid, cell, &combat, None);
        SpellCaster::cast(&mut caster, &cx, &mut combat, &mut NoFeedback);
    }
    grid.restore(cell, caster);

    // Three neighbours, 2 damage each
    assert_eq!(combat.get(CombatantId::enemy(0)).unwrap().hp(), 94);
    // The authored effect keeps its unit scale
    let restored = grid.take(cell).unwrap();
    assert_eq!(restored.conditions()[0].linked_effect().unwrap().scale(), 1);
}

// =============================================================================
// Value comparisons
// =============================================================================

/// Test colour and tally comparisons against neighbours.
#[test]
fn test_color_and_tally_comparisons() {
    let red = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Ember")
            .with_color(SpellColor::Red)
            .with_tally(2),
    );
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(2, 0), red.clone())
        .with_spell(CellPos::new(2, 2), red);
    let cell = CellPos::new(2, 1);

    let color: Condition = AdjacencyCondition::new(
        AdjacencyScope::Vertical,
        Comparison::Color { color: SpellColor::Red },
        Outcome::SkipSpell,
    )
    .with_required(2)
    .into();
    assert!(evaluate(&mut grid, cell, &plain(9), &color));

    let tally: Condition = AdjacencyCondition::new(
        AdjacencyScope::Vertical,
        Comparison::TallyEquals { value: 2 },
        Outcome::SkipSpell,
    )
    .into();
    assert!(evaluate(&mut grid, cell, &plain(9), &tally));

    let changed: Condition = skip_if(AdjacencyScope::Vertical, Comparison::TallyChanged).into();
    assert!(!evaluate(&mut grid, cell, &plain(9), &changed));
}

/// Test that tally changes since the last commit are detected.
#[test]
fn test_tally_changed_after_commit() {
    let counter = RuntimeSpell::from_definition(
        SpellDefinition::new(SpellId::new(1), "Counter").with_tally(0),
    );
    let mut grid = SpellGrid::empty(5, 3).with_spell(CellPos::new(1, 1), counter);
    grid.commit_tallies();
    let changed: Condition = skip_if(AdjacencyScope::Horizontal, Comparison::TallyChanged).into();

    assert!(!evaluate(&mut grid, CellPos::new(2, 1), &plain(9), &changed));

    grid.spell_at_mut(CellPos::new(1, 1)).unwrap().add_tally(1);
    assert!(evaluate(&mut grid, CellPos::new(2, 1), &plain(9), &changed));
}

// =============================================================================
// Mirrors
// =============================================================================

/// Test the global mirror: (0,1) reflects to (4,1) on a 5x3 grid.
#[test]
fn test_mirrored_check() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(0, 1), plain(5))
        .with_spell(CellPos::new(4, 1), plain(5));
    let condition: Condition = skip_if(AdjacencyScope::GlobalGrid, Comparison::IsMirrored).into();

    assert!(evaluate(&mut grid, CellPos::new(0, 1), &plain(5), &condition));
    assert!(evaluate(&mut grid, CellPos::new(4, 1), &plain(5), &condition));
}

/// Test that a different spell in the reflected cell does not match.
#[test]
fn test_mirrored_check_mismatch() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(0, 1), plain(5))
        .with_spell(CellPos::new(4, 1), plain(6));
    let condition: Condition = skip_if(AdjacencyScope::GlobalGrid, Comparison::IsMirrored).into();

    assert!(!evaluate(&mut grid, CellPos::new(0, 1), &plain(5), &condition));
}

/// Test the point reflection off the centre row.
#[test]
fn test_mirror_reflects_rows() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(1, 0), plain(5))
        .with_spell(CellPos::new(3, 2), plain(5));
    let condition: Condition =
        skip_if(AdjacencyScope::GlobalGrid, Comparison::MirroredDuplicate).into();

    assert!(evaluate(&mut grid, CellPos::new(1, 0), &plain(5), &condition));
}

/// Test that a casting cell beyond the grid bounds never matches its mirror.
#[test]
fn test_mirror_outside_grid_fails_closed() {
    let mut grid = SpellGrid::empty(5, 3).with_spell(CellPos::new(0, 1), plain(5));
    let condition: Condition = skip_if(AdjacencyScope::GlobalGrid, Comparison::IsMirrored).into();

    assert!(!evaluate(&mut grid, CellPos::new(5, 1), &plain(5), &condition));
    assert!(!evaluate(&mut grid, CellPos::new(4, 3), &plain(5), &condition));
}

/// Test diagonal mirror pairs around the casting cell.
#[test]
fn test_local_diagonal_mirror() {
    let mut grid = SpellGrid::empty(5, 3)
        .with_spell(CellPos::new(1, 0), plain(4))
        .with_spell(CellPos::new(3, 2), plain(4))
        .with_spell(CellPos::new(3, 0), plain(4))
        .with_spell(CellPos::new(1, 2), plain(5));
    let condition: Condition = skip_if(AdjacencyScope::Diagonal, Comparison::IsMirrored)
        .with_required(2)
        .into();

    // Only the (1,0)-(3,2) pair matches
    assert!(!evaluate(&mut grid, CellPos::new(2, 1), &plain(9), &condition));

    grid.place(CellPos::new(1, 2), plain(4));
    assert!(evaluate(&mut grid, CellPos::new(2, 1), &plain(9), &condition));
}
