//! The battle sequencer: one state machine driving the turn cycle.
//!
//! ## Turn cycle
//!
//! - `PlayerTurnStart`: clear the target override, wipe the player
//!   shield, tick player start-of-turn statuses, open input.
//! - `AwaitingPlayerInput`: wait for `confirm()`.
//! - `ResolvingPlayerSpells`: cast the centre row left to right, check
//!   victory.
//! - `EnemyTurnStart`: wipe enemy shields, tick player end-of-turn and
//!   enemy start-of-turn statuses.
//! - `ResolvingEnemyActions`: each living enemy casts its intent, enemy
//!   end-of-turn statuses tick, intents re-roll, check defeat.
//!
//! Each call to `advance` performs one phase's work and moves to the
//! next phase. `BattleEnded` is terminal.
//!
//! ## Scheduling
//!
//! Every pause between visual beats goes through `Scheduler::wait`, so a
//! presentation layer can pace the battle while tests run it instantly.

use rustc_hash::FxHashMap;
use tracing::{debug, warn};

use super::intent::IntentPool;
use super::phase::{BattleOutcome, BattlePhase};
use crate::cast::{CastContext, CastReport, SpellCaster};
use crate::combat::{CombatEvent, CombatManager, Combatant, TickTiming};
use crate::core::{BattleConfig, BattleRng, CombatantId};
use crate::grid::SpellGrid;
use crate::presentation::{Feedback, Scheduler, WaitKind, WaitStep};
use crate::spells::{EnemyDefinition, RuntimeSpell, SpellLibrary};

/// A single battle between the player and a line-up of enemies.
pub struct Battle {
    config: BattleConfig,
    combat: CombatManager,
    grid: SpellGrid,
    intents: FxHashMap<CombatantId, IntentPool>,

    phase: BattlePhase,
    turn: u32,
    input_enabled: bool,
    confirmed: bool,
    target_override: Option<CombatantId>,

    reel_rng: BattleRng,
    intent_rng: BattleRng,
}

impl Battle {
    /// Create a battle with a fresh player and an empty grid.
    #[must_use]
    pub fn new(config: BattleConfig) -> Self {
        let mut combat = CombatManager::new();
        combat.register_player(Combatant::player(config.player_max_hp));
        let rng = BattleRng::new(config.seed);
        Self {
            grid: SpellGrid::new(&config),
            combat,
            intents: FxHashMap::default(),
            phase: BattlePhase::PlayerTurnStart,
            turn: 0,
            input_enabled: false,
            confirmed: false,
            target_override: None,
            reel_rng: rng.for_context("reels"),
            intent_rng: rng.for_context("intents"),
            config,
        }
    }

    /// Replace the grid (builder pattern).
    #[must_use]
    pub fn with_grid(mut self, grid: SpellGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Add an enemy and roll its first intent.
    ///
    /// Returns `false` if the enemy could not be registered.
    pub fn add_enemy(&mut self, enemy: Combatant, mut intents: IntentPool) -> bool {
        let id = enemy.id();
        if !self.combat.register_enemy(enemy) {
            return false;
        }
        intents.roll(&mut self.intent_rng);
        self.intents.insert(id, intents);
        true
    }

    /// Build an enemy from content and add it in the next line-up slot.
    ///
    /// The slot follows the highest enemy index ever registered, so dead
    /// enemies and enemies added by hand keep their slots.
    pub fn spawn_enemy(
        &mut self,
        library: &SpellLibrary,
        definition: &EnemyDefinition,
    ) -> Option<CombatantId> {
        let position = self.combat.next_enemy_index() as usize;
        let (enemy, intents) = library.spawn_enemy(definition, position);
        let id = enemy.id();
        if self.add_enemy(enemy, intents) {
            Some(id)
        } else {
            warn!(enemy = %definition.name, %id, "enemy could not be registered; not spawned");
            None
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.phase.outcome()
    }

    /// `Some(true)` once won, `Some(false)` once lost.
    #[must_use]
    pub fn player_won(&self) -> Option<bool> {
        self.outcome().map(|outcome| outcome == BattleOutcome::Won)
    }

    /// Turns started so far, counting the current one.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn combat(&self) -> &CombatManager {
        &self.combat
    }

    pub fn combat_mut(&mut self) -> &mut CombatManager {
        &mut self.combat
    }

    #[must_use]
    pub fn grid(&self) -> &SpellGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut SpellGrid {
        &mut self.grid
    }

    /// An enemy's rolled intent.
    #[must_use]
    pub fn intent(&self, enemy: CombatantId) -> Option<&RuntimeSpell> {
        self.intents.get(&enemy)?.current()
    }

    pub fn intents_mut(&mut self, enemy: CombatantId) -> Option<&mut IntentPool> {
        self.intents.get_mut(&enemy)
    }

    #[must_use]
    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    #[must_use]
    pub fn target_override(&self) -> Option<CombatantId> {
        self.target_override
    }

    /// Take the change records produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.combat.drain_events()
    }

    // === Player input ===

    /// Choose the single-target enemy for this turn's player casts.
    ///
    /// Returns `false` unless `enemy` is a living enemy.
    pub fn set_target_override(&mut self, enemy: CombatantId) -> bool {
        if enemy.is_player() || !self.combat.is_alive(enemy) {
            debug!(%enemy, "target override rejected");
            return false;
        }
        self.target_override = Some(enemy);
        true
    }

    pub fn clear_target_override(&mut self) {
        self.target_override = None;
    }

    /// Spin every reel. Only allowed while waiting for input.
    pub fn spin_reels(&mut self) -> bool {
        if !self.input_enabled {
            return false;
        }
        self.grid.spin_all(&mut self.reel_rng);
        true
    }

    /// Submit the player's turn.
    ///
    /// Accepted once per turn; the input gate closes until the next
    /// player turn starts.
    pub fn confirm(&mut self) -> bool {
        if self.phase != BattlePhase::AwaitingPlayerInput || !self.input_enabled {
            debug!(phase = ?self.phase, "confirm ignored");
            return false;
        }
        self.input_enabled = false;
        self.confirmed = true;
        true
    }

    // === Sequencing ===

    /// Perform the current phase's work and move to the next phase.
    ///
    /// Waiting for input without a confirmation, or an ended battle,
    /// leaves the phase unchanged.
    pub fn advance(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> BattlePhase {
        let next = match self.phase {
            BattlePhase::PlayerTurnStart => self.start_player_turn(),
            BattlePhase::AwaitingPlayerInput if self.confirmed => {
                self.confirmed = false;
                BattlePhase::ResolvingPlayerSpells
            }
            BattlePhase::AwaitingPlayerInput => BattlePhase::AwaitingPlayerInput,
            BattlePhase::ResolvingPlayerSpells => self.resolve_player_spells(scheduler, feedback),
            BattlePhase::EnemyTurnStart => self.start_enemy_turn(),
            BattlePhase::ResolvingEnemyActions => self.resolve_enemy_actions(scheduler, feedback),
            BattlePhase::BattleEnded(_) => return self.phase,
        };
        if next != self.phase {
            debug!(from = ?self.phase, to = ?next, turn = self.turn, "phase transition");
            self.phase = next;
        }
        self.phase
    }

    /// Advance until the battle needs player input or has ended.
    pub fn run_until_input(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> BattlePhase {
        loop {
            let phase = self.advance(scheduler, feedback);
            if phase.is_ended() || (phase == BattlePhase::AwaitingPlayerInput && !self.confirmed) {
                return phase;
            }
        }
    }

    /// Confirm and run until the next input point. Convenience for hosts
    /// and tests that play whole turns.
    pub fn play_turn(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> BattlePhase {
        if self.phase == BattlePhase::PlayerTurnStart {
            self.run_until_input(scheduler, feedback);
        }
        if !self.confirm() {
            return self.phase;
        }
        self.run_until_input(scheduler, feedback)
    }

    /// Cast every non-empty centre-row spell, left to right.
    ///
    /// Each cast runs to completion before the next begins. The casting
    /// spell is lifted out of its cell for the duration of its cast.
    pub fn cast_grid(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> Vec<CastReport> {
        let cells = self.grid.center_cells();
        let mut reports = Vec::with_capacity(cells.len());

        for (index, cell) in cells.into_iter().enumerate() {
            if index > 0 {
                scheduler.wait(WaitStep::new(WaitKind::CastGap, self.config.timings.cast_gap()));
            }
            let Some(mut spell) = self.grid.take(cell) else {
                continue;
            };
            let cx = CastContext::for_player(&self.grid, cell, &self.combat, self.target_override);
            let report = SpellCaster::cast(&mut spell, &cx, &mut self.combat, feedback);
            self.grid.restore(cell, spell);
            reports.push(report);
        }
        reports
    }

    fn start_player_turn(&mut self) -> BattlePhase {
        self.turn += 1;
        self.target_override = None;
        self.combat.reset_player_shield();
        self.combat.tick_statuses(CombatantId::PLAYER, TickTiming::StartOfTurn);
        if self.combat.player_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Lost);
        }
        self.input_enabled = true;
        self.confirmed = false;
        BattlePhase::AwaitingPlayerInput
    }

    fn resolve_player_spells(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> BattlePhase {
        scheduler.wait(WaitStep::new(WaitKind::PreTurn, self.config.timings.pre_turn()));
        self.grid.commit_tallies();
        self.cast_grid(scheduler, feedback);

        if self.combat.all_enemies_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Won);
        }
        if self.combat.player_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Lost);
        }
        scheduler.wait(WaitStep::new(WaitKind::PostTurn, self.config.timings.post_turn()));
        BattlePhase::EnemyTurnStart
    }

    fn start_enemy_turn(&mut self) -> BattlePhase {
        self.combat.reset_enemy_shields();
        self.combat.tick_statuses(CombatantId::PLAYER, TickTiming::EndOfTurn);
        self.combat.tick_enemy_statuses(TickTiming::StartOfTurn);

        if self.combat.player_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Lost);
        }
        if self.combat.all_enemies_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Won);
        }
        BattlePhase::ResolvingEnemyActions
    }

    fn resolve_enemy_actions(
        &mut self,
        scheduler: &mut dyn Scheduler,
        feedback: &mut dyn Feedback,
    ) -> BattlePhase {
        scheduler.wait(WaitStep::new(WaitKind::PreTurn, self.config.timings.pre_turn()));

        let mut acted = 0;
        for enemy in self.combat.roster() {
            if self.combat.player_defeated() {
                break;
            }
            if !self.combat.is_alive(enemy) {
                continue;
            }
            let Some(spell) = self.intents.get_mut(&enemy).and_then(IntentPool::current_mut) else {
                debug!(%enemy, "no intent; enemy skips its action");
                continue;
            };
            if acted > 0 {
                let gap = self.config.timings.enemy_action_gap();
                scheduler.wait(WaitStep::new(WaitKind::EnemyActionGap, gap));
            }
            let cx = CastContext::for_enemy(&self.grid, &self.combat, enemy);
            SpellCaster::cast(spell, &cx, &mut self.combat, feedback);
            acted += 1;
        }

        self.combat.tick_enemy_statuses(TickTiming::EndOfTurn);
        for enemy in self.combat.roster() {
            if let Some(pool) = self.intents.get_mut(&enemy) {
                pool.roll(&mut self.intent_rng);
            }
        }

        if self.combat.player_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Lost);
        }
        if self.combat.all_enemies_defeated() {
            return BattlePhase::BattleEnded(BattleOutcome::Won);
        }
        scheduler.wait(WaitStep::new(WaitKind::PostTurn, self.config.timings.post_turn()));
        BattlePhase::PlayerTurnStart
    }
}
