//! The simulation orchestrator.
//!
//! `Simulation` reacts to timer and wave events, applies phase side
//! effects in order, and queues commands for processing at the next tick
//! boundary. One instance, one logical timeline: no threads, no globals.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use lastlight_campaign::grading::{grade_night, NightPerformanceStats};
use lastlight_campaign::objective::DayObjective;
use lastlight_core::commands::SimCommand;
use lastlight_core::constants::*;
use lastlight_core::enums::{Difficulty, Phase};
use lastlight_core::events::*;
use lastlight_core::types::{compose_economy, difficulty_profile, run_modifier};

use crate::mutation::roll_mutation;
use crate::phase::PhaseMachine;
use crate::record::RunRecord;
use crate::run_state::RunState;
use crate::services::{EnemyHandle, Services};
use crate::snapshot::{self, RunSnapshot};
use crate::timer::{day_duration_for, DayNightTimer};
use crate::waves::WaveScheduler;

/// Configuration for a new simulation. Same seed, same run.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation core. Owns every component of the survival loop and
/// the service registry the outside world is reached through.
pub struct Simulation {
    seed: u64,
    rng: ChaCha8Rng,
    phase: PhaseMachine,
    timer: DayNightTimer,
    run: Option<RunState>,
    scheduler: Option<WaveScheduler>,
    paused: bool,
    tick: u64,
    command_queue: VecDeque<SimCommand>,
    pending_events: Vec<GameEvent>,
    pub services: Services,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            seed: config.seed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            phase: PhaseMachine::new(),
            timer: DayNightTimer::idle(),
            run: None,
            scheduler: None,
            paused: false,
            tick: 0,
            command_queue: VecDeque::new(),
            pending_events: Vec::new(),
            services: Services::default(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting
    /// snapshot. While paused, commands are still processed but time
    /// does not move.
    pub fn tick(&mut self, dt: f32) -> RunSnapshot {
        self.process_commands();
        if !self.paused {
            self.advance(dt);
        }
        self.tick += 1;
        self.build_snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.phase.phase()
    }

    pub fn run_state(&self) -> Option<&RunState> {
        self.run.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Drain all game events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn build_snapshot(&self) -> RunSnapshot {
        snapshot::build(
            self.tick,
            self.phase.phase(),
            self.paused,
            &self.timer,
            self.run.as_ref(),
            self.scheduler.as_ref(),
        )
    }

    // --- Time advancement ---

    fn advance(&mut self, dt: f32) {
        match self.phase.phase() {
            Phase::Day => {
                if self.timer.tick(dt) {
                    self.begin_transition();
                }
            }
            Phase::Transition => {
                if self.timer.tick(dt) {
                    self.begin_night();
                }
            }
            Phase::Night => {
                // The night timer only measures clear speed; expiring it
                // does not end the night.
                self.timer.tick(dt);
                if let Some(scheduler) = self.scheduler.as_mut() {
                    let done = scheduler.tick(
                        dt,
                        &mut self.rng,
                        &mut self.services,
                        self.tick,
                        &mut self.pending_events,
                    );
                    if done {
                        self.night_cleared();
                    }
                }
            }
            Phase::MainMenu | Phase::Dawn | Phase::GameOver | Phase::Victory => {}
        }
    }

    // --- Command processing ---

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                SimCommand::StartRun { difficulty } => {
                    if self.phase.phase() == Phase::MainMenu {
                        self.start_run(difficulty);
                    } else {
                        warn!(phase = self.phase.phase().as_str(), "start_run_ignored");
                    }
                }
                SimCommand::Restart { difficulty } => {
                    self.return_to_menu();
                    self.start_run(difficulty);
                }
                SimCommand::ReturnToMainMenu => self.return_to_menu(),
                SimCommand::AdvanceFromDawn => {
                    if self.phase.phase() == Phase::Dawn {
                        self.advance_from_dawn();
                    } else {
                        warn!(
                            phase = self.phase.phase().as_str(),
                            "advance_from_dawn_ignored"
                        );
                    }
                }
                SimCommand::SetPaused { paused } => {
                    self.paused = paused;
                    self.timer.set_paused(paused);
                }
                SimCommand::ReportPlayerDeath => {
                    if self.set_phase(Phase::GameOver) {
                        self.end_run(false);
                    }
                }
                SimCommand::ReportEnemyDeath { handle } => {
                    self.enemy_died(EnemyHandle(handle));
                }
                SimCommand::WeaponFired => {
                    if let Some(run) = self.run.as_mut() {
                        run.economy.record_shot();
                    }
                }
                SimCommand::HitConfirmed => {
                    if let Some(run) = self.run.as_mut() {
                        run.economy.record_hit();
                    }
                }
                SimCommand::AddObjectiveProgress { amount } => {
                    self.objective_progress(amount);
                }
                SimCommand::PurchaseUnlock { item } => {
                    self.purchase_unlock(&item);
                }
                SimCommand::ForceNightEnd => {
                    if self.phase.phase() == Phase::Night {
                        info!("force_night_end");
                        if let Some(scheduler) = self.scheduler.as_mut() {
                            scheduler.force_complete();
                        }
                        self.night_cleared();
                    } else {
                        warn!(
                            phase = self.phase.phase().as_str(),
                            "force_night_end_ignored"
                        );
                    }
                }
            }
        }
    }

    // --- Phase side effects ---

    /// Attempt a phase transition and emit the change event on success.
    fn set_phase(&mut self, to: Phase) -> bool {
        let from = self.phase.phase();
        if !self.phase.transition(to) {
            return false;
        }
        let night = self.run.as_ref().map_or(0, |r| r.night);
        self.pending_events
            .push(GameEvent::PhaseChanged(PhaseChangedEvent {
                from,
                to,
                night,
                tick: self.tick,
            }));
        true
    }

    fn start_run(&mut self, difficulty: Difficulty) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut run = RunState::new(self.seed, difficulty);
        for item in run.progression.check_unlocks(run.night) {
            self.pending_events
                .push(GameEvent::ItemUnlocked(ItemUnlockedEvent {
                    item,
                    night: run.night,
                    tick: self.tick,
                }));
        }
        self.run = Some(run);
        if self.set_phase(Phase::Day) {
            self.enter_day();
        }
    }

    /// Day-entry side effects shared by run start and dawn advance: the
    /// pacing timer, world population, and the objective announcement.
    fn enter_day(&mut self) {
        let (night, mutation, economy_mults, objective) = match self.run.as_ref() {
            Some(run) => (
                run.night,
                run.mutation,
                compose_economy(
                    &difficulty_profile(run.difficulty),
                    &run_modifier(run.modifier),
                ),
                run.objective.clone(),
            ),
            None => return,
        };
        self.timer.start(day_duration_for(night));
        self.timer.set_paused(self.paused);
        self.pending_events
            .push(GameEvent::NightRolled(NightRolledEvent {
                night,
                mutation,
                tick: self.tick,
            }));
        self.services.populate_day(night, &economy_mults);
        self.services.announce_objective(&objective);
    }

    fn begin_transition(&mut self) {
        if self.set_phase(Phase::Transition) {
            self.timer.start(TRANSITION_DURATION);
            self.timer.set_paused(self.paused);
        }
    }

    fn begin_night(&mut self) {
        let scheduler = match self.run.as_mut() {
            Some(run) => {
                run.economy.reset_night_telemetry();
                WaveScheduler::new(run.night, run.difficulty, run.modifier, run.mutation)
            }
            None => return,
        };
        self.scheduler = Some(scheduler);
        if self.set_phase(Phase::Night) {
            self.timer.start(NIGHT_TIME_LIMIT);
            self.timer.set_paused(self.paused);
        }
    }

    /// Settle a survived night: grade it, pay out, and move to Dawn or
    /// Victory. The scheduler is destroyed here in all cases.
    fn night_cleared(&mut self) {
        self.scheduler = None;
        let stats = self.collect_night_stats();
        let result = grade_night(&stats);

        let (night, is_final) = {
            let run = match self.run.as_mut() {
                Some(run) => run,
                None => return,
            };
            run.nights_survived += 1;
            run.economy.add_points(result.awarded_points());
            run.record_grade(result.grade);
            let night = run.night;
            if let Some((description, bonus_points)) =
                run.progression.complete_milestone(night, &mut run.economy)
            {
                self.pending_events
                    .push(GameEvent::MilestoneCompleted(MilestoneCompletedEvent {
                        night,
                        description,
                        bonus_points,
                        tick: self.tick,
                    }));
            }
            (night, night >= MAX_NIGHTS)
        };

        self.pending_events
            .push(GameEvent::NightGraded(NightGradedEvent {
                night,
                score: result.score,
                grade: result.grade,
                bonus_awarded: result.awarded_points(),
                tick: self.tick,
            }));
        self.services.announce_grade(night, &result);

        if is_final {
            if self.set_phase(Phase::Victory) {
                self.end_run(true);
            }
        } else if self.set_phase(Phase::Dawn) {
            self.timer = DayNightTimer::idle();
        }
    }

    fn advance_from_dawn(&mut self) {
        {
            let run = match self.run.as_mut() {
                Some(run) => run,
                None => return,
            };
            run.night += 1;
            run.mutation = roll_mutation(self.seed, run.night);
            run.objective = DayObjective::generate(self.seed, run.night);
            let night = run.night;
            for item in run.progression.check_unlocks(night) {
                self.pending_events
                    .push(GameEvent::ItemUnlocked(ItemUnlockedEvent {
                        item,
                        night,
                        tick: self.tick,
                    }));
            }
        }
        if self.set_phase(Phase::Day) {
            self.enter_day();
        }
    }

    fn return_to_menu(&mut self) {
        // Cancellation point: no in-flight wave or countdown survives.
        self.scheduler = None;
        self.run = None;
        self.timer = DayNightTimer::idle();
        self.paused = false;
        if self.phase.phase() != Phase::MainMenu {
            self.set_phase(Phase::MainMenu);
        }
    }

    fn end_run(&mut self, victory: bool) {
        self.scheduler = None;
        self.timer = DayNightTimer::idle();
        let run = match self.run.as_ref() {
            Some(run) => run,
            None => return,
        };
        let record = RunRecord::from_run(run, self.seed, victory);
        self.pending_events.push(GameEvent::RunEnded(RunEndedEvent {
            victory,
            final_score: record.score,
            nights_survived: run.nights_survived,
            kills: run.kill_count,
            tick: self.tick,
        }));
        self.services.submit_result(&record);
    }

    // --- Reports from the outside world ---

    fn enemy_died(&mut self, handle: EnemyHandle) {
        let known = self
            .scheduler
            .as_mut()
            .map(|scheduler| scheduler.report_death(handle))
            .unwrap_or(false);
        if known {
            if let Some(run) = self.run.as_mut() {
                run.kill_count += 1;
                run.economy.add_points(KILL_POINTS);
            }
        } else {
            warn!(handle = handle.0, "enemy_death_for_unknown_handle");
        }
    }

    fn objective_progress(&mut self, amount: u32) {
        let reward = match self.run.as_mut() {
            Some(run) => {
                if !run.objective.add_progress(amount) {
                    return;
                }
                run.economy.add_points(run.objective.point_reward);
                run.night_buff_multiplier = run.objective.night_buff_multiplier.max(1.0);
                Some((
                    run.night,
                    run.objective.kind,
                    run.objective.point_reward,
                    run.objective.ammo_reward,
                ))
            }
            None => None,
        };
        let (night, kind, point_reward, ammo_reward) = match reward {
            Some(reward) => reward,
            None => return,
        };
        self.services.grant_ammo(ammo_reward);
        self.services.drop_supplies(OBJECTIVE_SUPPLY_CRATES);
        self.services.show_message("Objective complete", 3.0);
        self.pending_events
            .push(GameEvent::ObjectiveCompleted(ObjectiveCompletedEvent {
                kind,
                night,
                point_reward,
                ammo_reward,
                tick: self.tick,
            }));
    }

    fn purchase_unlock(&mut self, item: &str) {
        let run = match self.run.as_mut() {
            Some(run) => run,
            None => {
                warn!(item, "purchase_without_active_run");
                return;
            }
        };
        match run.progression.purchase(item, &mut run.economy) {
            Ok(cost) => info!(item, cost, "weapon_purchased"),
            Err(error) => warn!(item, %error, "purchase_rejected"),
        }
    }

    // --- Grading inputs ---

    fn collect_night_stats(&self) -> NightPerformanceStats {
        let run = self.run.as_ref();
        let accuracy = run
            .and_then(|r| r.economy.accuracy())
            .unwrap_or(DEFAULT_ACCURACY);
        let damage_taken_fraction = self
            .services
            .health_fraction()
            .map(|health| (1.0 - health).clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_DAMAGE_TAKEN);
        let clear_speed_score = if self.timer.is_running() {
            (1.0 - self.timer.normalized_elapsed()).clamp(0.0, 1.0)
        } else {
            DEFAULT_CLEAR_SPEED
        };
        let objective_completed = run.is_some_and(|r| r.objective.is_complete());
        NightPerformanceStats {
            accuracy,
            damage_taken_fraction,
            clear_speed_score,
            objective_completed,
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
