//! lastlight: headless harness for the survival-loop simulation.
//!
//! Runs a full scripted run at a fixed timestep with an auto-player
//! standing in for the combat layer, logging events as they happen and
//! writing the run record at the end.
//!
//! Usage:
//!   lastlight run --seed 42 --difficulty normal
//!   lastlight records --records-dir ./records

use std::cell::RefCell;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lastlight_campaign::grading::NightGradeResult;
use lastlight_campaign::objective::DayObjective;
use lastlight_core::commands::SimCommand;
use lastlight_core::constants::DT;
use lastlight_core::enums::{Difficulty, Phase};
use lastlight_core::events::GameEvent;
use lastlight_sim::engine::{SimConfig, Simulation};
use lastlight_sim::record::{self, RunRecord};
use lastlight_sim::services::{
    EnemyHandle, EnemySpawner, Notifier, PlayerTelemetry, RunResultSink, SpawnRequest,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "records" => cmd_records(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "lastlight: headless survival-loop harness\n\
         \n\
         Commands:\n\
         \n\
         run       Play a full scripted run and write its record\n\
         \n\
           --seed <N>            RNG seed (default: 42)\n\
           --difficulty <name>   easy | normal | hard (default: normal)\n\
           --records-dir <path>  Where run records are written (default: ./records)\n\
           --max-ticks <N>       Safety cap on simulation ticks (default: 600000)\n\
         \n\
         records   List saved run records, best score first\n\
         \n\
           --records-dir <path>  Records directory (default: ./records)\n\
         \n\
         Examples:\n\
         \n\
           lastlight run --seed 7 --difficulty hard\n\
           lastlight records\n"
    );
}

fn parse_flag(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn cmd_records(args: &[String]) {
    let dir = PathBuf::from(
        parse_flag(args, "--records-dir").unwrap_or_else(|| "records".to_string()),
    );
    let records = record::list_records(&dir);
    if records.is_empty() {
        println!("No records in {}", dir.display());
        return;
    }
    for record in records {
        println!(
            "{:>6}  nights {}  kills {:>3}  {:<6}  {}",
            record.score,
            record.nights_reached,
            record.kills,
            record.difficulty.as_str(),
            if record.victory { "victory" } else { "game over" }
        );
    }
}

fn cmd_run(args: &[String]) {
    let seed: u64 = match parse_flag(args, "--seed") {
        Some(raw) => match raw.parse() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("Invalid --seed: {raw}");
                process::exit(1);
            }
        },
        None => 42,
    };
    let difficulty = match parse_flag(args, "--difficulty") {
        Some(raw) => match Difficulty::parse(&raw) {
            Some(difficulty) => difficulty,
            None => {
                eprintln!("Invalid --difficulty: {raw} (expected easy|normal|hard)");
                process::exit(1);
            }
        },
        None => Difficulty::Normal,
    };
    let records_dir = PathBuf::from(
        parse_flag(args, "--records-dir").unwrap_or_else(|| "records".to_string()),
    );
    let max_ticks: u64 = match parse_flag(args, "--max-ticks") {
        Some(raw) => match raw.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Invalid --max-ticks: {raw}");
                process::exit(1);
            }
        },
        None => 600_000,
    };

    run_scripted(seed, difficulty, records_dir, max_ticks);
}

// --- Scripted stand-ins for the external game ---

/// The auto-player's view of the world: which enemies are up, how long
/// each has left to live, and the player's condition.
struct ScriptedWorld {
    rng: ChaCha8Rng,
    alive: Vec<(u64, f32)>,
    next_handle: u64,
    health: f32,
}

impl ScriptedWorld {
    fn new(seed: u64) -> Self {
        Self {
            // Offset so the harness rolls are independent of the sim's.
            rng: ChaCha8Rng::seed_from_u64(seed.wrapping_add(0x5eed)),
            alive: Vec::new(),
            next_handle: 0,
            health: 1.0,
        }
    }

    /// Tick the auto-player: age every enemy, fight the ones whose time
    /// is up, and return the resulting command batch.
    fn fight(&mut self, dt: f32) -> Vec<SimCommand> {
        let mut commands = Vec::new();
        let mut survivors = Vec::new();
        for (handle, ttl) in self.alive.drain(..) {
            let ttl = ttl - dt;
            if ttl > 0.0 {
                survivors.push((handle, ttl));
                continue;
            }
            // A short exchange per kill: a couple of shots, most landing.
            let shots = self.rng.gen_range(2..5);
            for _ in 0..shots {
                commands.push(SimCommand::WeaponFired);
                if self.rng.gen_bool(0.72) {
                    commands.push(SimCommand::HitConfirmed);
                }
            }
            self.health = (self.health - self.rng.gen_range(0.0..0.04)).max(0.25);
            commands.push(SimCommand::ReportEnemyDeath { handle });
        }
        self.alive = survivors;
        commands
    }
}

struct ScriptedSpawner(Rc<RefCell<ScriptedWorld>>);

impl EnemySpawner for ScriptedSpawner {
    fn spawn(&mut self, _request: &SpawnRequest) -> Option<EnemyHandle> {
        let mut world = self.0.borrow_mut();
        world.next_handle += 1;
        let handle = world.next_handle;
        let ttl = world.rng.gen_range(1.0..4.0);
        world.alive.push((handle, ttl));
        Some(EnemyHandle(handle))
    }
}

struct ScriptedPlayer(Rc<RefCell<ScriptedWorld>>);

impl PlayerTelemetry for ScriptedPlayer {
    fn health_fraction(&self) -> Option<f32> {
        Some(self.0.borrow().health)
    }

    fn ammo_reserve(&self) -> Option<u32> {
        Some(240)
    }

    fn position(&self) -> Option<Vec2> {
        Some(Vec2::ZERO)
    }

    fn grant_ammo(&mut self, rounds: u32) {
        info!(rounds, "ammo_granted");
    }
}

struct LogNotifier;

impl Notifier for LogNotifier {
    fn show_message(&mut self, text: &str, _duration_secs: f32) {
        info!(message = text, "notify");
    }

    fn announce_objective(&mut self, objective: &DayObjective) {
        info!(
            kind = objective.kind.as_str(),
            target = objective.target_count,
            points = objective.point_reward,
            "objective"
        );
    }

    fn announce_grade(&mut self, night: u32, result: &NightGradeResult) {
        info!(
            night,
            grade = result.grade.as_str(),
            score = %format!("{:.1}", result.score),
            "night_graded"
        );
    }
}

struct FileSink {
    dir: PathBuf,
}

impl RunResultSink for FileSink {
    fn submit(&mut self, record: &RunRecord) {
        match record::save_record(&self.dir, record) {
            Ok(path) => info!(path = %path.display(), score = record.score, "record_saved"),
            Err(error) => tracing::error!(%error, "record_save_failed"),
        }
    }
}

// --- The drive loop ---

fn run_scripted(seed: u64, difficulty: Difficulty, records_dir: PathBuf, max_ticks: u64) {
    info!(seed, difficulty = difficulty.as_str(), "run_starting");

    let world = Rc::new(RefCell::new(ScriptedWorld::new(seed)));
    let mut sim = Simulation::new(SimConfig { seed });
    sim.services.spawner = Some(Box::new(ScriptedSpawner(world.clone())));
    sim.services.telemetry = Some(Box::new(ScriptedPlayer(world.clone())));
    sim.services.notifier = Some(Box::new(LogNotifier));
    sim.services.result_sink = Some(Box::new(FileSink { dir: records_dir }));

    sim.queue_command(SimCommand::StartRun { difficulty });

    let mut last_snapshot = sim.build_snapshot();
    for _ in 0..max_ticks {
        match last_snapshot.phase {
            Phase::Day => {
                // Chip away at the objective while the sun is up.
                if last_snapshot.tick % 180 == 0 {
                    sim.queue_command(SimCommand::AddObjectiveProgress { amount: 1 });
                }
            }
            Phase::Night => {
                let commands = world.borrow_mut().fight(DT);
                sim.queue_commands(commands);
            }
            Phase::Dawn => {
                world.borrow_mut().health = 1.0;
                sim.queue_command(SimCommand::AdvanceFromDawn);
            }
            Phase::GameOver | Phase::Victory => break,
            Phase::MainMenu | Phase::Transition => {}
        }

        last_snapshot = sim.tick(DT);
        for event in sim.drain_events() {
            log_event(&event);
        }
    }

    match serde_json::to_string_pretty(&last_snapshot) {
        Ok(json) => println!("{json}"),
        Err(error) => tracing::error!(%error, "snapshot_serialize_failed"),
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::PhaseChanged(e) => {
            info!(from = e.from.as_str(), to = e.to.as_str(), night = e.night, "phase")
        }
        GameEvent::NightRolled(e) => {
            info!(night = e.night, mutation = e.mutation.as_str(), "night_rolled")
        }
        GameEvent::WaveStarted(e) => info!(
            night = e.night,
            wave = e.wave,
            of = e.total_waves,
            enemies = e.enemy_count,
            "wave_started"
        ),
        GameEvent::EnemySpawned(_) => {}
        GameEvent::WaveCleared(e) => info!(night = e.night, wave = e.wave, "wave_cleared"),
        GameEvent::WaveStalled(e) => info!(
            night = e.night,
            wave = e.wave,
            unaccounted = e.enemies_unaccounted,
            "wave_stalled"
        ),
        GameEvent::ObjectiveCompleted(e) => info!(
            kind = e.kind.as_str(),
            points = e.point_reward,
            ammo = e.ammo_reward,
            "objective_complete"
        ),
        GameEvent::NightGraded(e) => info!(
            night = e.night,
            grade = e.grade.as_str(),
            bonus = e.bonus_awarded,
            "graded"
        ),
        GameEvent::ItemUnlocked(e) => info!(item = %e.item, night = e.night, "unlocked"),
        GameEvent::MilestoneCompleted(e) => {
            info!(night = e.night, bonus = e.bonus_points, milestone = %e.description, "milestone")
        }
        GameEvent::RunEnded(e) => info!(
            victory = e.victory,
            score = e.final_score,
            nights = e.nights_survived,
            kills = e.kills,
            "run_ended"
        ),
    }
}
