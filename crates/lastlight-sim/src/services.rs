//! Boundary contracts to the rest of the game.
//!
//! The simulation core never owns rendering, audio, entity behavior, or
//! persistence; it talks to them through these traits. A missing service
//! degrades to a no-op: fire-and-forget calls vanish quietly, spawn
//! requests log a warning because the night cannot progress without them.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lastlight_campaign::grading::NightGradeResult;
use lastlight_campaign::objective::DayObjective;
use lastlight_core::types::EconomyMultipliers;

use crate::record::RunRecord;

/// Opaque identifier for a spawned enemy, issued by the spawn service
/// and reported back on death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnemyHandle(pub u64);

/// One enemy spawn, with the fully composed stat multipliers applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    pub position: Vec2,
    pub health_mul: f32,
    pub speed_mul: f32,
    pub damage_mul: f32,
}

/// The enemy factory. Returns `None` when spawning is impossible (no
/// template, pool exhausted); the scheduler retries and eventually
/// force-completes the wave.
pub trait EnemySpawner {
    fn spawn(&mut self, request: &SpawnRequest) -> Option<EnemyHandle>;
}

/// Read access to the player plus the one write path objectives need.
pub trait PlayerTelemetry {
    /// Current health / max health, 0..=1.
    fn health_fraction(&self) -> Option<f32>;
    fn ammo_reserve(&self) -> Option<u32>;
    fn position(&self) -> Option<Vec2>;
    fn grant_ammo(&mut self, rounds: u32);
}

/// Fire-and-forget world population commands issued on Day entry.
pub trait WorldPopulator {
    fn populate_day(&mut self, night: u32, economy: &EconomyMultipliers);
    fn drop_supplies(&mut self, crates: u32);
}

/// Fire-and-forget UI notifications. The core never blocks on these.
pub trait Notifier {
    fn show_message(&mut self, text: &str, duration_secs: f32);
    fn announce_objective(&mut self, objective: &DayObjective);
    fn announce_grade(&mut self, night: u32, result: &NightGradeResult);
}

/// Receives the single run-result submission at GameOver/Victory.
pub trait RunResultSink {
    fn submit(&mut self, record: &RunRecord);
}

/// The injected service registry. All slots are optional; the accessors
/// below encode the per-service degradation policy.
#[derive(Default)]
pub struct Services {
    pub spawner: Option<Box<dyn EnemySpawner>>,
    pub telemetry: Option<Box<dyn PlayerTelemetry>>,
    pub populator: Option<Box<dyn WorldPopulator>>,
    pub notifier: Option<Box<dyn Notifier>>,
    pub result_sink: Option<Box<dyn RunResultSink>>,
}

impl Services {
    pub fn spawn(&mut self, request: &SpawnRequest) -> Option<EnemyHandle> {
        match self.spawner.as_deref_mut() {
            Some(spawner) => spawner.spawn(request),
            None => {
                warn!("enemy_spawner_missing_spawn_skipped");
                None
            }
        }
    }

    pub fn health_fraction(&self) -> Option<f32> {
        self.telemetry.as_deref().and_then(|t| t.health_fraction())
    }

    /// Where to center spawn placement. Falls back to the origin when no
    /// player is reachable.
    pub fn player_position(&self) -> Vec2 {
        self.telemetry
            .as_deref()
            .and_then(|t| t.position())
            .unwrap_or(Vec2::ZERO)
    }

    pub fn grant_ammo(&mut self, rounds: u32) {
        match self.telemetry.as_deref_mut() {
            Some(telemetry) => telemetry.grant_ammo(rounds),
            None => debug!(rounds, "ammo_grant_dropped_no_player"),
        }
    }

    pub fn populate_day(&mut self, night: u32, economy: &EconomyMultipliers) {
        match self.populator.as_deref_mut() {
            Some(populator) => populator.populate_day(night, economy),
            None => debug!(night, "world_populator_missing"),
        }
    }

    pub fn drop_supplies(&mut self, crates: u32) {
        if let Some(populator) = self.populator.as_deref_mut() {
            populator.drop_supplies(crates);
        }
    }

    pub fn show_message(&mut self, text: &str, duration_secs: f32) {
        if let Some(notifier) = self.notifier.as_deref_mut() {
            notifier.show_message(text, duration_secs);
        }
    }

    pub fn announce_objective(&mut self, objective: &DayObjective) {
        if let Some(notifier) = self.notifier.as_deref_mut() {
            notifier.announce_objective(objective);
        }
    }

    pub fn announce_grade(&mut self, night: u32, result: &NightGradeResult) {
        if let Some(notifier) = self.notifier.as_deref_mut() {
            notifier.announce_grade(night, result);
        }
    }

    pub fn submit_result(&mut self, record: &RunRecord) {
        match self.result_sink.as_deref_mut() {
            Some(sink) => sink.submit(record),
            None => warn!(
                score = record.score,
                victory = record.victory,
                "run_result_sink_missing_record_dropped"
            ),
        }
    }
}
