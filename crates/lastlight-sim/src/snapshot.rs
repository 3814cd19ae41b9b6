//! The serializable view of the whole visible sim state, built each tick.

use serde::{Deserialize, Serialize};

use lastlight_core::constants::MAX_NIGHTS;
use lastlight_core::enums::{Difficulty, Grade, MutationKind, ObjectiveKind, Phase, RunModifierKind};

use crate::run_state::RunState;
use crate::timer::DayNightTimer;
use crate::waves::WaveScheduler;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveSnapshot {
    pub wave: u32,
    pub total_waves: u32,
    pub enemies_spawned: u32,
    pub enemies_alive: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveSnapshot {
    pub kind: ObjectiveKind,
    pub progress: u32,
    pub target_count: u32,
    pub complete: bool,
}

/// Complete visible state for drivers and tests. Cheap to build and
/// stable under serde for determinism comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub tick: u64,
    pub phase: Phase,
    pub paused: bool,
    pub night: u32,
    pub max_nights: u32,
    pub phase_time_remaining: f32,
    pub difficulty: Option<Difficulty>,
    pub modifier: Option<RunModifierKind>,
    pub mutation: Option<MutationKind>,
    pub wave: Option<WaveSnapshot>,
    pub objective: Option<ObjectiveSnapshot>,
    pub balance: u32,
    pub total_earned: u32,
    pub kill_count: u32,
    pub highest_grade: Option<Grade>,
    pub night_buff_multiplier: f32,
}

pub fn build(
    tick: u64,
    phase: Phase,
    paused: bool,
    timer: &DayNightTimer,
    run: Option<&RunState>,
    scheduler: Option<&WaveScheduler>,
) -> RunSnapshot {
    let wave = scheduler.map(|s| WaveSnapshot {
        wave: s.wave(),
        total_waves: s.total_waves(),
        enemies_spawned: s.spawned_this_wave(),
        enemies_alive: s.enemies_alive(),
    });
    let objective = run.map(|r| ObjectiveSnapshot {
        kind: r.objective.kind,
        progress: r.objective.progress(),
        target_count: r.objective.target_count,
        complete: r.objective.is_complete(),
    });
    RunSnapshot {
        tick,
        phase,
        paused,
        night: run.map_or(0, |r| r.night),
        max_nights: MAX_NIGHTS,
        phase_time_remaining: timer.remaining(),
        difficulty: run.map(|r| r.difficulty),
        modifier: run.map(|r| r.modifier),
        mutation: run.map(|r| r.mutation),
        wave,
        objective,
        balance: run.map_or(0, |r| r.economy.balance()),
        total_earned: run.map_or(0, |r| r.economy.total_earned()),
        kill_count: run.map_or(0, |r| r.kill_count),
        highest_grade: run.map(|r| r.highest_grade),
        night_buff_multiplier: run.map_or(1.0, |r| r.night_buff_multiplier),
    }
}
