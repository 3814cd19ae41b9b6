//! Discrete game events drained by the driver each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Grade, MutationKind, ObjectiveKind, Phase};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseChangedEvent {
    pub from: Phase,
    pub to: Phase,
    pub night: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightRolledEvent {
    pub night: u32,
    pub mutation: MutationKind,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveStartedEvent {
    pub night: u32,
    pub wave: u32,
    pub total_waves: u32,
    pub enemy_count: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawnedEvent {
    pub handle: u64,
    pub night: u32,
    pub wave: u32,
    pub x: f32,
    pub y: f32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveClearedEvent {
    pub night: u32,
    pub wave: u32,
    pub tick: u64,
}

/// A wave made no progress for the stall timeout and was force-completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveStalledEvent {
    pub night: u32,
    pub wave: u32,
    pub enemies_unaccounted: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectiveCompletedEvent {
    pub kind: ObjectiveKind,
    pub night: u32,
    pub point_reward: u32,
    pub ammo_reward: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightGradedEvent {
    pub night: u32,
    pub score: f32,
    pub grade: Grade,
    pub bonus_awarded: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUnlockedEvent {
    pub item: String,
    pub night: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MilestoneCompletedEvent {
    pub night: u32,
    pub description: String,
    pub bonus_points: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEndedEvent {
    pub victory: bool,
    pub final_score: u32,
    pub nights_survived: u32,
    pub kills: u32,
    pub tick: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(PhaseChangedEvent),
    NightRolled(NightRolledEvent),
    WaveStarted(WaveStartedEvent),
    EnemySpawned(EnemySpawnedEvent),
    WaveCleared(WaveClearedEvent),
    WaveStalled(WaveStalledEvent),
    ObjectiveCompleted(ObjectiveCompletedEvent),
    NightGraded(NightGradedEvent),
    ItemUnlocked(ItemUnlockedEvent),
    MilestoneCompleted(MilestoneCompletedEvent),
    RunEnded(RunEndedEvent),
}
