//! Multiplier bundles and their pure composition.
//!
//! Three layers scale the simulation: the difficulty preset (chosen once
//! per run), the run modifier (rolled once per run), and the night
//! mutation (rolled per night). Composition is a plain product per axis,
//! clamped to a floor so stacked reductions stay sane.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Difficulty, MutationKind, RunModifierKind};

/// Static multiplier bundle for a difficulty preset. Immutable once
/// selected; the `score` multiplier applies only to the final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub player_health: f32,
    pub player_damage_taken: f32,
    pub enemy_health: f32,
    pub enemy_damage: f32,
    pub enemy_speed: f32,
    pub wave_enemy_count: f32,
    pub spawn_interval: f32,
    pub resource_spawn: f32,
    pub ammo_drop: f32,
    pub health_pickup: f32,
    pub score: f32,
}

/// The three fixed presets.
pub fn difficulty_profile(difficulty: Difficulty) -> DifficultyProfile {
    match difficulty {
        Difficulty::Easy => DifficultyProfile {
            player_health: 1.25,
            player_damage_taken: 0.8,
            enemy_health: 0.85,
            enemy_damage: 0.8,
            enemy_speed: 0.9,
            wave_enemy_count: 0.8,
            spawn_interval: 1.2,
            resource_spawn: 1.25,
            ammo_drop: 1.25,
            health_pickup: 1.25,
            score: 0.75,
        },
        Difficulty::Normal => DifficultyProfile {
            player_health: 1.0,
            player_damage_taken: 1.0,
            enemy_health: 1.0,
            enemy_damage: 1.0,
            enemy_speed: 1.0,
            wave_enemy_count: 1.0,
            spawn_interval: 1.0,
            resource_spawn: 1.0,
            ammo_drop: 1.0,
            health_pickup: 1.0,
            score: 1.0,
        },
        Difficulty::Hard => DifficultyProfile {
            player_health: 0.85,
            player_damage_taken: 1.25,
            enemy_health: 1.3,
            enemy_damage: 1.25,
            enemy_speed: 1.1,
            wave_enemy_count: 1.25,
            spawn_interval: 0.85,
            resource_spawn: 0.8,
            ammo_drop: 0.8,
            health_pickup: 0.75,
            score: 1.5,
        },
    }
}

/// Run-long multiplier bundle. Exactly one is active per run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunModifier {
    pub enemy_health_mul: f32,
    pub enemy_speed_mul: f32,
    pub enemy_damage_mul: f32,
    pub ammo_drop_mul: f32,
}

pub fn run_modifier(kind: RunModifierKind) -> RunModifier {
    match kind {
        RunModifierKind::Ironhide => RunModifier {
            enemy_health_mul: 1.3,
            enemy_speed_mul: 1.0,
            enemy_damage_mul: 1.0,
            ammo_drop_mul: 1.1,
        },
        RunModifierKind::Rabid => RunModifier {
            enemy_health_mul: 0.9,
            enemy_speed_mul: 1.25,
            enemy_damage_mul: 1.0,
            ammo_drop_mul: 1.0,
        },
        RunModifierKind::Bruisers => RunModifier {
            enemy_health_mul: 1.0,
            enemy_speed_mul: 0.9,
            enemy_damage_mul: 1.3,
            ammo_drop_mul: 1.1,
        },
        RunModifierKind::Famine => RunModifier {
            enemy_health_mul: 1.0,
            enemy_speed_mul: 1.0,
            enemy_damage_mul: 1.0,
            ammo_drop_mul: 0.7,
        },
        RunModifierKind::Bounty => RunModifier {
            enemy_health_mul: 1.15,
            enemy_speed_mul: 1.0,
            enemy_damage_mul: 1.1,
            ammo_drop_mul: 1.3,
        },
        RunModifierKind::Brittle => RunModifier {
            enemy_health_mul: 0.8,
            enemy_speed_mul: 1.1,
            enemy_damage_mul: 1.15,
            ammo_drop_mul: 0.9,
        },
        RunModifierKind::Juggernaut => RunModifier {
            enemy_health_mul: 1.4,
            enemy_speed_mul: 0.85,
            enemy_damage_mul: 1.2,
            ammo_drop_mul: 1.2,
        },
        RunModifierKind::Gloom => RunModifier {
            enemy_health_mul: 1.1,
            enemy_speed_mul: 1.1,
            enemy_damage_mul: 1.1,
            ammo_drop_mul: 1.0,
        },
    }
}

/// Per-night environmental multipliers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MutationConfig {
    pub enemy_health_mul: f32,
    pub enemy_damage_mul: f32,
    pub enemy_speed_mul: f32,
    pub spawn_interval_mul: f32,
    pub wave_count_mul: f32,
}

impl MutationConfig {
    pub const NEUTRAL: Self = Self {
        enemy_health_mul: 1.0,
        enemy_damage_mul: 1.0,
        enemy_speed_mul: 1.0,
        spawn_interval_mul: 1.0,
        wave_count_mul: 1.0,
    };
}

pub fn mutation_config(kind: MutationKind) -> MutationConfig {
    match kind {
        MutationKind::None => MutationConfig::NEUTRAL,
        MutationKind::ThickFog => MutationConfig {
            spawn_interval_mul: THICK_FOG_SPAWN_INTERVAL_MULT,
            ..MutationConfig::NEUTRAL
        },
        MutationKind::FullMoon => MutationConfig {
            enemy_speed_mul: FULL_MOON_SPEED_MULT,
            ..MutationConfig::NEUTRAL
        },
        MutationKind::Contamination => MutationConfig {
            enemy_health_mul: CONTAMINATION_HEALTH_MULT,
            enemy_damage_mul: CONTAMINATION_DAMAGE_MULT,
            ..MutationConfig::NEUTRAL
        },
        MutationKind::Reinforcements => MutationConfig {
            wave_count_mul: REINFORCEMENTS_WAVE_MULT,
            ..MutationConfig::NEUTRAL
        },
    }
}

/// Effective per-enemy stat multipliers after composing all sources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStatMultipliers {
    pub health: f32,
    pub speed: f32,
    pub damage: f32,
}

/// Compose difficulty x run modifier x night mutation into one bundle.
/// All three sources must be applied on every axis; each product is
/// clamped to `MULTIPLIER_FLOOR`.
pub fn compose_enemy_stats(
    profile: &DifficultyProfile,
    modifier: &RunModifier,
    mutation: &MutationConfig,
) -> EnemyStatMultipliers {
    EnemyStatMultipliers {
        health: (profile.enemy_health * modifier.enemy_health_mul * mutation.enemy_health_mul)
            .max(MULTIPLIER_FLOOR),
        speed: (profile.enemy_speed * modifier.enemy_speed_mul * mutation.enemy_speed_mul)
            .max(MULTIPLIER_FLOOR),
        damage: (profile.enemy_damage * modifier.enemy_damage_mul * mutation.enemy_damage_mul)
            .max(MULTIPLIER_FLOOR),
    }
}

/// Effective non-combat economy multipliers. Difficulty drives all three
/// axes; the run modifier additionally scales ammo drops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomyMultipliers {
    pub resource_spawn: f32,
    pub ammo_drop: f32,
    pub health_pickup: f32,
}

pub fn compose_economy(profile: &DifficultyProfile, modifier: &RunModifier) -> EconomyMultipliers {
    EconomyMultipliers {
        resource_spawn: profile.resource_spawn.max(MULTIPLIER_FLOOR),
        ammo_drop: (profile.ammo_drop * modifier.ammo_drop_mul).max(MULTIPLIER_FLOOR),
        health_pickup: profile.health_pickup.max(MULTIPLIER_FLOOR),
    }
}
