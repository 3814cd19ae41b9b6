//! Tuning constants for the survival loop, grouped by subsystem.

/// Fixed timestep: 60 Hz
pub const TICK_RATE: f32 = 60.0;
pub const DT: f32 = 1.0 / TICK_RATE;

/// A run ends in victory after surviving this many nights.
pub const MAX_NIGHTS: u32 = 7;

// --- Day/night pacing ---

/// Day duration per night (seconds). The last entry is reused for any
/// night beyond the table length.
pub const DAY_DURATION_TABLE: [f32; 7] = [120.0, 150.0, 180.0, 180.0, 210.0, 210.0, 240.0];
/// Used when a duration table is empty or malformed.
pub const DAY_DURATION_FALLBACK: f32 = 180.0;
/// Night time limit (seconds). Nights end by clearing waves, not by the
/// timer; elapsed time against this limit drives the clear-speed score.
pub const NIGHT_TIME_LIMIT: f32 = 300.0;
/// Cosmetic dusk window between Day and Night (seconds).
pub const TRANSITION_DURATION: f32 = 4.0;

// --- Wave scheduling ---

/// Waves per night: WAVE_BASE_COUNT + night, before mutation scaling.
pub const WAVE_BASE_COUNT: u32 = 3;
/// Enemies in wave 1, before difficulty scaling.
pub const WAVE_BASE_ENEMIES: u32 = 4;
/// Additional enemies per wave index.
pub const WAVE_ENEMIES_PER_WAVE: u32 = 2;
/// Seconds between spawns in wave 1 at Normal difficulty.
pub const SPAWN_INTERVAL_BASE: f32 = 2.0;
/// Per-wave divisor growth: interval / (1 + (w-1) * factor).
pub const SPAWN_PRESSURE_FACTOR: f32 = 0.15;
/// Spawn interval never drops below this (seconds).
pub const SPAWN_INTERVAL_FLOOR: f32 = 0.25;
/// Pause between a cleared wave and the next (seconds).
pub const INTER_WAVE_DELAY: f32 = 5.0;
/// A wave with no spawn or death progress for this long is force-completed.
pub const WAVE_STALL_TIMEOUT: f32 = 90.0;

/// Spawn placement band around the player (world units).
pub const SPAWN_RADIUS_MIN: f32 = 12.0;
pub const SPAWN_RADIUS_MAX: f32 = 24.0;

// --- Multiplier composition ---

/// Composed multipliers are clamped to this floor so stacked reductions
/// can never reach zero or go negative.
pub const MULTIPLIER_FLOOR: f32 = 0.2;

/// FullMoon enemy speed multiplier.
pub const FULL_MOON_SPEED_MULT: f32 = 1.2;
/// Contamination enemy health multiplier.
pub const CONTAMINATION_HEALTH_MULT: f32 = 1.25;
/// Contamination enemy damage multiplier.
pub const CONTAMINATION_DAMAGE_MULT: f32 = 1.1;
/// ThickFog spawn interval multiplier.
pub const THICK_FOG_SPAWN_INTERVAL_MULT: f32 = 0.9;
/// Reinforcements wave count multiplier.
pub const REINFORCEMENTS_WAVE_MULT: f32 = 1.5;

// --- Grading ---

/// Weight of each grading term (points out of 100).
pub const GRADE_WEIGHT_ACCURACY: f32 = 35.0;
pub const GRADE_WEIGHT_DAMAGE: f32 = 25.0;
pub const GRADE_WEIGHT_CLEAR_SPEED: f32 = 25.0;
pub const GRADE_WEIGHT_OBJECTIVE: f32 = 15.0;

/// Grade thresholds, inclusive at the boundary.
pub const GRADE_THRESHOLD_S: f32 = 90.0;
pub const GRADE_THRESHOLD_A: f32 = 75.0;
pub const GRADE_THRESHOLD_B: f32 = 60.0;
pub const GRADE_THRESHOLD_C: f32 = 45.0;

/// Fallbacks when a telemetry source is unavailable.
pub const DEFAULT_ACCURACY: f32 = 0.5;
pub const DEFAULT_DAMAGE_TAKEN: f32 = 0.3;
pub const DEFAULT_CLEAR_SPEED: f32 = 0.8;

// --- Economy ---

/// Points credited per enemy kill.
pub const KILL_POINTS: u32 = 10;
/// Final-score weight per night survived.
pub const NIGHT_SURVIVAL_SCORE: u32 = 500;
/// Final-score weight per kill.
pub const KILL_SCORE: u32 = 5;

// --- Objectives ---

/// Objective point reward: base + per-night scaling.
pub const OBJECTIVE_POINT_BASE: u32 = 100;
pub const OBJECTIVE_POINT_PER_NIGHT: u32 = 50;
/// Objective ammo reward: base + per-night scaling.
pub const OBJECTIVE_AMMO_BASE: u32 = 15;
pub const OBJECTIVE_AMMO_PER_NIGHT: u32 = 10;
/// Night-buff multiplier growth per night, capped.
pub const OBJECTIVE_BUFF_PER_NIGHT: f32 = 0.05;
pub const OBJECTIVE_BUFF_CAP: f32 = 1.4;
/// Supply crates dropped alongside an objective reward.
pub const OBJECTIVE_SUPPLY_CRATES: u32 = 2;

// --- Seed derivation ---

/// Per-night child-seed strides. Mutation and objective rolls must not
/// consume the run RNG stream, so each derives its own generator from
/// (base_seed, night).
pub const MUTATION_SEED_STRIDE: u64 = 0xD1B5_4A32_D192_ED03;
pub const OBJECTIVE_SEED_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;
