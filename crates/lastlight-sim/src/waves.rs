//! Wave composition and the night's wave scheduler.
//!
//! The pure functions at the top decide the shape of a night (wave
//! count, enemies per wave, spawn cadence) from the night index and the
//! active multiplier bundles. `WaveScheduler` is the resumable state
//! machine that drives one Night phase: spawn enemies at intervals, wait
//! for the wave to die, breathe, repeat, and report night completion.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use lastlight_core::constants::*;
use lastlight_core::enums::{Difficulty, MutationKind, RunModifierKind};
use lastlight_core::events::{
    EnemySpawnedEvent, GameEvent, WaveClearedEvent, WaveStalledEvent, WaveStartedEvent,
};
use lastlight_core::types::{
    compose_enemy_stats, difficulty_profile, mutation_config, run_modifier, DifficultyProfile,
    EnemyStatMultipliers, MutationConfig,
};

use crate::services::{EnemyHandle, Services, SpawnRequest};

/// Waves in a night: `3 + night`, scaled by the mutation's wave-count
/// multiplier, rounded, never below 1.
pub fn total_waves(night: u32, mutation: MutationKind) -> u32 {
    let base = (WAVE_BASE_COUNT + night) as f32;
    let scaled = base * mutation_config(mutation).wave_count_mul;
    (scaled.round() as u32).max(1)
}

/// Enemies in wave `w` (1-indexed): linear growth scaled by the
/// difficulty's wave-size multiplier, rounded, never below 1.
pub fn enemies_for_wave(wave: u32, profile: &DifficultyProfile) -> u32 {
    let base = (WAVE_BASE_ENEMIES + wave.saturating_sub(1) * WAVE_ENEMIES_PER_WAVE) as f32;
    ((base * profile.wave_enemy_count).round() as u32).max(1)
}

/// Seconds between spawns in wave `w`. Later waves spawn faster to build
/// pressure inside a night; the interval never drops below the floor.
pub fn spawn_interval_for_wave(
    wave: u32,
    profile: &DifficultyProfile,
    mutation: &MutationConfig,
) -> f32 {
    let base = SPAWN_INTERVAL_BASE * profile.spawn_interval * mutation.spawn_interval_mul;
    let pressure = 1.0 + wave.saturating_sub(1) as f32 * SPAWN_PRESSURE_FACTOR;
    (base / pressure).max(SPAWN_INTERVAL_FLOOR)
}

/// A spawn point at a random angle, inside the ring between the safety
/// radius and the outer band, centered on the player.
pub fn spawn_position(rng: &mut ChaCha8Rng, player: Vec2) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
    player + Vec2::new(angle.cos(), angle.sin()) * distance
}

/// Where the scheduler is inside the current wave.
#[derive(Debug, Clone, Copy, PartialEq)]
enum WaveStep {
    /// Emitting spawns on the interval clock.
    Spawning { next_spawn_in: f32 },
    /// All spawns out; waiting for the wave to die.
    Clearing,
    /// Wave cleared; waiting out the breather before the next one.
    InterWave { remaining: f32 },
    /// The final wave is done.
    Complete,
}

/// Drives the waves of one Night phase. Created when Night begins and
/// discarded when the night ends, for any reason.
pub struct WaveScheduler {
    night: u32,
    total_waves: u32,
    wave: u32,
    step: WaveStep,
    announced: bool,
    enemies_planned: u32,
    spawned_this_wave: u32,
    alive_this_wave: u32,
    /// handle -> wave index, for every enemy of this night still alive.
    alive: HashMap<u64, u32>,
    stats: EnemyStatMultipliers,
    spawn_interval: f32,
    /// Seconds since the current wave last made progress.
    stall_timer: f32,
    profile: DifficultyProfile,
    mutation_cfg: MutationConfig,
}

impl WaveScheduler {
    pub fn new(
        night: u32,
        difficulty: Difficulty,
        modifier: RunModifierKind,
        mutation: MutationKind,
    ) -> Self {
        let profile = difficulty_profile(difficulty);
        let modifier_bundle = run_modifier(modifier);
        let mutation_cfg = mutation_config(mutation);
        let stats = compose_enemy_stats(&profile, &modifier_bundle, &mutation_cfg);
        let mut scheduler = Self {
            night,
            total_waves: total_waves(night, mutation),
            wave: 1,
            step: WaveStep::Spawning { next_spawn_in: 0.0 },
            announced: false,
            enemies_planned: 0,
            spawned_this_wave: 0,
            alive_this_wave: 0,
            alive: HashMap::new(),
            stats,
            spawn_interval: 0.0,
            stall_timer: 0.0,
            profile,
            mutation_cfg,
        };
        scheduler.arm_wave();
        scheduler
    }

    fn arm_wave(&mut self) {
        self.enemies_planned = enemies_for_wave(self.wave, &self.profile);
        self.spawn_interval =
            spawn_interval_for_wave(self.wave, &self.profile, &self.mutation_cfg);
        self.spawned_this_wave = 0;
        self.alive_this_wave = 0;
        self.stall_timer = 0.0;
        self.announced = false;
        self.step = WaveStep::Spawning { next_spawn_in: 0.0 };
    }

    /// Advance the scheduler by `dt`. Returns `true` on the tick the
    /// whole night completes.
    pub fn tick(
        &mut self,
        dt: f32,
        rng: &mut ChaCha8Rng,
        services: &mut Services,
        tick: u64,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        if self.step == WaveStep::Complete {
            return false;
        }

        if !self.announced {
            self.announced = true;
            events.push(GameEvent::WaveStarted(WaveStartedEvent {
                night: self.night,
                wave: self.wave,
                total_waves: self.total_waves,
                enemy_count: self.enemies_planned,
                tick,
            }));
        }

        match self.step {
            WaveStep::Spawning { next_spawn_in } => {
                self.stall_timer += dt;
                let mut next_spawn_in = next_spawn_in - dt;
                if next_spawn_in <= 0.0 {
                    next_spawn_in = self.spawn_interval;
                    self.try_spawn(rng, services, tick, events);
                }
                self.step = if self.spawned_this_wave >= self.enemies_planned {
                    WaveStep::Clearing
                } else {
                    WaveStep::Spawning { next_spawn_in }
                };
                self.check_stall(tick, events);
            }
            WaveStep::Clearing => {
                self.stall_timer += dt;
                if self.alive_this_wave == 0 {
                    self.finish_wave(tick, events);
                } else {
                    self.check_stall(tick, events);
                }
            }
            WaveStep::InterWave { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.wave += 1;
                    self.arm_wave();
                } else {
                    self.step = WaveStep::InterWave { remaining };
                }
            }
            WaveStep::Complete => {}
        }

        self.step == WaveStep::Complete
    }

    fn try_spawn(
        &mut self,
        rng: &mut ChaCha8Rng,
        services: &mut Services,
        tick: u64,
        events: &mut Vec<GameEvent>,
    ) {
        let position = spawn_position(rng, services.player_position());
        let request = SpawnRequest {
            position,
            health_mul: self.stats.health,
            speed_mul: self.stats.speed,
            damage_mul: self.stats.damage,
        };
        // A failed spawn is retried on the next interval; the stall
        // timeout bounds how long a factory outage can wedge the wave.
        if let Some(handle) = services.spawn(&request) {
            self.alive.insert(handle.0, self.wave);
            self.spawned_this_wave += 1;
            self.alive_this_wave += 1;
            self.stall_timer = 0.0;
            events.push(GameEvent::EnemySpawned(EnemySpawnedEvent {
                handle: handle.0,
                night: self.night,
                wave: self.wave,
                x: position.x,
                y: position.y,
                tick,
            }));
        }
    }

    fn check_stall(&mut self, tick: u64, events: &mut Vec<GameEvent>) {
        if self.stall_timer < WAVE_STALL_TIMEOUT {
            return;
        }
        warn!(
            night = self.night,
            wave = self.wave,
            unaccounted = self.alive_this_wave,
            "wave_stalled_force_completing"
        );
        events.push(GameEvent::WaveStalled(WaveStalledEvent {
            night: self.night,
            wave: self.wave,
            enemies_unaccounted: self.alive_this_wave,
            tick,
        }));
        let wave = self.wave;
        self.alive.retain(|_, w| *w != wave);
        self.alive_this_wave = 0;
        self.finish_wave(tick, events);
    }

    fn finish_wave(&mut self, tick: u64, events: &mut Vec<GameEvent>) {
        events.push(GameEvent::WaveCleared(WaveClearedEvent {
            night: self.night,
            wave: self.wave,
            tick,
        }));
        if self.wave >= self.total_waves {
            info!(night = self.night, waves = self.total_waves, "night_cleared");
            self.step = WaveStep::Complete;
        } else {
            self.step = WaveStep::InterWave {
                remaining: INTER_WAVE_DELAY,
            };
        }
    }

    /// Record a death reported by the spawn service. Returns `true` when
    /// the handle belonged to this night (the caller credits the kill).
    pub fn report_death(&mut self, handle: EnemyHandle) -> bool {
        match self.alive.remove(&handle.0) {
            Some(wave) => {
                if wave == self.wave && self.alive_this_wave > 0 {
                    self.alive_this_wave -= 1;
                    self.stall_timer = 0.0;
                }
                true
            }
            None => false,
        }
    }

    /// Test-harness path: complete the night immediately, discarding any
    /// outstanding enemies.
    pub fn force_complete(&mut self) {
        self.alive.clear();
        self.alive_this_wave = 0;
        self.step = WaveStep::Complete;
    }

    pub fn is_complete(&self) -> bool {
        self.step == WaveStep::Complete
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn total_waves(&self) -> u32 {
        self.total_waves
    }

    pub fn spawned_this_wave(&self) -> u32 {
        self.spawned_this_wave
    }

    pub fn enemies_alive(&self) -> u32 {
        self.alive.len() as u32
    }

    pub fn enemy_stats(&self) -> EnemyStatMultipliers {
        self.stats
    }
}
