//! The day/night countdown timer.

use lastlight_core::constants::{DAY_DURATION_FALLBACK, DAY_DURATION_TABLE};

/// Counts elapsed time toward a phase duration and signals completion
/// exactly once per started phase. While paused, elapsed time does not
/// advance regardless of how often `tick` is called.
#[derive(Debug, Clone)]
pub struct DayNightTimer {
    elapsed: f32,
    duration: f32,
    paused: bool,
    fired: bool,
}

impl DayNightTimer {
    /// An idle timer that never fires. Used outside timed phases.
    pub fn idle() -> Self {
        Self {
            elapsed: 0.0,
            duration: 0.0,
            paused: false,
            fired: true,
        }
    }

    /// Begin timing a phase of `duration` seconds, clearing the
    /// completion flag.
    pub fn start(&mut self, duration: f32) {
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.fired = false;
    }

    /// Advance by `dt` seconds. Returns `true` exactly once, on the tick
    /// where elapsed crosses the duration.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.paused || self.fired {
            return false;
        }
        self.elapsed = (self.elapsed + dt).min(self.duration);
        if self.elapsed >= self.duration {
            self.fired = true;
            return true;
        }
        false
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Elapsed fraction of the phase, 0..=1. A zero-length phase counts
    /// as fully elapsed.
    pub fn normalized_elapsed(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Whether the timer was started for a real phase window.
    pub fn is_running(&self) -> bool {
        self.duration > 0.0
    }
}

/// Day duration for a night, from the fixed table. The last entry is
/// reused for any night beyond the table; an empty table falls back to a
/// constant rather than failing.
pub fn day_duration_for(night: u32) -> f32 {
    day_duration_from(&DAY_DURATION_TABLE, night)
}

pub fn day_duration_from(table: &[f32], night: u32) -> f32 {
    if table.is_empty() {
        return DAY_DURATION_FALLBACK;
    }
    let index = (night.max(1) as usize - 1).min(table.len() - 1);
    table[index]
}
