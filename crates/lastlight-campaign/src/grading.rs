//! Night grading: performance stats in, letter grade out.

use serde::{Deserialize, Serialize};

use lastlight_core::constants::*;
use lastlight_core::enums::Grade;

/// One night's performance, accumulated during the night and consumed
/// exactly once at night end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightPerformanceStats {
    /// Hits / shots over the night, 0..=1.
    pub accuracy: f32,
    /// 1 - health_remaining_fraction, 0..=1.
    pub damage_taken_fraction: f32,
    /// 1 - normalized elapsed night time at clear, 0..=1.
    pub clear_speed_score: f32,
    pub objective_completed: bool,
}

/// Result of grading one night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightGradeResult {
    /// Composite score out of 100.
    pub score: f32,
    pub grade: Grade,
    pub multiplier: f32,
    pub bonus_points: u32,
}

impl NightGradeResult {
    /// Points actually credited to the economy for this grade.
    pub fn awarded_points(&self) -> u32 {
        (self.bonus_points as f32 * self.multiplier).round() as u32
    }
}

/// Pure grading function. Identical stats always yield an identical
/// result; thresholds are inclusive at the boundary.
pub fn grade_night(stats: &NightPerformanceStats) -> NightGradeResult {
    let accuracy = stats.accuracy.clamp(0.0, 1.0);
    let damage = stats.damage_taken_fraction.clamp(0.0, 1.0);
    let clear = stats.clear_speed_score.clamp(0.0, 1.0);

    let score = GRADE_WEIGHT_ACCURACY * accuracy
        + GRADE_WEIGHT_DAMAGE * (1.0 - damage)
        + GRADE_WEIGHT_CLEAR_SPEED * clear
        + if stats.objective_completed {
            GRADE_WEIGHT_OBJECTIVE
        } else {
            0.0
        };

    let grade = if score >= GRADE_THRESHOLD_S {
        Grade::S
    } else if score >= GRADE_THRESHOLD_A {
        Grade::A
    } else if score >= GRADE_THRESHOLD_B {
        Grade::B
    } else if score >= GRADE_THRESHOLD_C {
        Grade::C
    } else {
        Grade::D
    };

    NightGradeResult {
        score,
        grade,
        multiplier: grade.multiplier(),
        bonus_points: grade.bonus_points(),
    }
}
