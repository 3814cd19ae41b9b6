//! Per-run state: created at run start, discarded on return to the menu.

use serde::{Deserialize, Serialize};

use lastlight_campaign::economy::PointsEconomy;
use lastlight_campaign::objective::DayObjective;
use lastlight_campaign::progression::ProgressionTracker;
use lastlight_core::constants::{KILL_SCORE, NIGHT_SURVIVAL_SCORE};
use lastlight_core::enums::{Difficulty, Grade, MutationKind, RunModifierKind};
use lastlight_core::types::difficulty_profile;

use crate::modifier::roll_run_modifier;

/// Everything that persists for the duration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub night: u32,
    pub difficulty: Difficulty,
    /// Rolled once at run start; never re-rolled.
    pub modifier: RunModifierKind,
    /// Re-rolled every night; night 1 is forced to `None`.
    pub mutation: MutationKind,
    pub economy: PointsEconomy,
    pub progression: ProgressionTracker,
    pub objective: DayObjective,
    pub kill_count: u32,
    pub highest_grade: Grade,
    /// Start-of-night buff from the last completed objective, consumed
    /// by the external buff system.
    pub night_buff_multiplier: f32,
    pub nights_survived: u32,
}

impl RunState {
    pub fn new(base_seed: u64, difficulty: Difficulty) -> Self {
        Self {
            night: 1,
            difficulty,
            modifier: roll_run_modifier(base_seed),
            mutation: MutationKind::None,
            economy: PointsEconomy::new(),
            progression: ProgressionTracker::new(),
            objective: DayObjective::generate(base_seed, 1),
            kill_count: 0,
            highest_grade: Grade::D,
            night_buff_multiplier: 1.0,
            nights_survived: 0,
        }
    }

    /// Track the best grade of the run. Only strictly better grades
    /// replace the current one.
    pub fn record_grade(&mut self, grade: Grade) {
        if grade > self.highest_grade {
            self.highest_grade = grade;
        }
    }

    /// The authoritative leaderboard value. The difficulty score
    /// multiplier applies only here, never to the spendable balance.
    pub fn final_score(&self) -> u32 {
        let base = self.economy.total_earned()
            + self.nights_survived * NIGHT_SURVIVAL_SCORE
            + self.kill_count * KILL_SCORE;
        (base as f32 * difficulty_profile(self.difficulty).score).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_score_scenario() {
        let mut run = RunState::new(1, Difficulty::Hard);
        run.economy.add_points(1000);
        run.nights_survived = 3;
        run.kill_count = 40;
        // (1000 + 1500 + 200) * 1.5 = 4050
        assert_eq!(run.final_score(), 4050);
    }

    #[test]
    fn final_score_ignores_spending() {
        let mut run = RunState::new(1, Difficulty::Normal);
        run.economy.add_points(800);
        run.economy.spend_points(500).unwrap();
        assert_eq!(run.final_score(), 800);
    }

    #[test]
    fn highest_grade_only_moves_up() {
        let mut run = RunState::new(1, Difficulty::Normal);
        run.record_grade(Grade::B);
        assert_eq!(run.highest_grade, Grade::B);
        run.record_grade(Grade::C);
        assert_eq!(run.highest_grade, Grade::B);
        run.record_grade(Grade::S);
        assert_eq!(run.highest_grade, Grade::S);
    }

    #[test]
    fn new_run_starts_on_night_one_with_no_mutation() {
        let run = RunState::new(123, Difficulty::Easy);
        assert_eq!(run.night, 1);
        assert_eq!(run.mutation, MutationKind::None);
        assert_eq!(run.economy.balance(), 0);
        assert_eq!(run.nights_survived, 0);
    }

    #[test]
    fn run_state_roundtrips_through_json() {
        let run = RunState::new(55, Difficulty::Hard);
        let json = serde_json::to_string(&run).unwrap();
        let restored: RunState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.night, run.night);
        assert_eq!(restored.modifier, run.modifier);
        assert_eq!(restored.objective.kind, run.objective.kind);
    }
}
