//! Points economy and per-night combat telemetry.

use serde::{Deserialize, Serialize};

use lastlight_core::error::CampaignError;

/// Spendable points plus the raw combat counters grading consumes.
///
/// Invariant: `balance() == total_earned - total_spent` and is never
/// negative; `spend_points` fails without touching state when the balance
/// is insufficient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointsEconomy {
    total_earned: u32,
    total_spent: u32,
    shots_fired: u32,
    hits_landed: u32,
}

impl PointsEconomy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_points(&mut self, amount: u32) {
        self.total_earned += amount;
    }

    /// Deduct `amount` from the balance. On failure the economy is
    /// unchanged and the caller must not assume the purchase happened.
    pub fn spend_points(&mut self, amount: u32) -> Result<(), CampaignError> {
        let have = self.balance();
        if amount > have {
            return Err(CampaignError::InsufficientPoints { have, need: amount });
        }
        self.total_spent += amount;
        Ok(())
    }

    pub fn balance(&self) -> u32 {
        self.total_earned - self.total_spent
    }

    pub fn total_earned(&self) -> u32 {
        self.total_earned
    }

    pub fn total_spent(&self) -> u32 {
        self.total_spent
    }

    // --- Combat telemetry ---

    pub fn record_shot(&mut self) {
        self.shots_fired += 1;
    }

    pub fn record_hit(&mut self) {
        self.hits_landed += 1;
    }

    pub fn shots_fired(&self) -> u32 {
        self.shots_fired
    }

    pub fn hits_landed(&self) -> u32 {
        self.hits_landed
    }

    /// Accuracy over the current night, or `None` before any shot.
    pub fn accuracy(&self) -> Option<f32> {
        if self.shots_fired == 0 {
            return None;
        }
        Some((self.hits_landed.min(self.shots_fired)) as f32 / self.shots_fired as f32)
    }

    /// Clear the shot/hit counters. Called at the start of each night.
    pub fn reset_night_telemetry(&mut self) {
        self.shots_fired = 0;
        self.hits_landed = 0;
    }
}
