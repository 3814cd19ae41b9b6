//! Milestone and weapon-unlock bookkeeping, keyed by night number.

use serde::{Deserialize, Serialize};

use lastlight_core::error::CampaignError;

use crate::economy::PointsEconomy;

/// A weapon that becomes purchasable once its night is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponUnlock {
    pub item: String,
    pub required_night: u32,
    pub cost: u32,
    pub unlocked: bool,
    pub purchased: bool,
}

/// A per-night milestone whose bonus is granted exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub night: u32,
    pub description: String,
    pub bonus_points: u32,
    pub completed: bool,
}

fn define_unlocks() -> Vec<WeaponUnlock> {
    let table: [(&str, u32, u32); 6] = [
        ("nail_bat", 1, 150),
        ("pump_shotgun", 2, 400),
        ("scrap_smg", 3, 650),
        ("hunting_rifle", 4, 900),
        ("incendiary_launcher", 5, 1400),
        ("railgun", 6, 2000),
    ];
    table
        .into_iter()
        .map(|(item, required_night, cost)| WeaponUnlock {
            item: item.to_string(),
            required_night,
            cost,
            unlocked: false,
            purchased: false,
        })
        .collect()
}

fn define_milestones() -> Vec<Milestone> {
    let table: [(u32, &str, u32); 7] = [
        (1, "Survived the first night", 100),
        (2, "Two nights down", 150),
        (3, "Half the week behind you", 200),
        (4, "The horde knows your name", 250),
        (5, "Five nights standing", 300),
        (6, "One night from daybreak", 400),
        (7, "The last light held", 500),
    ];
    table
        .into_iter()
        .map(|(night, description, bonus_points)| Milestone {
            night,
            description: description.to_string(),
            bonus_points,
            completed: false,
        })
        .collect()
}

/// Tracks which weapons are unlocked/purchased and which milestones have
/// paid out. All operations are idempotent or fail cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionTracker {
    pub unlocks: Vec<WeaponUnlock>,
    pub milestones: Vec<Milestone>,
}

impl Default for ProgressionTracker {
    fn default() -> Self {
        Self {
            unlocks: define_unlocks(),
            milestones: define_milestones(),
        }
    }
}

impl ProgressionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unlock everything gated at or below `night`. Already-unlocked
    /// entries are untouched; returns only the newly unlocked names.
    pub fn check_unlocks(&mut self, night: u32) -> Vec<String> {
        let mut newly = Vec::new();
        for unlock in &mut self.unlocks {
            if !unlock.unlocked && unlock.required_night <= night {
                unlock.unlocked = true;
                newly.push(unlock.item.clone());
            }
        }
        newly
    }

    /// Mark the milestone for a just-survived night completed and credit
    /// its bonus. Returns the payout once; later calls for the same night
    /// return `None`.
    pub fn complete_milestone(
        &mut self,
        night: u32,
        economy: &mut PointsEconomy,
    ) -> Option<(String, u32)> {
        let milestone = self
            .milestones
            .iter_mut()
            .find(|m| m.night == night && !m.completed)?;
        milestone.completed = true;
        economy.add_points(milestone.bonus_points);
        Some((milestone.description.clone(), milestone.bonus_points))
    }

    /// Buy an unlocked weapon through the economy. Fails without state
    /// change if the item is unknown, locked, already owned, or the
    /// balance is short.
    pub fn purchase(
        &mut self,
        item: &str,
        economy: &mut PointsEconomy,
    ) -> Result<u32, CampaignError> {
        let unlock = self
            .unlocks
            .iter_mut()
            .find(|u| u.item == item)
            .ok_or_else(|| CampaignError::UnknownItem(item.to_string()))?;
        if !unlock.unlocked {
            return Err(CampaignError::ItemLocked(item.to_string()));
        }
        if unlock.purchased {
            return Err(CampaignError::AlreadyPurchased(item.to_string()));
        }
        economy.spend_points(unlock.cost)?;
        unlock.purchased = true;
        Ok(unlock.cost)
    }

    pub fn is_unlocked(&self, item: &str) -> bool {
        self.unlocks.iter().any(|u| u.item == item && u.unlocked)
    }

    pub fn is_purchased(&self, item: &str) -> bool {
        self.unlocks.iter().any(|u| u.item == item && u.purchased)
    }
}
