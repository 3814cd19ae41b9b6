//! Commands sent from the driver (harness, frontend, tests) to the
//! simulation.
//!
//! Commands are queued and processed at the next tick boundary. A command
//! that is invalid for the current phase is a warned no-op, never fatal.

use serde::{Deserialize, Serialize};

use crate::enums::Difficulty;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    // --- Run control ---
    /// Start a new run from the main menu.
    StartRun { difficulty: Difficulty },
    /// Continue from Dawn into the next Day.
    AdvanceFromDawn,
    /// Abandon the current run and return to the main menu.
    ReturnToMainMenu,
    /// Full reset from any phase, then start a fresh run.
    Restart { difficulty: Difficulty },
    /// Pause or resume the loop (menu overlays, cosmetic transitions).
    SetPaused { paused: bool },

    // --- External-world reports ---
    /// The player's health reached zero.
    ReportPlayerDeath,
    /// An enemy previously issued by the spawn service died.
    ReportEnemyDeath { handle: u64 },
    /// The player fired a shot.
    WeaponFired,
    /// A fired shot connected.
    HitConfirmed,
    /// Progress on the current day objective.
    AddObjectiveProgress { amount: u32 },
    /// Buy an unlocked weapon through the points economy.
    PurchaseUnlock { item: String },

    // --- Test harness only ---
    /// Force the current night to complete as if all waves were cleared.
    ForceNightEnd,
}
