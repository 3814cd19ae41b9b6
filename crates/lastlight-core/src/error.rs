//! Error types for fallible campaign operations.

use thiserror::Error;

/// Failure of an economy or progression operation. The operation leaves
/// state unchanged when it returns one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CampaignError {
    #[error("insufficient points: have {have}, need {need}")]
    InsufficientPoints { have: u32, need: u32 },
    #[error("item `{0}` is not unlocked yet")]
    ItemLocked(String),
    #[error("item `{0}` is already purchased")]
    AlreadyPurchased(String),
    #[error("unknown item `{0}`")]
    UnknownItem(String),
}
