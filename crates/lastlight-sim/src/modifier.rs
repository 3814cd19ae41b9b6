//! Run-modifier roll, once per run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lastlight_core::enums::RunModifierKind;

/// Salt so the run-modifier draw is independent of every per-night roll.
const RUN_MODIFIER_SALT: u64 = 0xA076_1D64_78BD_642F;

/// Pick the single run-long modifier from the catalog. Exactly one is
/// active for the whole run; the same seed always picks the same one.
pub fn roll_run_modifier(base_seed: u64) -> RunModifierKind {
    let mut rng = ChaCha8Rng::seed_from_u64(base_seed ^ RUN_MODIFIER_SALT);
    RunModifierKind::ALL[rng.gen_range(0..RunModifierKind::ALL.len())]
}
