//! Per-night mutation roll.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use lastlight_core::constants::MUTATION_SEED_STRIDE;
use lastlight_core::enums::MutationKind;

/// Roll the mutation for a night. Night 1 is always `None` regardless of
/// seed; later nights draw uniformly from the full catalog. The roll is
/// keyed on `(base_seed, night)` so re-rolling the same night always
/// reproduces the same mutation.
pub fn roll_mutation(base_seed: u64, night: u32) -> MutationKind {
    if night <= 1 {
        return MutationKind::None;
    }
    let mut rng =
        ChaCha8Rng::seed_from_u64(base_seed ^ (night as u64).wrapping_mul(MUTATION_SEED_STRIDE));
    match rng.gen_range(0..5) {
        0 => MutationKind::None,
        1 => MutationKind::ThickFog,
        2 => MutationKind::FullMoon,
        3 => MutationKind::Contamination,
        _ => MutationKind::Reinforcements,
    }
}
