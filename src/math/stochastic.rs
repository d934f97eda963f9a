//! Random draws used by the update rules.
//!
//! Every algorithm owns its own [`StdRng`]; these helpers only shape draws
//! from it. Seeded generators make whole runs reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Generator seeded from `seed`, or from OS entropy when `None`.
#[must_use]
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Unseeded generator; the serde default for skipped RNG fields.
#[must_use]
pub fn entropy_rng() -> StdRng {
    StdRng::from_os_rng()
}

/// Uniform draw in `[low, high)`. Equal bounds return `low`.
pub fn uniform(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    low + rng.random::<f64>() * (high - low)
}

/// Uniform integer in `[low, high]`, both inclusive.
pub fn integer(rng: &mut impl Rng, low: usize, high: usize) -> usize {
    if high <= low {
        low
    } else {
        rng.random_range(low..=high)
    }
}

/// Normal draw with the given mean and scale.
pub fn gaussian(rng: &mut impl Rng, mean: f64, scale: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + scale * z
}
