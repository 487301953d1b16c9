//! Useful common code

use rand::{Rng as _, SeedableRng as _};

/// The random number generator every simulation owns.
pub type SimulationRng = rand::rngs::StdRng;

/// A seeded generator gives reproducible simulations, otherwise use entropy.
#[must_use]
pub fn make_rng(maybe_seed: Option<u64>) -> SimulationRng {
    match maybe_seed {
        Some(seed) => SimulationRng::seed_from_u64(seed),
        None => SimulationRng::from_entropy(),
    }
}

/// Roll a dice that comes up `true` with the given probability.
pub fn is_random_trigger(rng: &mut SimulationRng, probability: f32) -> bool {
    rng.gen_bool(f64::from(probability.clamp(0.0, 1.0)))
}

/// A random float in the half-open range. Empty or inverted ranges give the start.
pub fn between(rng: &mut SimulationRng, range: (f32, f32)) -> f32 {
    if range.1 <= range.0 {
        return range.0;
    }
    rng.gen_range(range.0..range.1)
}

/// A random integer in the closed range. Inverted ranges give the start.
pub fn between_inclusive(rng: &mut SimulationRng, range: (u32, u32)) -> u32 {
    if range.1 <= range.0 {
        return range.0;
    }
    rng.gen_range(range.0..=range.1)
}
