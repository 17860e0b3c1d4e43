//! RNG module - seeded shape generation
//!
//! Shapes are drawn from a PCG generator owned by the board. Passing the same seed
//! reproduces the same sequence of shapes, which the tests rely on.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Generator used for shape selection
pub type ShapeRng = Pcg32;

/// Create a generator from a fixed seed
pub fn seeded(seed: u64) -> ShapeRng {
    Pcg32::seed_from_u64(seed)
}

/// Fresh seed for a run started without `--seed`
pub fn random_seed() -> u64 {
    rand::random()
}
