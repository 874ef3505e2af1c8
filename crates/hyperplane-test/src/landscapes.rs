//! Seeded landscape fixtures.
//!
//! Thin wrappers over the benchmark generators that panic on bad
//! parameters, plus hand-built landscapes with known optima.

use hyperplane_benchmark::generators;
use hyperplane_core::{Landscape, ProblemKind, Subfunction};

/// Two independent pairs: an XOR over bits 0 and 1, and an equality test
/// worth 2 over bits 2 and 3.
///
/// Its radius-1 local optima are exactly `0100`, `0111`, `1000` and `1011`,
/// all with fitness 3.
pub fn xor_and() -> Landscape {
    Landscape::new(
        ProblemKind::Mk,
        4,
        vec![
            Subfunction::new(vec![0, 1], vec![0, 1, 1, 0]),
            Subfunction::new(vec![2, 3], vec![2, 0, 0, 2]),
        ],
    )
    .expect("xor_and is valid")
}

/// See [`generators::deceptive_trap`].
pub fn deceptive_trap(length: usize, k: usize, seed: u64) -> Landscape {
    generators::deceptive_trap(length, k, seed).expect("valid trap parameters")
}

/// See [`generators::adjacent_nkq`].
pub fn adjacent_nkq(length: usize, k: usize, seed: u64) -> Landscape {
    generators::adjacent_nkq(length, k, seed).expect("valid adjacent NKq parameters")
}

/// See [`generators::random_nkq`].
pub fn random_nkq(length: usize, k: usize, seed: u64) -> Landscape {
    generators::random_nkq(length, k, seed).expect("valid random NKq parameters")
}

/// See [`generators::max_ksat`].
pub fn max_ksat(length: usize, k: usize, clauses: usize, seed: u64) -> Landscape {
    generators::max_ksat(length, k, clauses, seed).expect("valid MAX-kSAT parameters")
}

/// See [`generators::ising_spin_glass`].
pub fn ising_spin_glass(length: usize, seed: u64) -> Landscape {
    generators::ising_spin_glass(length, seed).expect("valid spin glass length")
}
