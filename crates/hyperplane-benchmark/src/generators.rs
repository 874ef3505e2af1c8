//! Seeded landscape generators.
//!
//! Each generator validates its parameters and returns
//! [`GenerateError::InvalidParameters`] instead of building a degenerate
//! landscape.

use hyperplane_core::{Fitness, Landscape, ProblemKind, Subfunction, MAX_SUBFUNCTION_ORDER};
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::{Family, GenerateError};

/// Largest table value (exclusive) drawn by the NKq generators.
pub const Q: Fitness = 8;

/// Clauses per variable in generated MAX-kSAT instances, in hundredths.
pub const MAXSAT_CLAUSE_RATIO: usize = 427;

/// Builds a landscape of `family`.
///
/// `k` is the trap size, clause width or NK epistasis depending on the
/// family. Ising spin glasses only accept `k = 2`.
pub fn generate(
    family: Family,
    length: usize,
    k: usize,
    seed: u64,
) -> Result<Landscape, GenerateError> {
    let landscape = match family {
        Family::DeceptiveTrap => deceptive_trap(length, k, seed)?,
        Family::MaxSat => max_ksat(length, k, maxsat_clauses(length), seed)?,
        Family::IsingSpinGlass => {
            if k != 2 {
                return Err(invalid(family, format!("k must be 2, got {}", k)));
            }
            ising_spin_glass(length, seed)?
        }
        Family::AdjacentNkq => adjacent_nkq(length, k, seed)?,
        Family::RandomNkq => random_nkq(length, k, seed)?,
    };
    debug!(
        event = "landscape_generated",
        family = %family,
        length = length as u64,
        k = k as u64,
        seed,
        subfunctions = landscape.subfunctions().len() as u64,
    );
    Ok(landscape)
}

/// Returns the clause count used for a MAX-kSAT instance of `length` bits.
pub fn maxsat_clauses(length: usize) -> usize {
    (length * MAXSAT_CLAUSE_RATIO + 50) / 100
}

fn invalid(family: Family, reason: impl Into<String>) -> GenerateError {
    GenerateError::InvalidParameters {
        family,
        reason: reason.into(),
    }
}

fn check_order(family: Family, order: usize) -> Result<(), GenerateError> {
    if order > MAX_SUBFUNCTION_ORDER {
        return Err(invalid(
            family,
            format!("subfunctions of {} bits exceed {}", order, MAX_SUBFUNCTION_ORDER),
        ));
    }
    Ok(())
}

fn random_table(rng: &mut ChaCha8Rng, order: usize) -> Vec<Fitness> {
    (0..1usize << order).map(|_| rng.random_range(0..Q)).collect()
}

/// Concatenated deceptive traps of `k` bits over a shuffled variable order.
///
/// A trap scores `k` when all its bits are set and `k - 1 - ones` otherwise.
pub fn deceptive_trap(length: usize, k: usize, seed: u64) -> Result<Landscape, GenerateError> {
    let family = Family::DeceptiveTrap;
    if k == 0 || length == 0 || length % k != 0 {
        return Err(invalid(family, format!("k = {} must divide length {}", k, length)));
    }
    check_order(family, k)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut order: Vec<usize> = (0..length).collect();
    order.shuffle(&mut rng);

    let table: Vec<Fitness> = (0..1usize << k)
        .map(|assignment| {
            let ones = assignment.count_ones() as usize;
            if ones == k {
                k as Fitness
            } else {
                (k - 1 - ones) as Fitness
            }
        })
        .collect();

    let subfunctions = order
        .chunks(k)
        .map(|block| Subfunction::new(block.to_vec(), table.clone()))
        .collect();
    Ok(Landscape::new(ProblemKind::Mk, length, subfunctions)?)
}

/// NKq landscape where subfunction `i` reads bit `i` and the `k` bits after
/// it, wrapping around.
pub fn adjacent_nkq(length: usize, k: usize, seed: u64) -> Result<Landscape, GenerateError> {
    let family = Family::AdjacentNkq;
    if k >= length {
        return Err(invalid(family, format!("k = {} must be below length {}", k, length)));
    }
    check_order(family, k + 1)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let subfunctions = (0..length)
        .map(|i| {
            let variables = (0..=k).map(|offset| (i + offset) % length).collect();
            Subfunction::new(variables, random_table(&mut rng, k + 1))
        })
        .collect();
    Ok(Landscape::new(ProblemKind::Nk, length, subfunctions)?)
}

/// NKq landscape where subfunction `i` reads bit `i` and `k` other bits
/// chosen at random.
pub fn random_nkq(length: usize, k: usize, seed: u64) -> Result<Landscape, GenerateError> {
    let family = Family::RandomNkq;
    if k >= length {
        return Err(invalid(family, format!("k = {} must be below length {}", k, length)));
    }
    check_order(family, k + 1)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let subfunctions = (0..length)
        .map(|i| {
            let mut variables = vec![i];
            variables.extend(
                index::sample(&mut rng, length - 1, k)
                    .into_iter()
                    .map(|j| if j >= i { j + 1 } else { j }),
            );
            Subfunction::new(variables, random_table(&mut rng, k + 1))
        })
        .collect();
    Ok(Landscape::new(ProblemKind::Nk, length, subfunctions)?)
}

/// Random MAX-kSAT instance: each clause reads `k` distinct bits with random
/// signs and scores 1 when satisfied.
pub fn max_ksat(
    length: usize,
    k: usize,
    clauses: usize,
    seed: u64,
) -> Result<Landscape, GenerateError> {
    let family = Family::MaxSat;
    if k == 0 || k > length {
        return Err(invalid(family, format!("clause width {} must be in 1..={}", k, length)));
    }
    check_order(family, k)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let subfunctions = (0..clauses)
        .map(|_| {
            let variables: Vec<usize> = index::sample(&mut rng, length, k).into_vec();
            // the single falsifying assignment, in table index form
            let falsifying = rng.random_range(0..1usize << k);
            let values = (0..1usize << k)
                .map(|assignment| Fitness::from(assignment != falsifying))
                .collect();
            Subfunction::new(variables, values)
        })
        .collect();
    Ok(Landscape::new(ProblemKind::Mk, length, subfunctions)?)
}

/// Two dimensional +-1 spin glass on a toroidal grid of `length` spins.
///
/// `length` must be a perfect square with a side of at least 3. Each spin
/// couples to its right and lower neighbors; a coupling scores its weight
/// `J` when both spins agree and `-J` otherwise.
pub fn ising_spin_glass(length: usize, seed: u64) -> Result<Landscape, GenerateError> {
    let family = Family::IsingSpinGlass;
    let side = integer_sqrt(length);
    if side * side != length {
        return Err(invalid(family, format!("length {} is not a perfect square", length)));
    }
    if side < 3 {
        return Err(invalid(family, format!("grid side {} is below 3", side)));
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut subfunctions = Vec::with_capacity(2 * length);
    for row in 0..side {
        for col in 0..side {
            let spin = row * side + col;
            let right = row * side + (col + 1) % side;
            let below = ((row + 1) % side) * side + col;
            for neighbor in [right, below] {
                let weight: Fitness = if rng.random_bool(0.5) { 1 } else { -1 };
                subfunctions.push(Subfunction::new(
                    vec![spin, neighbor],
                    vec![weight, -weight, -weight, weight],
                ));
            }
        }
    }
    Ok(Landscape::new(ProblemKind::Mk, length, subfunctions)?)
}

pub(crate) fn integer_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root > n {
        root -= 1;
    }
    while (root + 1) * (root + 1) <= n {
        root += 1;
    }
    root
}
