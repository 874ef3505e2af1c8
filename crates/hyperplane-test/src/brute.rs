//! Brute-force oracles.
//!
//! Everything here recomputes from scratch and scales exponentially. Keep
//! lengths small (about 16 bits or fewer).

use hyperplane_core::{Fitness, Landscape};

/// Returns every candidate of `length` bits, bit `i` of the counter giving
/// bit `i` of the candidate.
pub fn solutions(length: usize) -> impl Iterator<Item = Vec<bool>> {
    (0u64..1 << length).map(move |mask| (0..length).map(|i| (mask >> i) & 1 == 1).collect())
}

/// Returns `fitness(solution with bits flipped) - fitness(solution)`.
pub fn move_delta(landscape: &Landscape, solution: &[bool], bits: &[usize]) -> Fitness {
    let mut moved = solution.to_vec();
    for &bit in bits {
        moved[bit] = !moved[bit];
    }
    landscape.fitness(&moved) - landscape.fitness(solution)
}

/// Returns every subset of `0..length` with between 1 and `radius` elements.
pub fn subsets(length: usize, radius: usize) -> Vec<Vec<usize>> {
    fn extend(
        start: usize,
        length: usize,
        radius: usize,
        current: &mut Vec<usize>,
        out: &mut Vec<Vec<usize>>,
    ) {
        for bit in start..length {
            current.push(bit);
            out.push(current.clone());
            if current.len() < radius {
                extend(bit + 1, length, radius, current, out);
            }
            current.pop();
        }
    }

    let mut out = Vec::new();
    if radius > 0 {
        extend(0, length, radius, &mut Vec::new(), &mut out);
    }
    out
}

/// Returns every connected vertex set of at most `radius` vertices, each
/// sorted ascending, the whole list sorted.
pub fn connected_subsets(adjacency: &[Vec<usize>], radius: usize) -> Vec<Vec<usize>> {
    let mut found: Vec<Vec<usize>> = subsets(adjacency.len(), radius)
        .into_iter()
        .filter(|set| is_connected(adjacency, set))
        .collect();
    found.sort();
    found
}

fn is_connected(adjacency: &[Vec<usize>], set: &[usize]) -> bool {
    let mut reached = vec![set[0]];
    let mut stack = vec![set[0]];
    while let Some(vertex) = stack.pop() {
        for &neighbor in &adjacency[vertex] {
            if set.contains(&neighbor) && !reached.contains(&neighbor) {
                reached.push(neighbor);
                stack.push(neighbor);
            }
        }
    }
    reached.len() == set.len()
}

/// Returns true if no set of at most `radius` bits strictly improves
/// `solution` when flipped.
pub fn is_local_optimum(landscape: &Landscape, solution: &[bool], radius: usize) -> bool {
    subsets(landscape.length(), radius)
        .iter()
        .all(|bits| move_delta(landscape, solution, bits) <= 0)
}

/// Returns every r-bit local optimum as `(fitness, solution)`, sorted by
/// solution.
pub fn local_optima(landscape: &Landscape, radius: usize) -> Vec<(Fitness, Vec<bool>)> {
    let flips = subsets(landscape.length(), radius);
    let mut optima = Vec::new();
    let mut moved = vec![false; landscape.length()];
    for solution in solutions(landscape.length()) {
        let fitness = landscape.fitness(&solution);
        let improvable = flips.iter().any(|bits| {
            moved.copy_from_slice(&solution);
            for &bit in bits {
                moved[bit] = !moved[bit];
            }
            landscape.fitness(&moved) > fitness
        });
        if !improvable {
            optima.push((fitness, solution));
        }
    }
    optima.sort_by(|a, b| a.1.cmp(&b.1));
    optima
}
