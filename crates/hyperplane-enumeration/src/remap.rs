//! Bit reordering.
//!
//! The traversal counts through enumeration positions, and hyperplane
//! elimination can only skip the positions below the lowest dependency of an
//! improving move. Giving the bits of tightly coupled moves neighboring high
//! positions lets whole blocks of low positions be skipped at once.

use std::collections::BTreeSet;

use crate::moves::MoveSet;

const UNASSIGNED: usize = usize::MAX;

/// Bijection between original bit indices and enumeration positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    org_to_new: Vec<usize>,
    new_to_org: Vec<usize>,
}

impl Permutation {
    /// Every bit keeps its own index as its position.
    pub fn identity(length: usize) -> Self {
        Self {
            org_to_new: (0..length).collect(),
            new_to_org: (0..length).collect(),
        }
    }

    /// Groups the dependencies of each move onto neighboring high positions.
    ///
    /// Moves are bucketed by how many of their dependency bits still lack a
    /// position. The move with the fewest unresolved bits (lowest index on
    /// ties) is taken next and its unresolved bits receive the highest free
    /// positions; every move sharing one of those bits drops a bucket. Bits
    /// no subfunction reads end up in the lowest positions.
    pub fn reorder(moves: &MoveSet) -> Self {
        let length = moves.length();
        let mut buckets: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); length + 1];
        let mut unresolved = Vec::with_capacity(moves.len());
        let mut bit_to_move: Vec<Vec<usize>> = vec![Vec::new(); length];
        for index in 0..moves.len() {
            let depends = moves.dependencies(index);
            buckets[depends.len()].insert(index);
            unresolved.push(depends.len());
            for &bit in depends {
                bit_to_move[bit].push(index);
            }
        }

        let mut org_to_new = vec![UNASSIGNED; length];
        let mut new_to_org = vec![UNASSIGNED; length];
        let mut next_position = length;

        while next_position > 0 {
            let Some(chosen) = buckets.iter().find_map(|bucket| bucket.first().copied()) else {
                break;
            };
            for &bit in moves.dependencies(chosen) {
                if org_to_new[bit] != UNASSIGNED {
                    continue;
                }
                next_position -= 1;
                org_to_new[bit] = next_position;
                new_to_org[next_position] = bit;
                for &affected in &bit_to_move[bit] {
                    let current = unresolved[affected];
                    buckets[current].remove(&affected);
                    buckets[current - 1].insert(affected);
                    unresolved[affected] = current - 1;
                }
            }
            buckets[0].remove(&chosen);
        }

        for bit in 0..length {
            if org_to_new[bit] == UNASSIGNED {
                next_position -= 1;
                org_to_new[bit] = next_position;
                new_to_org[next_position] = bit;
            }
        }

        Self {
            org_to_new,
            new_to_org,
        }
    }

    /// Returns the number of bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.new_to_org.len()
    }

    /// Returns true for a zero-length permutation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.new_to_org.is_empty()
    }

    /// Returns the enumeration position of an original bit.
    #[inline]
    pub fn position(&self, bit: usize) -> usize {
        self.org_to_new[bit]
    }

    /// Returns the original bit at an enumeration position.
    #[inline]
    pub fn bit_at(&self, position: usize) -> usize {
        self.new_to_org[position]
    }

    /// Returns the original-to-position table.
    pub fn org_to_new(&self) -> &[usize] {
        &self.org_to_new
    }

    /// Returns the position-to-original table.
    pub fn new_to_org(&self) -> &[usize] {
        &self.new_to_org
    }

    /// Returns true if both tables are inverse bijections on `0..len`.
    pub fn is_bijection(&self) -> bool {
        let length = self.len();
        self.org_to_new.len() == length
            && self
                .new_to_org
                .iter()
                .enumerate()
                .all(|(position, &bit)| bit < length && self.org_to_new[bit] == position)
    }
}
