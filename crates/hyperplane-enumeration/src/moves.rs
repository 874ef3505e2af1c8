//! Moves and the move/subfunction cross-reference tables.
//!
//! A move is a set of bits flipped together. The [`MoveSet`] keeps every
//! move in a flat arena and indexes it against the landscape so the engine
//! can find, for any flipped bit, exactly the subfunctions and moves whose
//! bookkeeping it disturbs.

use std::collections::BTreeSet;

use hyperplane_core::{HyperplaneError, Landscape, Result};
use smallvec::SmallVec;

/// A set of bits flipped together as one atomic transition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    bits: SmallVec<[usize; 8]>,
}

impl Move {
    /// Creates a move over the given bits.
    pub fn new(bits: &[usize]) -> Self {
        Self {
            bits: SmallVec::from_slice(bits),
        }
    }

    /// Creates a single-bit move.
    pub fn single(bit: usize) -> Self {
        Self::new(&[bit])
    }

    /// Returns the bits in generation order.
    #[inline]
    pub fn bits(&self) -> &[usize] {
        &self.bits
    }

    /// Returns the number of bits flipped.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Returns true if the move flips nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Flips every bit of this move in `solution`. Applying twice restores it.
    #[inline]
    pub fn apply(&self, solution: &mut [bool]) {
        for &bit in &self.bits {
            solution[bit] = !solution[bit];
        }
    }
}

/// Every candidate move plus its cross-reference tables.
#[derive(Debug, Clone)]
pub struct MoveSet {
    length: usize,
    moves: Vec<Move>,
    // bit -> index of its single-bit move
    single_bit_moves: Vec<usize>,
    bit_to_sub: Vec<Vec<usize>>,
    move_to_sub: Vec<Vec<usize>>,
    sub_to_move: Vec<Vec<usize>>,
    // move -> every bit read by a subfunction the move touches
    dependencies: Vec<Vec<usize>>,
}

impl MoveSet {
    /// Indexes `moves` against `landscape`.
    ///
    /// # Errors
    ///
    /// Returns [`HyperplaneError::InvalidState`] if a move is empty, flips a
    /// bit outside the landscape, or some bit has no single-bit move.
    pub fn new(landscape: &Landscape, moves: Vec<Move>) -> Result<Self> {
        let length = landscape.length();
        let subfunctions = landscape.subfunctions();

        let mut bit_to_sub = vec![Vec::new(); length];
        for (sub, subfunction) in subfunctions.iter().enumerate() {
            for &bit in subfunction.variables() {
                // a variable listed twice still maps to the subfunction once
                if bit_to_sub[bit].last() != Some(&sub) {
                    bit_to_sub[bit].push(sub);
                }
            }
        }

        let mut single_bit_moves = vec![None; length];
        let mut move_to_sub = Vec::with_capacity(moves.len());
        let mut sub_to_move: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); subfunctions.len()];
        let mut dependencies = Vec::with_capacity(moves.len());

        for (index, m) in moves.iter().enumerate() {
            if m.is_empty() {
                return Err(HyperplaneError::InvalidState(format!(
                    "move {} flips no bits",
                    index
                )));
            }
            if let Some(&bit) = m.bits().iter().find(|&&bit| bit >= length) {
                return Err(HyperplaneError::InvalidState(format!(
                    "move {} flips bit {} outside length {}",
                    index, bit, length
                )));
            }
            if m.len() == 1 {
                single_bit_moves[m.bits()[0]] = Some(index);
            }

            let touched: BTreeSet<usize> = m
                .bits()
                .iter()
                .flat_map(|&bit| bit_to_sub[bit].iter().copied())
                .collect();
            let depends: BTreeSet<usize> = touched
                .iter()
                .flat_map(|&sub| subfunctions[sub].variables().iter().copied())
                .collect();
            for &sub in &touched {
                sub_to_move[sub].insert(index);
            }
            move_to_sub.push(touched.into_iter().collect());
            dependencies.push(depends.into_iter().collect());
        }

        let single_bit_moves = single_bit_moves
            .into_iter()
            .enumerate()
            .map(|(bit, m)| {
                m.ok_or_else(|| {
                    HyperplaneError::InvalidState(format!("bit {} has no single-bit move", bit))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            length,
            moves,
            single_bit_moves,
            bit_to_sub,
            move_to_sub,
            sub_to_move: sub_to_move
                .into_iter()
                .map(|moves| moves.into_iter().collect())
                .collect(),
            dependencies,
        })
    }

    /// Returns the bit-vector length the moves were built for.
    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if there are no moves.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns all moves.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Returns one move by index.
    #[inline]
    pub fn get(&self, index: usize) -> &Move {
        &self.moves[index]
    }

    /// Returns the index of the single-bit move flipping `bit`.
    #[inline]
    pub fn single_bit_move(&self, bit: usize) -> usize {
        self.single_bit_moves[bit]
    }

    /// Returns the subfunctions reading `bit`.
    #[inline]
    pub fn subs_of_bit(&self, bit: usize) -> &[usize] {
        &self.bit_to_sub[bit]
    }

    /// Returns the subfunctions a move touches.
    #[inline]
    pub fn subs_of_move(&self, index: usize) -> &[usize] {
        &self.move_to_sub[index]
    }

    /// Returns the moves touching a subfunction.
    #[inline]
    pub fn moves_of_sub(&self, sub: usize) -> &[usize] {
        &self.sub_to_move[sub]
    }

    /// Returns the sorted bits whose value can change the move's delta.
    #[inline]
    pub fn dependencies(&self, index: usize) -> &[usize] {
        &self.dependencies[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperplane_core::{ProblemKind, Subfunction};
    use hyperplane_test::landscapes;

    fn chain() -> Landscape {
        // 0-1 and 1-2 interact, 3 is read alone, 4 is never read
        Landscape::new(
            ProblemKind::Mk,
            5,
            vec![
                Subfunction::new(vec![0, 1], vec![0, 1, 2, 3]),
                Subfunction::new(vec![1, 2], vec![3, 2, 1, 0]),
                Subfunction::new(vec![3], vec![0, 1]),
            ],
        )
        .unwrap()
    }

    fn singletons(length: usize) -> Vec<Move> {
        (0..length).map(Move::single).collect()
    }

    #[test]
    fn test_apply_is_self_inverse() {
        let m = Move::new(&[0, 2]);
        let mut solution = vec![false, true, true];
        m.apply(&mut solution);
        assert_eq!(solution, vec![true, true, false]);
        m.apply(&mut solution);
        assert_eq!(solution, vec![false, true, true]);
    }

    #[test]
    fn test_cross_reference_tables() {
        let landscape = chain();
        let mut moves = singletons(5);
        moves.push(Move::new(&[0, 1]));
        let set = MoveSet::new(&landscape, moves).unwrap();

        assert_eq!(set.len(), 6);
        assert_eq!(set.subs_of_bit(1), &[0, 1]);
        assert!(set.subs_of_bit(4).is_empty());
        assert_eq!(set.subs_of_move(0), &[0]);
        assert_eq!(set.subs_of_move(1), &[0, 1]);
        assert_eq!(set.subs_of_move(5), &[0, 1]);
        assert_eq!(set.moves_of_sub(0), &[0, 1, 5]);
        assert_eq!(set.moves_of_sub(1), &[1, 2, 5]);
        assert_eq!(set.moves_of_sub(2), &[3]);
        assert_eq!(set.single_bit_move(3), 3);
    }

    #[test]
    fn test_dependencies_cover_touched_subfunctions() {
        let set = MoveSet::new(&chain(), singletons(5)).unwrap();
        assert_eq!(set.dependencies(0), &[0, 1]);
        assert_eq!(set.dependencies(1), &[0, 1, 2]);
        assert_eq!(set.dependencies(3), &[3]);
        assert!(set.dependencies(4).is_empty());
    }

    #[test]
    fn test_missing_single_bit_move_is_invalid() {
        let moves = vec![Move::single(0), Move::single(1), Move::single(2), Move::single(3)];
        let err = MoveSet::new(&chain(), moves).unwrap_err();
        assert!(matches!(err, HyperplaneError::InvalidState(_)));
    }

    #[test]
    fn test_out_of_range_move_is_invalid() {
        let mut moves = singletons(5);
        moves.push(Move::new(&[4, 9]));
        let err = MoveSet::new(&chain(), moves).unwrap_err();
        assert!(matches!(err, HyperplaneError::InvalidState(_)));
    }

    #[test]
    fn test_inverse_tables_agree() {
        let landscape = landscapes::random_nkq(10, 3, 11);
        let mut moves = singletons(10);
        moves.push(Move::new(&[0, 5]));
        moves.push(Move::new(&[2, 3, 7]));
        let set = MoveSet::new(&landscape, moves).unwrap();
        for m in 0..set.len() {
            for &sub in set.subs_of_move(m) {
                assert!(set.moves_of_sub(sub).contains(&m));
            }
        }
        for sub in 0..landscape.subfunctions().len() {
            for &m in set.moves_of_sub(sub) {
                assert!(set.subs_of_move(m).contains(&sub));
            }
        }
    }
}
