//! Live per-move fitness deltas and their improving-move bins.
//!
//! The delta of every move, the per-bin count of improving moves and the
//! total improving count form one unit: [`DeltaTable::adjust`] is the only
//! mutator and keeps all three in step.

use hyperplane_core::Fitness;

/// Fitness effect of every move on the current reference, binned by the
/// lowest enumeration position the move depends on.
#[derive(Debug, Clone)]
pub struct DeltaTable {
    delta: Vec<Fitness>,
    move_to_bin: Vec<usize>,
    // one bin per position plus a sentinel for moves without dependencies
    moves_in_bin: Vec<usize>,
    improving_moves: usize,
}

impl DeltaTable {
    /// Creates a zeroed table with every move in the sentinel bin.
    pub fn new(move_count: usize, length: usize) -> Self {
        Self {
            delta: vec![0; move_count],
            move_to_bin: vec![length; move_count],
            moves_in_bin: vec![0; length + 1],
            improving_moves: 0,
        }
    }

    /// Zeroes every delta and moves every move back to the sentinel bin.
    pub fn clear(&mut self) {
        let sentinel = self.sentinel_bin();
        self.delta.fill(0);
        self.move_to_bin.fill(sentinel);
        self.moves_in_bin.fill(0);
        self.improving_moves = 0;
    }

    /// Adds `amount` to a move's delta, updating its bin and the improving
    /// count when the move starts or stops being strictly improving.
    #[inline]
    pub fn adjust(&mut self, index: usize, amount: Fitness) {
        if amount == 0 {
            return;
        }
        let was_improving = self.delta[index] > 0;
        self.delta[index] += amount;
        let is_improving = self.delta[index] > 0;
        if was_improving != is_improving {
            let bin = self.move_to_bin[index];
            if is_improving {
                self.moves_in_bin[bin] += 1;
                self.improving_moves += 1;
            } else {
                self.moves_in_bin[bin] -= 1;
                self.improving_moves -= 1;
            }
        }
    }

    /// Replaces every move's bin and recounts improving moves per bin.
    ///
    /// # Panics
    ///
    /// Panics if `bins` does not hold one entry per move or names a bin past
    /// the sentinel.
    pub fn assign_bins(&mut self, bins: Vec<usize>) {
        assert_eq!(bins.len(), self.delta.len(), "one bin per move");
        self.move_to_bin = bins;
        self.moves_in_bin.fill(0);
        for (index, &bin) in self.move_to_bin.iter().enumerate() {
            if self.delta[index] > 0 {
                self.moves_in_bin[bin] += 1;
            }
        }
    }

    /// Returns the current delta of a move.
    #[inline]
    pub fn delta(&self, index: usize) -> Fitness {
        self.delta[index]
    }

    /// Returns every delta.
    pub fn deltas(&self) -> &[Fitness] {
        &self.delta
    }

    /// Returns the bin a move is counted in.
    #[inline]
    pub fn bin_of(&self, index: usize) -> usize {
        self.move_to_bin[index]
    }

    /// Returns the number of improving moves in a bin.
    #[inline]
    pub fn moves_in_bin(&self, bin: usize) -> usize {
        self.moves_in_bin[bin]
    }

    /// Returns the number of strictly improving moves.
    #[inline]
    pub fn improving_moves(&self) -> usize {
        self.improving_moves
    }

    /// Returns true if no move strictly improves the reference.
    #[inline]
    pub fn is_local_optimum(&self) -> bool {
        self.improving_moves == 0
    }

    /// Walks down from `start` to the first bin holding an improving move.
    #[inline]
    pub fn highest_occupied_bin(&self, start: usize) -> Option<usize> {
        (0..=start).rev().find(|&bin| self.moves_in_bin[bin] > 0)
    }

    /// Returns the bin used for moves that depend on no bit.
    #[inline]
    pub fn sentinel_bin(&self) -> usize {
        self.moves_in_bin.len() - 1
    }

    /// Recounts the bins from the deltas and reports the first mismatch.
    pub fn check_counts(&self) -> Result<(), String> {
        let mut expected = vec![0usize; self.moves_in_bin.len()];
        for (index, &bin) in self.move_to_bin.iter().enumerate() {
            if self.delta[index] > 0 {
                expected[bin] += 1;
            }
        }
        if let Some(bin) = (0..expected.len()).find(|&b| expected[b] != self.moves_in_bin[b]) {
            return Err(format!(
                "bin {} counts {} improving moves, expected {}",
                bin, self.moves_in_bin[bin], expected[bin]
            ));
        }
        let total: usize = expected.iter().sum();
        if total != self.improving_moves {
            return Err(format!(
                "{} improving moves tracked, expected {}",
                self.improving_moves, total
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_local_optimum() {
        let table = DeltaTable::new(3, 4);
        assert!(table.is_local_optimum());
        assert_eq!(table.sentinel_bin(), 4);
        assert_eq!(table.bin_of(2), 4);
    }

    #[test]
    fn test_adjust_tracks_sign_changes() {
        let mut table = DeltaTable::new(2, 3);
        table.assign_bins(vec![1, 2]);

        table.adjust(0, 5);
        assert_eq!(table.delta(0), 5);
        assert_eq!(table.moves_in_bin(1), 1);
        assert_eq!(table.improving_moves(), 1);

        // staying positive does not double count
        table.adjust(0, -2);
        assert_eq!(table.moves_in_bin(1), 1);

        // zero is not improving
        table.adjust(0, -3);
        assert_eq!(table.delta(0), 0);
        assert_eq!(table.moves_in_bin(1), 0);
        assert!(table.is_local_optimum());

        table.adjust(1, -4);
        assert_eq!(table.improving_moves(), 0);
        table.adjust(1, 5);
        assert_eq!(table.moves_in_bin(2), 1);
        assert!(table.check_counts().is_ok());
    }

    #[test]
    fn test_assign_bins_recounts() {
        let mut table = DeltaTable::new(3, 3);
        table.adjust(0, 1);
        table.adjust(1, 1);
        table.adjust(2, -1);
        // everything still sits in the sentinel bin
        assert_eq!(table.moves_in_bin(3), 2);
        assert_eq!(table.improving_moves(), 2);

        table.assign_bins(vec![0, 2, 2]);
        assert_eq!(table.moves_in_bin(3), 0);
        assert_eq!(table.moves_in_bin(0), 1);
        assert_eq!(table.moves_in_bin(2), 1);
        assert_eq!(table.improving_moves(), 2);
        assert!(table.check_counts().is_ok());
    }

    #[test]
    fn test_highest_occupied_bin() {
        let mut table = DeltaTable::new(2, 5);
        table.assign_bins(vec![1, 3]);
        assert_eq!(table.highest_occupied_bin(4), None);

        table.adjust(0, 1);
        assert_eq!(table.highest_occupied_bin(4), Some(1));
        table.adjust(1, 1);
        assert_eq!(table.highest_occupied_bin(4), Some(3));
        assert_eq!(table.highest_occupied_bin(2), Some(1));
        assert_eq!(table.highest_occupied_bin(0), None);
    }

    #[test]
    fn test_clear() {
        let mut table = DeltaTable::new(2, 2);
        table.assign_bins(vec![0, 1]);
        table.adjust(0, 3);
        table.clear();
        assert_eq!(table.deltas(), &[0, 0]);
        assert_eq!(table.bin_of(0), 2);
        assert!(table.is_local_optimum());
        assert!(table.check_counts().is_ok());
    }
}
