//! Counters that drive the traversals.

use tracing::info;

/// Binary reflected Gray code over an arbitrary number of positions.
///
/// Step `t` flips position `trailing_zeros(t)`, so consecutive states differ
/// in one position and all `2^length` states are visited before the counter
/// runs out.
#[derive(Debug, Clone)]
pub struct GrayCounter {
    length: usize,
    words: Vec<u64>,
}

impl GrayCounter {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            words: vec![0; length / 64 + 1],
        }
    }

    /// Advances the counter and returns the position to flip, or `None`
    /// once every state has been visited.
    pub fn next_position(&mut self) -> Option<usize> {
        let (word, ones) = self
            .words
            .iter()
            .enumerate()
            .find(|(_, &w)| w != u64::MAX)
            .map(|(i, &w)| (i, w.trailing_ones() as usize))?;
        let position = word * 64 + ones;
        if position >= self.length {
            return None;
        }
        for w in &mut self.words[..word] {
            *w = 0;
        }
        self.words[word] += 1;
        Some(position)
    }
}

/// Logs how far the traversal has reached.
///
/// A position is reported the first time the traversal climbs past every
/// position reported so far. Whenever the traversal arrives at position
/// `length - pass`, the high-water mark resets and the next pass begins, so
/// each pass logs a fresh climb through the low positions.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    length: usize,
    pass: usize,
    progress: Option<usize>,
}

impl ProgressTracker {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            pass: 1,
            progress: None,
        }
    }

    /// Records that the traversal touched `position`.
    ///
    /// Returns true if this touch was logged.
    #[inline]
    pub fn observe(&mut self, position: usize) -> bool {
        let logged = self.progress.map_or(true, |p| position > p);
        if logged {
            info!(event = "progress", pass = self.pass as u64, position = position as u64);
            self.progress = Some(position);
        }
        if self.length.checked_sub(self.pass) == Some(position) {
            self.progress = None;
            self.pass += 1;
        }
        logged
    }

    /// Returns the current pass number, starting at 1.
    pub fn pass(&self) -> usize {
        self.pass
    }
}
