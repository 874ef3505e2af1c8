//! Exhaustive enumeration of r-bit local optima.
//!
//! The engine walks the hypercube one bit flip at a time from the all-zero
//! candidate. Every flip updates the fitness and the delta of each affected
//! move incrementally, so a state is recognized as a local optimum by
//! looking at a single counter.
//!
//! With hyperplane elimination on, bits are visited in binary counting order
//! over enumeration positions. An improving move in bin `b` depends only on
//! positions `b` and up, so every state that differs from the current one
//! only below `b` is improvable by the same move and the whole hyperplane is
//! skipped with a single carry at `b`.


use std::time::{Duration, Instant};

use hyperplane_config::EnumerationConfig;
use hyperplane_core::{Fitness, HyperplaneError, Landscape, Result};
use tracing::{info, trace};

use crate::delta::DeltaTable;
use crate::graph::{k_order_subgraphs, InteractionGraph};
use crate::moves::{Move, MoveSet};
use crate::remap::Permutation;
use crate::sink::{OptimaSink, RunHeader};
use crate::statistics::EnumerationSummary;
use crate::traversal::{GrayCounter, ProgressTracker};

/// Switches for one enumeration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationOptions {
    /// Skip hyperplanes that cannot hold a local optimum. When off, every
    /// state is visited in Gray code order.
    pub hyperplane_elimination: bool,
    /// Reorder bits so interacting bits share neighboring positions.
    pub reordering: bool,
    /// Recompute every delta from scratch at each local optimum and abort on
    /// any disagreement.
    pub verify_deltas: bool,
}

impl Default for EnumerationOptions {
    fn default() -> Self {
        Self {
            hyperplane_elimination: true,
            reordering: true,
            verify_deltas: false,
        }
    }
}

impl From<&EnumerationConfig> for EnumerationOptions {
    fn from(config: &EnumerationConfig) -> Self {
        Self {
            hyperplane_elimination: config.hyperplane_elimination,
            reordering: config.reordering,
            verify_deltas: config.verify_deltas(),
        }
    }
}

/// Enumeration engine for one landscape and radius.
///
/// The landscape and move set are fixed at construction. The reference
/// candidate, the delta table and the bins are rebuilt at the start of every
/// [`enumerate`](Self::enumerate) call, so an engine can be run repeatedly.
///
/// # Examples
///
/// ```
/// use hyperplane_core::{Landscape, ProblemKind, Subfunction};
/// use hyperplane_enumeration::{CollectingSink, Enumeration, EnumerationOptions};
///
/// let landscape = Landscape::new(
///     ProblemKind::Mk,
///     2,
///     vec![Subfunction::new(vec![0, 1], vec![0, 1, 1, 0])],
/// ).unwrap();
///
/// let mut engine = Enumeration::new(&landscape, 1).unwrap();
/// let mut sink = CollectingSink::new();
/// let summary = engine.enumerate(&mut sink, EnumerationOptions::default()).unwrap();
///
/// // 01 and 10 both score 1 and every single flip loses it
/// assert_eq!(summary.optima, 2);
/// ```
#[derive(Debug)]
pub struct Enumeration<'a> {
    landscape: &'a Landscape,
    radius: usize,
    moves: MoveSet,
    setup: Duration,

    reference: Vec<bool>,
    fitness: Fitness,
    table: DeltaTable,
    permutation: Permutation,

    optima: u64,
    visited: u64,
    flips: u64,
}

impl<'a> Enumeration<'a> {
    /// Builds the interaction graph and every connected move of at most
    /// `radius` bits.
    ///
    /// # Errors
    ///
    /// Returns [`HyperplaneError::Config`] if `radius` is zero.
    pub fn new(landscape: &'a Landscape, radius: usize) -> Result<Self> {
        if radius == 0 {
            return Err(HyperplaneError::Config(
                "radius must be at least 1".to_string(),
            ));
        }
        let start = Instant::now();
        let graph = InteractionGraph::from_landscape(landscape);
        let moves = k_order_subgraphs(&graph, radius);
        let mut engine = Self::with_moves(landscape, radius, moves)?;
        engine.setup = start.elapsed();
        info!(
            event = "setup",
            moves = engine.moves.len() as u64,
            setup_ms = engine.setup.as_millis() as u64,
        );
        Ok(engine)
    }

    /// Creates an engine over an explicit move list.
    ///
    /// The list must hold a single-bit move for every bit. `radius` is only
    /// reported, never enforced.
    pub fn with_moves(landscape: &'a Landscape, radius: usize, moves: Vec<Move>) -> Result<Self> {
        let moves = MoveSet::new(landscape, moves)?;
        let length = landscape.length();
        let mut engine = Self {
            landscape,
            radius,
            table: DeltaTable::new(moves.len(), length),
            moves,
            setup: Duration::ZERO,
            reference: vec![false; length],
            fitness: 0,
            permutation: Permutation::identity(length),
            optima: 0,
            visited: 0,
            flips: 0,
        };
        engine.initialize_deltas();
        engine.bin_moves();
        Ok(engine)
    }

    /// Runs a complete enumeration, reporting every local optimum to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`HyperplaneError::Io`] if the sink fails and
    /// [`HyperplaneError::InvalidState`] if the incremental bookkeeping stops
    /// matching the landscape.
    pub fn enumerate<S: OptimaSink + ?Sized>(
        &mut self,
        sink: &mut S,
        options: EnumerationOptions,
    ) -> Result<EnumerationSummary> {
        let start = Instant::now();
        info!(
            event = "enumerate_start",
            length = self.length() as u64,
            subfunctions = self.landscape.subfunctions().len() as u64,
            moves = self.moves.len() as u64,
            radius = self.radius as u64,
            hyperplane = options.hyperplane_elimination,
            reorder = options.reordering,
        );

        self.initialize_deltas();
        self.remap(options.reordering);
        self.bin_moves();
        self.optima = 0;
        self.visited = 0;
        self.flips = 0;
        if options.verify_deltas {
            self.verify_deltas()?;
        }

        sink.begin(&RunHeader {
            radius: self.radius,
            hyperplane_elimination: options.hyperplane_elimination,
            reordering: options.reordering,
            length: self.length(),
            moves: self.moves.len(),
        })?;

        if options.hyperplane_elimination {
            self.hyperplane_traversal(sink, options.verify_deltas)?;
        } else {
            self.gray_traversal(sink, options.verify_deltas)?;
        }

        let summary = EnumerationSummary {
            optima: self.optima,
            visited: self.visited,
            flips: self.flips,
            setup: self.setup,
            elapsed: self.setup + start.elapsed(),
        };
        sink.finish(&summary)?;

        info!(
            event = "enumerate_end",
            count = summary.optima,
            visited = summary.visited,
            flips = summary.flips,
            optima_ratio = summary.optima_ratio(),
            elapsed_ms = summary.elapsed.as_millis() as u64,
        );
        Ok(summary)
    }

    /// Flips one bit of the reference and updates the fitness and every
    /// affected delta. Returns the new fitness.
    pub fn make_flip(&mut self, bit: usize) -> Fitness {
        self.fitness += self.table.delta(self.moves.single_bit_move(bit));

        let landscape = self.landscape;
        let moves = &self.moves;
        let reference = &mut self.reference;
        let table = &mut self.table;

        for &sub in moves.subs_of_bit(bit) {
            let subfunction = &landscape.subfunctions()[sub];
            let pre = subfunction.evaluate(reference);
            reference[bit] = !reference[bit];
            let just = subfunction.evaluate(reference);
            reference[bit] = !reference[bit];

            for &next in moves.moves_of_sub(sub) {
                let m = moves.get(next);
                m.apply(reference);
                let just_next = subfunction.evaluate(reference);
                reference[bit] = !reference[bit];
                let move_next = subfunction.evaluate(reference);
                reference[bit] = !reference[bit];
                m.apply(reference);
                table.adjust(next, pre - just_next + move_next - just);
            }
        }

        reference[bit] = !reference[bit];
        self.flips += 1;
        self.fitness
    }

    /// Resets the reference to all zeros and computes the fitness and every
    /// delta from scratch.
    pub fn initialize_deltas(&mut self) {
        self.reference.fill(false);
        self.fitness = 0;
        self.table.clear();

        let moves = &self.moves;
        let reference = &mut self.reference;
        let table = &mut self.table;
        for (sub, subfunction) in self.landscape.subfunctions().iter().enumerate() {
            let value = subfunction.evaluate(reference);
            self.fitness += value;
            for &index in moves.moves_of_sub(sub) {
                let m = moves.get(index);
                m.apply(reference);
                let moved = subfunction.evaluate(reference);
                m.apply(reference);
                table.adjust(index, moved - value);
            }
        }
    }

    /// Chooses the enumeration order of the bits.
    pub fn remap(&mut self, reordering: bool) {
        self.permutation = if reordering {
            Permutation::reorder(&self.moves)
        } else {
            Permutation::identity(self.length())
        };
    }

    /// Places every move in the bin of its lowest dependency position.
    pub fn bin_moves(&mut self) {
        let sentinel = self.table.sentinel_bin();
        let bins = (0..self.moves.len())
            .map(|index| {
                self.moves
                    .dependencies(index)
                    .iter()
                    .map(|&bit| self.permutation.position(bit))
                    .min()
                    .unwrap_or(sentinel)
            })
            .collect();
        self.table.assign_bins(bins);
    }

    /// Recomputes the fitness and every delta from scratch and compares them
    /// with the incremental values.
    ///
    /// # Errors
    ///
    /// Returns [`HyperplaneError::InvalidState`] on the first disagreement.
    pub fn verify_deltas(&mut self) -> Result<()> {
        let expected = self.landscape.fitness(&self.reference);
        if expected != self.fitness {
            return Err(HyperplaneError::InvalidState(format!(
                "tracked fitness {} but the reference scores {}",
                self.fitness, expected
            )));
        }

        let landscape = self.landscape;
        let moves = &self.moves;
        let reference = &mut self.reference;
        for index in 0..moves.len() {
            let m = moves.get(index);
            let subs = moves.subs_of_move(index);
            let before: Fitness = subs.iter().map(|&sub| landscape.evaluate(sub, reference)).sum();
            m.apply(reference);
            let after: Fitness = subs.iter().map(|&sub| landscape.evaluate(sub, reference)).sum();
            m.apply(reference);
            if after - before != self.table.delta(index) {
                return Err(HyperplaneError::InvalidState(format!(
                    "move {:?} tracks delta {} but flipping it changes fitness by {}",
                    m.bits(),
                    self.table.delta(index),
                    after - before
                )));
            }
        }

        self.table
            .check_counts()
            .map_err(HyperplaneError::InvalidState)
    }

    fn hyperplane_traversal<S: OptimaSink + ?Sized>(
        &mut self,
        sink: &mut S,
        verify: bool,
    ) -> Result<()> {
        let length = self.length();
        let mut progress = ProgressTracker::new(length);
        let mut index = length - 1;

        loop {
            self.visited += 1;
            match self.table.highest_occupied_bin(index) {
                Some(bin) => index = bin,
                None => {
                    if !self.table.is_local_optimum() {
                        return Err(HyperplaneError::InvalidState(format!(
                            "{} improving moves but none binned at or below position {}",
                            self.table.improving_moves(),
                            index
                        )));
                    }
                    self.report_optimum(sink, verify)?;
                    index = 0;
                }
            }

            // carry
            while index < length && self.reference[self.permutation.bit_at(index)] {
                self.make_flip(self.permutation.bit_at(index));
                index += 1;
            }
            if index == length {
                return Ok(());
            }
            progress.observe(index);
            self.make_flip(self.permutation.bit_at(index));
        }
    }

    fn gray_traversal<S: OptimaSink + ?Sized>(&mut self, sink: &mut S, verify: bool) -> Result<()> {
        let length = self.length();
        let mut progress = ProgressTracker::new(length);
        let mut counter = GrayCounter::new(length);

        loop {
            self.visited += 1;
            if self.table.is_local_optimum() {
                self.report_optimum(sink, verify)?;
            }
            let Some(position) = counter.next_position() else {
                return Ok(());
            };
            progress.observe(position);
            self.make_flip(self.permutation.bit_at(position));
        }
    }

    fn report_optimum<S: OptimaSink + ?Sized>(&mut self, sink: &mut S, verify: bool) -> Result<()> {
        if verify {
            self.verify_deltas()?;
        }
        self.optima += 1;
        trace!(event = "optimum", fitness = self.fitness);
        sink.optimum(self.fitness, &self.reference)?;
        Ok(())
    }

    /// Returns the landscape being enumerated.
    pub fn landscape(&self) -> &'a Landscape {
        self.landscape
    }

    /// Returns the bit-vector length.
    #[inline]
    pub fn length(&self) -> usize {
        self.reference.len()
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn moves(&self) -> &MoveSet {
        &self.moves
    }

    /// Returns the time spent generating moves.
    pub fn setup_time(&self) -> Duration {
        self.setup
    }

    /// Returns the current reference candidate in original bit order.
    pub fn reference(&self) -> &[bool] {
        &self.reference
    }

    /// Returns the tracked fitness of the reference.
    #[inline]
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    pub fn delta_table(&self) -> &DeltaTable {
        &self.table
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }
}
