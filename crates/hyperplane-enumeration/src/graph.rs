//! Variable interaction graph and connected subgraph enumeration.
//!
//! Two bits interact when some subfunction reads both. Every connected
//! induced subgraph of that graph with at most `radius` vertices is a
//! candidate move: flipping a disconnected set of bits can never do better
//! than flipping its components one at a time.

use std::collections::BTreeSet;

use hyperplane_core::Landscape;
use smallvec::SmallVec;

use crate::moves::Move;

/// Sparse adjacency over bit indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionGraph {
    adjacency: Vec<Vec<usize>>,
}

impl InteractionGraph {
    /// Builds the graph from the subfunctions of a landscape.
    pub fn from_landscape(landscape: &Landscape) -> Self {
        let mut adjacency = vec![BTreeSet::new(); landscape.length()];
        for sub in landscape.subfunctions() {
            for &x in sub.variables() {
                for &y in sub.variables() {
                    if x != y {
                        adjacency[x].insert(y);
                    }
                }
            }
        }
        Self {
            adjacency: adjacency
                .into_iter()
                .map(|neighbors| neighbors.into_iter().collect())
                .collect(),
        }
    }

    /// Builds an undirected graph from an explicit edge list.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![BTreeSet::new(); vertex_count];
        for &(x, y) in edges {
            if x != y {
                adjacency[x].insert(y);
                adjacency[y].insert(x);
            }
        }
        Self {
            adjacency: adjacency
                .into_iter()
                .map(|neighbors| neighbors.into_iter().collect())
                .collect(),
        }
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the sorted neighbors of a vertex.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }
}

/// Finds every connected induced subgraph with `radius` or fewer vertices.
///
/// Each vertex set appears exactly once, listed in the order its vertices
/// were added (root first). Cost is proportional to the number of subgraphs
/// found.
///
/// # Examples
///
/// ```
/// use hyperplane_enumeration::graph::{k_order_subgraphs, InteractionGraph};
///
/// // path 0 - 1 - 2
/// let graph = InteractionGraph::from_edges(3, &[(0, 1), (1, 2)]);
/// let moves = k_order_subgraphs(&graph, 2);
/// // three singletons and two edges
/// assert_eq!(moves.len(), 5);
/// ```
pub fn k_order_subgraphs(graph: &InteractionGraph, radius: usize) -> Vec<Move> {
    let mut search = SubgraphSearch::new(graph, radius);
    for root in 0..graph.vertex_count() {
        // Roots stay closed so a set is only ever grown from its smallest vertex.
        search.closed[root] = true;
        search.expand(root);
    }
    search.found
}

struct SubgraphSearch<'g> {
    graph: &'g InteractionGraph,
    radius: usize,
    // Vertices that may not join the current branch.
    closed: Vec<bool>,
    // Neighbors of the current set, in the order they were opened.
    frontier: Vec<usize>,
    in_frontier: Vec<bool>,
    current: SmallVec<[usize; 8]>,
    found: Vec<Move>,
}

impl<'g> SubgraphSearch<'g> {
    fn new(graph: &'g InteractionGraph, radius: usize) -> Self {
        let n = graph.vertex_count();
        Self {
            graph,
            radius,
            closed: vec![false; n],
            frontier: Vec::with_capacity(n),
            in_frontier: vec![false; n],
            current: SmallVec::new(),
            found: Vec::new(),
        }
    }

    fn expand(&mut self, vertex: usize) {
        self.current.push(vertex);
        self.found.push(Move::new(&self.current));

        if self.current.len() < self.radius {
            let graph = self.graph;
            let opened_from = self.frontier.len();
            for &neighbor in graph.neighbors(vertex) {
                if !self.in_frontier[neighbor] {
                    self.in_frontier[neighbor] = true;
                    self.frontier.push(neighbor);
                }
            }

            // Children push past `open_len` and pop back before returning.
            let open_len = self.frontier.len();
            let mut closed_here: SmallVec<[usize; 8]> = SmallVec::new();
            for k in 0..open_len {
                let candidate = self.frontier[k];
                if !self.closed[candidate] {
                    self.closed[candidate] = true;
                    closed_here.push(candidate);
                    self.expand(candidate);
                }
            }

            for vertex in closed_here {
                self.closed[vertex] = false;
            }
            for vertex in self.frontier.drain(opened_from..) {
                self.in_frontier[vertex] = false;
            }
        }

        self.current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperplane_test::brute;
    use hyperplane_test::landscapes;

    fn as_sets(moves: &[Move]) -> Vec<Vec<usize>> {
        let mut sets: Vec<Vec<usize>> = moves
            .iter()
            .map(|m| {
                let mut bits = m.bits().to_vec();
                bits.sort_unstable();
                bits
            })
            .collect();
        sets.sort();
        sets
    }

    fn assert_matches_brute_force(graph: &InteractionGraph, radius: usize) {
        let found = as_sets(&k_order_subgraphs(graph, radius));
        let mut deduped = found.clone();
        deduped.dedup();
        assert_eq!(found.len(), deduped.len(), "duplicate subgraph emitted");

        let adjacency: Vec<Vec<usize>> = (0..graph.vertex_count())
            .map(|v| graph.neighbors(v).to_vec())
            .collect();
        let expected = brute::connected_subsets(&adjacency, radius);
        assert_eq!(found, expected);
    }

    #[test]
    fn test_graph_from_landscape() {
        let landscape = landscapes::xor_and();
        let graph = InteractionGraph::from_landscape(&landscape);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(3), &[2]);
        assert!(graph.neighbors(2).contains(&3));
        assert!(!graph.neighbors(1).contains(&2));
    }

    #[test]
    fn test_radius_one_is_singletons() {
        let graph = InteractionGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]);
        let moves = k_order_subgraphs(&graph, 1);
        assert_eq!(moves.len(), 4);
        for (bit, m) in moves.iter().enumerate() {
            assert_eq!(m.bits(), &[bit]);
        }
    }

    #[test]
    fn test_isolated_vertex_keeps_singleton() {
        let graph = InteractionGraph::from_edges(3, &[(0, 1)]);
        let sets = as_sets(&k_order_subgraphs(&graph, 3));
        assert_eq!(sets, vec![vec![0], vec![0, 1], vec![1], vec![2]]);
    }

    #[test]
    fn test_triangle() {
        let graph = InteractionGraph::from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(k_order_subgraphs(&graph, 3).len(), 7);
        assert_eq!(k_order_subgraphs(&graph, 2).len(), 6);
    }

    #[test]
    fn test_star_does_not_repeat_sets() {
        // center 0 with four leaves: every leaf subset plus the center is connected
        let graph = InteractionGraph::from_edges(5, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert_matches_brute_force(&graph, 3);
        assert_matches_brute_force(&graph, 5);
    }

    #[test]
    fn test_cycle_and_grid_match_brute_force() {
        let cycle: Vec<(usize, usize)> = (0..7).map(|i| (i, (i + 1) % 7)).collect();
        let graph = InteractionGraph::from_edges(7, &cycle);
        for radius in 1..=7 {
            assert_matches_brute_force(&graph, radius);
        }

        let mut grid = Vec::new();
        for row in 0..3 {
            for col in 0..3 {
                let v = row * 3 + col;
                if col < 2 {
                    grid.push((v, v + 1));
                }
                if row < 2 {
                    grid.push((v, v + 3));
                }
            }
        }
        let graph = InteractionGraph::from_edges(9, &grid);
        for radius in 1..=4 {
            assert_matches_brute_force(&graph, radius);
        }
    }

    #[test]
    fn test_random_landscapes_match_brute_force() {
        for seed in 0..5 {
            let landscape = landscapes::random_nkq(12, 3, seed);
            let graph = InteractionGraph::from_landscape(&landscape);
            for radius in 1..=3 {
                assert_matches_brute_force(&graph, radius);
            }
        }
    }

    #[test]
    fn test_moves_are_connected_and_rooted_at_minimum() {
        let landscape = landscapes::adjacent_nkq(10, 3, 7);
        let graph = InteractionGraph::from_landscape(&landscape);
        for m in k_order_subgraphs(&graph, 3) {
            let bits = m.bits();
            assert_eq!(bits[0], *bits.iter().min().unwrap());
            for (i, &bit) in bits.iter().enumerate().skip(1) {
                assert!(bits[..i].iter().any(|&prev| graph.neighbors(prev).contains(&bit)));
            }
        }
    }
}
