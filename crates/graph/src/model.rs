//! Weighted directed graph with 1-based vertex ids.

use tracing::{debug, warn};

use crate::error::GraphError;

/// An edge as supplied by the input: `from -> to` with a probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSpec {
    /// Source vertex (1-based).
    pub from: usize,
    /// Destination vertex (1-based).
    pub to: usize,
    /// Transition probability.
    pub probability: f64,
}

impl EdgeSpec {
    /// Creates an edge specification.
    pub fn new(from: usize, to: usize, probability: f64) -> Self {
        Self {
            from,
            to,
            probability,
        }
    }
}

/// An outgoing edge stored in the adjacency structure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Destination vertex (1-based).
    pub to: usize,
    /// Transition probability.
    pub probability: f64,
}

/// A vertex whose outgoing probabilities do not sum to one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowSumViolation {
    /// The offending vertex (1-based).
    pub vertex: usize,
    /// Sum of its outgoing probabilities.
    pub sum: f64,
}

/// A weighted directed graph over vertices `1..=n`.
///
/// Built once and read-only afterwards. Outgoing edges of a vertex are
/// enumerated most recently added first, which fixes the order in which
/// the class decomposition discovers vertices.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adjacency: Vec<Vec<Edge>>,
}

impl Graph {
    /// Builds a graph with `n` vertices from the given edges.
    ///
    /// Edges with an endpoint outside `1..=n`, or with a negative or
    /// non-finite probability, are dropped. Each dropped edge is returned
    /// as a [`GraphError`] so the caller can report it.
    pub fn build(
        n: usize,
        edges: impl IntoIterator<Item = EdgeSpec>,
    ) -> (Self, Vec<GraphError>) {
        let mut adjacency = vec![Vec::new(); n];
        let mut dropped = Vec::new();

        for e in edges {
            if e.from == 0 || e.from > n || e.to == 0 || e.to > n {
                warn!(from = e.from, to = e.to, n, "dropping out-of-range edge");
                dropped.push(GraphError::OutOfRangeEdge {
                    from: e.from,
                    to: e.to,
                    n_vertices: n,
                });
                continue;
            }
            if !e.probability.is_finite() || e.probability < 0.0 {
                warn!(from = e.from, to = e.to, p = e.probability, "dropping edge");
                dropped.push(GraphError::InvalidProbability {
                    from: e.from,
                    to: e.to,
                    probability: e.probability,
                });
                continue;
            }
            adjacency[e.from - 1].push(Edge {
                to: e.to,
                probability: e.probability,
            });
        }

        let graph = Self { adjacency };
        debug!(
            n_vertices = graph.n_vertices(),
            n_edges = graph.n_edges(),
            n_dropped = dropped.len(),
            "graph built"
        );
        (graph, dropped)
    }

    /// Returns the number of vertices.
    pub fn n_vertices(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the total number of stored edges.
    pub fn n_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// Returns `true` if `v` is a valid vertex id.
    pub fn contains(&self, v: usize) -> bool {
        (1..=self.n_vertices()).contains(&v)
    }

    /// Enumerates the outgoing edges of vertex `v`, most recent first.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not in `1..=n`.
    pub fn edges(&self, v: usize) -> impl Iterator<Item = &Edge> + '_ {
        assert!(self.contains(v), "vertex {v} outside 1..={}", self.n_vertices());
        self.adjacency[v - 1].iter().rev()
    }

    /// Returns the sum of the outgoing probabilities of vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not in `1..=n`.
    pub fn out_sum(&self, v: usize) -> f64 {
        self.edges(v).map(|e| e.probability).sum()
    }

    /// Lists every vertex whose outgoing sum lies outside `[1 - tol, 1 + tol]`.
    pub fn check_stochastic(&self, tolerance: f64) -> Vec<RowSumViolation> {
        let lo = 1.0 - tolerance;
        let hi = 1.0 + tolerance;
        let violations: Vec<RowSumViolation> = (1..=self.n_vertices())
            .filter_map(|v| {
                let sum = self.out_sum(v);
                (sum < lo || sum > hi).then_some(RowSumViolation { vertex: v, sum })
            })
            .collect();
        for v in &violations {
            warn!(vertex = v.vertex, sum = v.sum, "outgoing probabilities do not sum to 1");
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(from: usize, to: usize, p: f64) -> EdgeSpec {
        EdgeSpec::new(from, to, p)
    }

    #[test]
    fn build_counts() {
        let (g, dropped) = Graph::build(3, [e(1, 2, 1.0), e(2, 3, 1.0), e(3, 1, 1.0)]);
        assert!(dropped.is_empty());
        assert_eq!(g.n_vertices(), 3);
        assert_eq!(g.n_edges(), 3);
    }

    #[test]
    fn edges_most_recent_first() {
        let (g, _) = Graph::build(3, [e(1, 1, 0.2), e(1, 2, 0.3), e(1, 3, 0.5)]);
        let dests: Vec<usize> = g.edges(1).map(|e| e.to).collect();
        assert_eq!(dests, vec![3, 2, 1]);
        // Re-enumerable.
        assert_eq!(g.edges(1).count(), 3);
    }

    #[test]
    fn out_of_range_edge_dropped() {
        let (g, dropped) = Graph::build(3, [e(1, 2, 1.0), e(5, 1, 0.5), e(2, 0, 1.0)]);
        assert_eq!(g.n_edges(), 1);
        assert_eq!(dropped.len(), 2);
        assert_eq!(
            dropped[0],
            GraphError::OutOfRangeEdge {
                from: 5,
                to: 1,
                n_vertices: 3
            }
        );
        assert!(matches!(dropped[1], GraphError::OutOfRangeEdge { to: 0, .. }));
    }

    #[test]
    fn invalid_probability_dropped() {
        let (g, dropped) = Graph::build(2, [e(1, 2, f64::NAN), e(2, 1, -0.1), e(2, 2, 1.0)]);
        assert_eq!(g.n_edges(), 1);
        assert_eq!(dropped.len(), 2);
        assert!(
            dropped
                .iter()
                .all(|d| matches!(d, GraphError::InvalidProbability { .. }))
        );
    }

    #[test]
    fn out_sum_and_stochastic_check() {
        let (g, _) = Graph::build(
            3,
            [e(1, 2, 0.5), e(1, 3, 0.5), e(2, 2, 0.995), e(3, 1, 0.7)],
        );
        assert!((g.out_sum(1) - 1.0).abs() < 1e-12);
        let bad = g.check_stochastic(0.01);
        assert_eq!(bad.len(), 1);
        assert_eq!(bad[0].vertex, 3);
        assert!((bad[0].sum - 0.7).abs() < 1e-12);
    }

    #[test]
    fn vertex_without_edges_is_non_stochastic() {
        let (g, _) = Graph::build(2, [e(1, 1, 1.0)]);
        let bad = g.check_stochastic(0.01);
        assert_eq!(bad, vec![RowSumViolation { vertex: 2, sum: 0.0 }]);
    }

    #[test]
    fn empty_graph() {
        let (g, dropped) = Graph::build(0, []);
        assert!(dropped.is_empty());
        assert_eq!(g.n_vertices(), 0);
        assert!(g.check_stochastic(0.01).is_empty());
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn edges_panics_on_bad_vertex() {
        let (g, _) = Graph::build(2, []);
        let _ = g.edges(3).count();
    }
}
