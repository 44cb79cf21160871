//! Error types for the kolmo-graph crate.

/// Problems found while building a [`Graph`](crate::Graph).
///
/// None of these abort construction: the offending edge is dropped and the
/// error is handed back to the caller alongside the graph.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Returned when an edge endpoint is outside `1..=n`.
    #[error("edge ({from}, {to}) has an endpoint outside 1..={n_vertices}")]
    OutOfRangeEdge {
        /// Source vertex as read.
        from: usize,
        /// Destination vertex as read.
        to: usize,
        /// Number of vertices in the graph.
        n_vertices: usize,
    },

    /// Returned when an edge probability is negative or not finite.
    #[error("edge ({from}, {to}) has invalid probability {probability}")]
    InvalidProbability {
        /// Source vertex.
        from: usize,
        /// Destination vertex.
        to: usize,
        /// The rejected probability.
        probability: f64,
    },
}
