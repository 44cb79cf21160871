//! Error types for the kolmo-chain crate.

/// Error type for all fallible operations in the kolmo-chain crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChainError {
    /// Returned when two matrices that must share a size do not.
    #[error("dimension mismatch: left is {left}x{left}, right is {right}x{right}")]
    DimensionMismatch {
        /// Size of the left operand.
        left: usize,
        /// Size of the right operand.
        right: usize,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a vertex id is outside `1..=n`.
    #[error("vertex {vertex} outside 1..={n}")]
    VertexOutOfRange {
        /// The offending vertex.
        vertex: usize,
        /// Matrix size.
        n: usize,
    },

    /// Returned when a class refers to vertices the matrix does not have.
    #[error("class {class} does not fit a {n}x{n} matrix")]
    ClassOutOfRange {
        /// Class name.
        class: String,
        /// Matrix size.
        n: usize,
    },
}
