//! Error types for kolmo-io.

use std::path::PathBuf;

/// Error type for all fallible operations in the kolmo-io crate.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when an input file cannot be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when an output file cannot be written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        /// Path that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Returned when the vertex count or an edge line cannot be parsed.
    #[error("malformed input at line {line}: {reason}")]
    MalformedInput {
        /// 1-based line number (0 when the file is empty).
        line: usize,
        /// Description of the problem.
        reason: String,
    },
}
