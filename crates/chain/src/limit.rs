//! Convergence search on the whole transition matrix.

use tracing::{debug, warn};

use crate::error::ChainError;
use crate::matrix::TransitionMatrix;

/// Outcome of [`find_limit`].
#[derive(Debug, Clone, PartialEq)]
pub struct LimitSearch {
    /// Last exponent computed.
    pub exponent: usize,
    /// L1 difference between the last two powers.
    pub difference: f64,
    /// `M^exponent`.
    pub power: TransitionMatrix,
    /// Whether the difference dropped below epsilon.
    pub converged: bool,
}

/// Raises `matrix` to successive powers until two consecutive powers differ
/// by less than `epsilon` (strictly), or the exponent passes `max_exponent`.
///
/// Unlike the per-class analysis this looks at the full chain, transient
/// states included, so the limit rows may differ from one another.
///
/// # Errors
///
/// Returns [`ChainError::InvalidConfig`] if `max_exponent < 2`.
pub fn find_limit(
    matrix: &TransitionMatrix,
    epsilon: f64,
    max_exponent: usize,
) -> Result<LimitSearch, ChainError> {
    if max_exponent < 2 {
        return Err(ChainError::InvalidConfig {
            reason: format!("max_exponent must be >= 2, got {max_exponent}"),
        });
    }
    let mut prev = matrix.clone();
    let mut exponent = 1;
    loop {
        exponent += 1;
        let next = prev.multiply(matrix)?;
        let difference = next.difference(&prev)?;
        prev = next;
        if difference < epsilon {
            debug!(exponent, difference, "matrix powers converged");
            return Ok(LimitSearch {
                exponent,
                difference,
                power: prev,
                converged: true,
            });
        }
        if exponent >= max_exponent {
            warn!(exponent, difference, "matrix powers did not converge");
            return Ok(LimitSearch {
                exponent,
                difference,
                power: prev,
                converged: false,
            });
        }
    }
}
