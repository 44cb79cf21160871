//! Random walks on a transition matrix.

use crate::error::ChainError;
use crate::matrix::TransitionMatrix;

/// Simulates a trajectory of `steps` transitions starting at `start`.
///
/// # Arguments
///
/// * `matrix` - Transition matrix to walk.
/// * `start` - 1-based starting vertex; not included in the output.
/// * `steps` - Number of transitions to draw.
/// * `rng` - Random number generator.
///
/// # Returns
///
/// The visited vertices, one per step. The walk stops early if it reaches
/// a vertex whose row carries no probability mass.
///
/// # Errors
///
/// Returns [`ChainError::VertexOutOfRange`] if `start` is not in `1..=n`.
pub fn simulate_path(
    matrix: &TransitionMatrix,
    start: usize,
    steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<Vec<usize>, ChainError> {
    if start == 0 || start > matrix.size() {
        return Err(ChainError::VertexOutOfRange {
            vertex: start,
            n: matrix.size(),
        });
    }
    let mut out = Vec::with_capacity(steps);
    let mut current = start;
    for _ in 0..steps {
        let Some(next) = matrix.sample(current, rng) else {
            break;
        };
        out.push(next);
        current = next;
    }
    Ok(out)
}

/// Fraction of the path spent in each vertex; index `v - 1` for vertex `v`.
///
/// Returns all zeros for an empty path.
pub fn occupancy(path: &[usize], n: usize) -> Vec<f64> {
    let mut counts = vec![0usize; n];
    for &v in path {
        if (1..=n).contains(&v) {
            counts[v - 1] += 1;
        }
    }
    if path.is_empty() {
        return vec![0.0; n];
    }
    let total = path.len() as f64;
    counts.into_iter().map(|c| c as f64 / total).collect()
}
