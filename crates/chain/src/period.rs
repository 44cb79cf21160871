//! Period of a class from the return times visible in its powers.

use crate::matrix::TransitionMatrix;

/// Exponents `t` in `1..=m` for which `S^t` has a positive diagonal entry.
///
/// `m` is the size of `sub`; a return within `t` steps is possible from at
/// least one state for every listed `t`.
pub fn return_times(sub: &TransitionMatrix) -> Vec<usize> {
    let m = sub.size();
    let mut times = Vec::new();
    let mut power = sub.clone();
    for t in 1..=m {
        if (0..m).any(|i| power.get(i, i) > 0.0) {
            times.push(t);
        }
        if t < m {
            power = match power.multiply(sub) {
                Ok(p) => p,
                Err(_) => unreachable!("powers of a square matrix share its size"),
            };
        }
    }
    times
}

/// Greatest common divisor of all values; `0` for an empty slice.
pub fn gcd_all(values: &[usize]) -> usize {
    values.iter().fold(0, |acc, &v| gcd(acc, v))
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Period of the class whose sub-matrix is `sub`.
///
/// Returns `0` when no return is possible within `m` steps, which only
/// happens for a singleton class without a self-loop.
pub fn period(sub: &TransitionMatrix) -> usize {
    gcd_all(&return_times(sub))
}
