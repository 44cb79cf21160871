//! Configuration for stationary analysis and limit search.

use crate::error::ChainError;

/// Convergence settings for power iteration.
///
/// # Example
///
/// ```
/// use kolmo_chain::StationaryConfig;
///
/// let config = StationaryConfig::new()
///     .with_epsilon(0.001)
///     .with_max_iterations(5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct StationaryConfig {
    epsilon: f64,
    max_iterations: usize,
    limit_max_iterations: usize,
}

impl StationaryConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `epsilon = 0.01`, `max_iterations = 1000`,
    /// `limit_max_iterations = 100`.
    pub fn new() -> Self {
        Self {
            epsilon: 0.01,
            max_iterations: 1000,
            limit_max_iterations: 100,
        }
    }

    /// Sets the L1 convergence threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the largest exponent tried per persistent class.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the largest exponent tried when searching the whole matrix.
    pub fn with_limit_max_iterations(mut self, n: usize) -> Self {
        self.limit_max_iterations = n;
        self
    }

    /// Returns the L1 convergence threshold.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the per-class exponent cap.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the whole-matrix exponent cap.
    pub fn limit_max_iterations(&self) -> usize {
        self.limit_max_iterations
    }

    /// Validates this configuration.
    ///
    /// Epsilon must be finite and positive; both caps must be at least 2,
    /// since iteration starts by comparing the square with the matrix.
    pub fn validate(&self) -> Result<(), ChainError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ChainError::InvalidConfig {
                reason: format!("epsilon must be finite and positive, got {}", self.epsilon),
            });
        }
        if self.max_iterations < 2 {
            return Err(ChainError::InvalidConfig {
                reason: format!("max_iterations must be >= 2, got {}", self.max_iterations),
            });
        }
        if self.limit_max_iterations < 2 {
            return Err(ChainError::InvalidConfig {
                reason: format!(
                    "limit_max_iterations must be >= 2, got {}",
                    self.limit_max_iterations
                ),
            });
        }
        Ok(())
    }
}

impl Default for StationaryConfig {
    fn default() -> Self {
        Self::new()
    }
}
