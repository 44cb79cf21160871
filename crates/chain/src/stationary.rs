//! Per-class long-run behaviour by power iteration.
//!
//! For every persistent class the sub-matrix `S` is raised to successive
//! powers until two consecutive powers are within `epsilon` in L1 distance.
//! The stationary distribution is read from the first row of the last
//! power.
//!
//! A periodic class never settles this way: its powers cycle. When the
//! exponent cap is hit and the class has period `d > 1`, the distribution
//! is instead read from the mean of the last `d` powers, whose rows agree.

use kolmo_graph::{Class, ClassGraph, ClassId, ClassKind, Partition};
use tracing::{debug, instrument, warn};

use crate::config::StationaryConfig;
use crate::error::ChainError;
use crate::matrix::TransitionMatrix;
use crate::period::period;

/// How the distribution of a [`StationaryResult`] was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readout {
    /// First row of the last computed power.
    FirstRow,
    /// First row of the mean of the last `period` powers.
    CesaroMean {
        /// Period of the class, also the number of powers averaged.
        period: usize,
    },
}

/// Long-run behaviour of one persistent class.
#[derive(Debug, Clone, PartialEq)]
pub struct StationaryResult {
    class: ClassId,
    distribution: Vec<f64>,
    period: usize,
    exponent: usize,
    difference: f64,
    converged: bool,
    readout: Readout,
    row_spread: f64,
    epsilon: f64,
}

impl StationaryResult {
    /// Returns the class this result belongs to.
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// Returns the stationary distribution, in the class's vertex order.
    pub fn distribution(&self) -> &[f64] {
        &self.distribution
    }

    /// Returns the period of the class (`0` if no return was observed).
    pub fn period(&self) -> usize {
        self.period
    }

    /// Returns the last exponent computed.
    pub fn exponent(&self) -> usize {
        self.exponent
    }

    /// Returns the L1 difference between the last two powers.
    pub fn difference(&self) -> f64 {
        self.difference
    }

    /// Returns `true` if successive powers came within epsilon.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Returns how the distribution was read.
    pub fn readout(&self) -> Readout {
        self.readout
    }

    /// Largest L1 distance between row 0 and another row of the matrix the
    /// distribution was read from.
    pub fn row_spread(&self) -> f64 {
        self.row_spread
    }

    /// Returns `true` if every row agreed with row 0 within epsilon.
    pub fn rows_agree(&self) -> bool {
        self.row_spread <= self.epsilon
    }

    /// Returns `true` if the distribution can be trusted: the powers
    /// converged, or the averaged readout produced agreeing rows.
    pub fn is_reliable(&self) -> bool {
        self.rows_agree() && (self.converged || matches!(self.readout, Readout::CesaroMean { .. }))
    }
}

/// Limit of one class of the chain.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassLimit {
    /// Mass leaves the class; its limiting distribution is zero.
    Transient {
        /// The class.
        class: ClassId,
        /// Number of member vertices.
        size: usize,
    },
    /// Closed class with its stationary behaviour.
    Persistent(StationaryResult),
}

impl ClassLimit {
    /// Returns the class this limit belongs to.
    pub fn class(&self) -> ClassId {
        match self {
            Self::Transient { class, .. } => *class,
            Self::Persistent(r) => r.class(),
        }
    }

    /// Returns the limiting distribution over the class's vertices.
    pub fn distribution(&self) -> Vec<f64> {
        match self {
            Self::Transient { size, .. } => vec![0.0; *size],
            Self::Persistent(r) => r.distribution.clone(),
        }
    }

    /// Returns the persistent result, if any.
    pub fn as_persistent(&self) -> Option<&StationaryResult> {
        match self {
            Self::Transient { .. } => None,
            Self::Persistent(r) => Some(r),
        }
    }
}

/// Returns `‖pi S - pi‖₁`.
///
/// # Errors
///
/// Returns [`ChainError::DimensionMismatch`] if `pi` does not match `sub`.
pub fn fixed_point_residual(sub: &TransitionMatrix, pi: &[f64]) -> Result<f64, ChainError> {
    let next = sub.left_apply(pi)?;
    Ok(next.iter().zip(pi).map(|(a, b)| (a - b).abs()).sum())
}

/// Computes the stationary behaviour of a single persistent class.
///
/// # Errors
///
/// Returns [`ChainError`] if the class does not fit `matrix` or the
/// configuration is invalid.
pub fn analyze_persistent(
    matrix: &TransitionMatrix,
    class: &Class,
    config: &StationaryConfig,
) -> Result<StationaryResult, ChainError> {
    config.validate()?;
    let eps = config.epsilon();
    let sub = matrix.sub_matrix(class)?;
    let class_period = period(&sub);
    if class_period == 0 {
        warn!(class = %class.id(), "no return observed within class size, period undefined");
    }

    let mut prev = sub.clone();
    let mut exponent = 1;
    let (difference, converged) = loop {
        exponent += 1;
        let next = prev.multiply(&sub)?;
        let diff = next.difference(&prev)?;
        prev = next;
        if diff <= eps {
            break (diff, true);
        }
        if exponent >= config.max_iterations() {
            break (diff, false);
        }
    };

    let (readout, source) = if !converged && class_period > 1 {
        let mut window = Vec::with_capacity(class_period);
        window.push(prev.clone());
        for _ in 1..class_period {
            let next = window[window.len() - 1].multiply(&sub)?;
            window.push(next);
        }
        (
            Readout::CesaroMean {
                period: class_period,
            },
            TransitionMatrix::mean(&window)?,
        )
    } else {
        (Readout::FirstRow, prev)
    };

    if !converged {
        warn!(
            class = %class.id(),
            exponent,
            difference,
            ?readout,
            "power iteration did not converge"
        );
    }

    let row_spread = source.row_spread();
    if row_spread > eps {
        warn!(
            class = %class.id(),
            row_spread,
            "rows of the limit disagree, first row may not be stationary"
        );
    }

    let distribution = if source.size() == 0 {
        Vec::new()
    } else {
        source.row(0).to_vec()
    };
    debug!(class = %class.id(), exponent, converged, period = class_period, "class analysed");

    Ok(StationaryResult {
        class: class.id(),
        distribution,
        period: class_period,
        exponent,
        difference,
        converged,
        readout,
        row_spread,
        epsilon: eps,
    })
}

/// Computes the limit of every class of `partition`.
///
/// Transient classes are reported with a zero limit and skipped;
/// persistent ones go through [`analyze_persistent`].
///
/// # Errors
///
/// Returns [`ChainError`] if the configuration is invalid or the partition
/// does not belong to `matrix`.
#[instrument(skip_all, fields(n_classes = partition.len()))]
pub fn stationary_distributions(
    matrix: &TransitionMatrix,
    partition: &Partition,
    classes: &ClassGraph,
    config: &StationaryConfig,
) -> Result<Vec<ClassLimit>, ChainError> {
    config.validate()?;
    if partition.n_vertices() != matrix.size() {
        return Err(ChainError::DimensionMismatch {
            left: partition.n_vertices(),
            right: matrix.size(),
        });
    }
    partition
        .classes()
        .iter()
        .map(|class| match classes.kind(class.id()) {
            ClassKind::Transient => {
                debug!(class = %class.id(), "transient, limit is zero");
                Ok(ClassLimit::Transient {
                    class: class.id(),
                    size: class.len(),
                })
            }
            ClassKind::Persistent | ClassKind::Absorbing => {
                analyze_persistent(matrix, class, config).map(ClassLimit::Persistent)
            }
        })
        .collect()
}
