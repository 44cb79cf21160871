//! Long-run analysis of a discrete Markov chain on a dense matrix.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │    matrix     │────▶│   stationary   │────▶│     period       │
//!  │ (from graph)  │     │ (power iter.)  │     │ (return gcd)     │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use kolmo_chain::{ClassLimit, StationaryConfig, TransitionMatrix, stationary_distributions};
//! use kolmo_graph::{ClassGraph, EdgeSpec, Graph, decompose};
//!
//! let (graph, _) = Graph::build(
//!     2,
//!     [EdgeSpec::new(1, 2, 1.0), EdgeSpec::new(2, 2, 1.0)],
//! );
//! let partition = decompose(&graph);
//! let classes = ClassGraph::derive(&graph, &partition);
//! let matrix = TransitionMatrix::from_graph(&graph);
//!
//! let limits =
//!     stationary_distributions(&matrix, &partition, &classes, &StationaryConfig::new()).unwrap();
//! let absorbing = limits[partition.class_of(2).index()].as_persistent().unwrap();
//! assert_eq!(absorbing.distribution(), &[1.0]);
//! assert!(matches!(limits[partition.class_of(1).index()], ClassLimit::Transient { .. }));
//! ```

pub mod config;
pub mod error;
pub mod limit;
pub mod matrix;
pub mod period;
pub mod simulate;
pub mod stationary;

pub use config::StationaryConfig;
pub use error::ChainError;
pub use limit::{LimitSearch, find_limit};
pub use matrix::TransitionMatrix;
pub use period::{gcd_all, period, return_times};
pub use simulate::{occupancy, simulate_path};
pub use stationary::{
    ClassLimit, Readout, StationaryResult, analyze_persistent, fixed_point_residual,
    stationary_distributions,
};
