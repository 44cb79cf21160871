//! Communicating-class structure of a discrete Markov chain.
//!
//! A chain is given as a weighted directed [`Graph`] over vertices `1..=n`.
//! This crate splits it into strongly connected classes and describes how
//! those classes feed into each other.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │    model      │────▶│      scc       │────▶│    condense      │
//!  │ (build graph) │     │ (Tarjan split) │     │ (links & kinds)  │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use kolmo_graph::{ClassGraph, ClassKind, EdgeSpec, Graph, decompose};
//!
//! let edges = [
//!     EdgeSpec::new(1, 2, 1.0),
//!     EdgeSpec::new(2, 2, 1.0),
//! ];
//! let (graph, dropped) = Graph::build(2, edges);
//! assert!(dropped.is_empty());
//!
//! let partition = decompose(&graph);
//! let classes = ClassGraph::derive(&graph, &partition);
//! assert_eq!(classes.kind(partition.class_of(2)), ClassKind::Absorbing);
//! ```

pub mod condense;
pub mod error;
pub mod model;
pub mod scc;

pub use condense::{ClassGraph, ClassKind, ClassLink, transitive_reduction};
pub use error::GraphError;
pub use model::{Edge, EdgeSpec, Graph, RowSumViolation};
pub use scc::{Class, ClassId, Partition, decompose};
