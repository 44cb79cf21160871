//! # kolmo-io
//!
//! Reads Markov chains from plain edge-list files and writes Mermaid
//! diagrams of the chain and of its class structure.

mod error;
mod mermaid;
mod reader;
mod writer;

pub use error::IoError;
pub use mermaid::{DiagramStyle, render_class_diagram, render_graph, vertex_label};
pub use reader::{GraphInput, parse_graph, read_graph};
pub use writer::{write_class_diagram, write_graph_diagram};
