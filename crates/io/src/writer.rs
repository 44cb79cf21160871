//! Writing diagrams to disk.

use std::path::Path;

use kolmo_graph::{ClassLink, Graph, Partition};
use tracing::info;

use crate::error::IoError;
use crate::mermaid::{DiagramStyle, render_class_diagram, render_graph};

fn write_text(path: &Path, text: &str) -> Result<(), IoError> {
    std::fs::write(path, text).map_err(|source| IoError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the Mermaid diagram of `graph` to `path`.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be written.
pub fn write_graph_diagram(path: &Path, graph: &Graph, style: &DiagramStyle) -> Result<(), IoError> {
    write_text(path, &render_graph(graph, style))?;
    info!(path = %path.display(), "graph diagram written");
    Ok(())
}

/// Writes the Mermaid class diagram to `path`.
///
/// # Errors
///
/// Returns [`IoError::Write`] if the file cannot be written.
pub fn write_class_diagram(
    path: &Path,
    partition: &Partition,
    links: &[ClassLink],
    style: &DiagramStyle,
) -> Result<(), IoError> {
    write_text(path, &render_class_diagram(partition, links, style))?;
    info!(path = %path.display(), n_links = links.len(), "class diagram written");
    Ok(())
}
