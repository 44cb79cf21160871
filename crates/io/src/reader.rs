//! Edge-list reader.
//!
//! The format is line oriented: the first non-blank line holds the vertex
//! count, every following non-blank line one edge `from to probability`.
//! Lines starting with `#` are ignored.

use std::path::Path;

use kolmo_graph::EdgeSpec;
use tracing::{debug, info};

use crate::error::IoError;

/// Parsed contents of an edge-list file.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphInput {
    /// Declared vertex count.
    pub n: usize,
    /// Edges in file order; endpoints are not range-checked here.
    pub edges: Vec<EdgeSpec>,
}

/// Reads and parses an edge-list file.
///
/// # Errors
///
/// Returns [`IoError::Read`] if the file cannot be read and
/// [`IoError::MalformedInput`] if it cannot be parsed.
pub fn read_graph(path: &Path) -> Result<GraphInput, IoError> {
    let text = std::fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let input = parse_graph(&text)?;
    info!(path = %path.display(), n = input.n, n_edges = input.edges.len(), "graph file read");
    Ok(input)
}

/// Parses edge-list text.
///
/// # Errors
///
/// Returns [`IoError::MalformedInput`] when the vertex count is missing or
/// not a non-negative integer, or when an edge line does not hold exactly
/// two integers and a number.
pub fn parse_graph(text: &str) -> Result<GraphInput, IoError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (count_line, count) = lines.next().ok_or_else(|| IoError::MalformedInput {
        line: 0,
        reason: "missing vertex count".to_string(),
    })?;
    let n = count
        .parse::<usize>()
        .map_err(|e| IoError::MalformedInput {
            line: count_line,
            reason: format!("invalid vertex count {count:?}: {e}"),
        })?;

    let edges = lines
        .map(|(line, text)| parse_edge(line, text))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(n, n_edges = edges.len(), "edge list parsed");
    Ok(GraphInput { n, edges })
}

fn parse_edge(line: usize, text: &str) -> Result<EdgeSpec, IoError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [from, to, p] = fields[..] else {
        return Err(IoError::MalformedInput {
            line,
            reason: format!("expected 3 fields, got {}", fields.len()),
        });
    };
    let vertex = |s: &str, what: &str| {
        s.parse::<usize>().map_err(|e| IoError::MalformedInput {
            line,
            reason: format!("invalid {what} vertex {s:?}: {e}"),
        })
    };
    let probability = p.parse::<f64>().map_err(|e| IoError::MalformedInput {
        line,
        reason: format!("invalid probability {p:?}: {e}"),
    })?;
    Ok(EdgeSpec::new(vertex(from, "source")?, vertex(to, "destination")?, probability))
}
