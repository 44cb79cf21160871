//! Pure conversion functions: TOML config structs -> crate API config types.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use kolmo_chain::StationaryConfig;
use kolmo_io::DiagramStyle;

use crate::config::{DiagramToml, StationaryToml};

/// Checks a Mermaid layout engine name.
pub fn parse_layout(s: &str) -> Result<&str> {
    match s {
        "elk" | "dagre" => Ok(s),
        other => bail!("unknown diagram layout: {other:?}"),
    }
}

/// Checks a Mermaid look name.
pub fn parse_look(s: &str) -> Result<&str> {
    match s {
        "neo" | "classic" | "handDrawn" => Ok(s),
        other => bail!("unknown diagram look: {other:?}"),
    }
}

/// Builds a [`StationaryConfig`] from the TOML stationary configuration.
///
/// A CLI `--epsilon` takes precedence over the file.
pub fn build_stationary_config(
    stationary: &StationaryToml,
    epsilon: Option<f64>,
) -> Result<StationaryConfig> {
    let cfg = StationaryConfig::new()
        .with_epsilon(epsilon.unwrap_or(stationary.epsilon))
        .with_max_iterations(stationary.max_iterations)
        .with_limit_max_iterations(stationary.limit_max_iterations);
    cfg.validate().context("invalid [stationary] settings")?;
    Ok(cfg)
}

/// Builds a [`DiagramStyle`] from the TOML diagram configuration.
pub fn build_diagram_style(diagram: &DiagramToml) -> Result<DiagramStyle> {
    Ok(DiagramStyle::default()
        .with_layout(parse_layout(&diagram.layout)?)
        .with_theme(&diagram.theme)
        .with_look(parse_look(&diagram.look)?))
}

/// Path of a diagram derived from the input file: `chain.txt` with kind
/// `graph` becomes `chain_graph.mmd`, next to the input unless `output_dir`
/// is set.
pub fn diagram_path(input: &Path, output_dir: Option<&Path>, kind: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "kolmo".to_string());
    let file = format!("{stem}_{kind}.mmd");
    match output_dir {
        Some(dir) => dir.join(file),
        None => input.with_file_name(file),
    }
}
