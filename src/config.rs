use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Top-level kolmo configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct KolmoConfig {
    /// Graph validation settings.
    #[serde(default)]
    pub graph: GraphToml,

    /// Stationary analysis settings.
    #[serde(default)]
    pub stationary: StationaryToml,

    /// Diagram export settings.
    #[serde(default)]
    pub diagram: DiagramToml,
}

impl KolmoConfig {
    /// Loads the configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&toml_str)
            .with_context(|| format!("failed to parse TOML config: {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphToml {
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for GraphToml {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
        }
    }
}

fn default_tolerance() -> f64 {
    0.01
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StationaryToml {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_limit_max_iterations")]
    pub limit_max_iterations: usize,
    #[serde(default = "default_show_powers")]
    pub show_powers: Vec<usize>,
}

impl Default for StationaryToml {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            max_iterations: default_max_iterations(),
            limit_max_iterations: default_limit_max_iterations(),
            show_powers: default_show_powers(),
        }
    }
}

fn default_epsilon() -> f64 {
    0.01
}
fn default_max_iterations() -> usize {
    1000
}
fn default_limit_max_iterations() -> usize {
    100
}
fn default_show_powers() -> Vec<usize> {
    vec![3, 7]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramToml {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub reduce: bool,
    /// Directory for `.mmd` files; next to the input when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default = "default_layout")]
    pub layout: String,
    #[serde(default = "default_neo")]
    pub theme: String,
    #[serde(default = "default_neo")]
    pub look: String,
}

impl Default for DiagramToml {
    fn default() -> Self {
        Self {
            enabled: true,
            reduce: false,
            output_dir: None,
            layout: default_layout(),
            theme: default_neo(),
            look: default_neo(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_layout() -> String {
    "elk".to_string()
}
fn default_neo() -> String {
    "neo".to_string()
}
