use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Communicating classes and long-run behaviour of discrete Markov chains.
#[derive(Parser)]
#[command(
    name = "kolmo",
    version,
    about = "Communicating classes and stationary distributions of Markov chains"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// List the graph, check its rows and draw it.
    Inspect(InspectArgs),
    /// Decompose into communicating classes and classify them.
    Classes(ClassesArgs),
    /// Matrix powers, limit search and per-class stationary distributions.
    Limits(LimitsArgs),
    /// Run inspect, classes and limits in sequence.
    Analyze(AnalyzeArgs),
    /// Random walk compared against the stationary distributions.
    Simulate(SimulateArgs),
}

/// Input shared by every subcommand.
#[derive(clap::Args)]
pub struct GraphArgs {
    /// Edge-list file: vertex count, then one `from to probability` per line.
    pub input: PathBuf,

    /// Path to TOML configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `inspect` subcommand.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Skip writing Mermaid diagrams.
    #[arg(long)]
    pub no_diagrams: bool,
}

/// Arguments for the `classes` subcommand.
#[derive(clap::Args)]
pub struct ClassesArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Drop class links implied by two others.
    #[arg(long)]
    pub reduce: bool,

    /// Skip writing Mermaid diagrams.
    #[arg(long)]
    pub no_diagrams: bool,
}

/// Arguments for the `limits` subcommand.
#[derive(clap::Args)]
pub struct LimitsArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Override the convergence threshold from config.
    #[arg(short, long)]
    pub epsilon: Option<f64>,
}

/// Arguments for the `analyze` subcommand.
#[derive(clap::Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Drop class links implied by two others.
    #[arg(long)]
    pub reduce: bool,

    /// Skip writing Mermaid diagrams.
    #[arg(long)]
    pub no_diagrams: bool,

    /// Override the convergence threshold from config.
    #[arg(short, long)]
    pub epsilon: Option<f64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub graph: GraphArgs,

    /// Starting vertex (1-based).
    #[arg(long, default_value_t = 1)]
    pub start: usize,

    /// Number of transitions to draw.
    #[arg(long, default_value_t = 10_000)]
    pub steps: usize,

    /// RNG seed; random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the convergence threshold from config.
    #[arg(short, long)]
    pub epsilon: Option<f64>,
}
