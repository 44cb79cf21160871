//! Simulate command: random walk checked against the stationary distributions.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use kolmo_chain::{ClassLimit, TransitionMatrix, occupancy, simulate_path, stationary_distributions};
use kolmo_graph::{ClassGraph, Partition, decompose};

use crate::analyze_cmd::Session;
use crate::cli::SimulateArgs;
use crate::convert;
use crate::report;

/// Spreads per-class limits over the vertices; index `v - 1` for vertex `v`.
fn vertex_limits(partition: &Partition, limits: &[ClassLimit]) -> Vec<f64> {
    let mut out = vec![0.0; partition.n_vertices()];
    for limit in limits {
        let Some(class) = partition.get(limit.class()) else {
            continue;
        };
        for (&v, p) in class.vertices().iter().zip(limit.distribution()) {
            out[v - 1] = p;
        }
    }
    out
}

/// Run the simulation.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();
    let session = Session::load(&args.graph)?;
    let config = convert::build_stationary_config(&session.config.stationary, args.epsilon)?;

    let matrix = TransitionMatrix::from_graph(&session.graph);
    let partition = decompose(&session.graph);
    let classes = ClassGraph::derive(&session.graph, &partition);
    let limits = stationary_distributions(&matrix, &partition, &classes, &config)
        .context("stationary analysis failed")?;

    let mut rng = match args.seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let path = simulate_path(&matrix, args.start, args.steps, &mut rng)
        .with_context(|| format!("cannot start a walk at vertex {}", args.start))?;
    if path.len() < args.steps {
        println!("Walk stopped after {} steps at a vertex without outgoing mass", path.len());
    }
    info!(start = args.start, steps = path.len(), "walk simulated");

    let start_class = partition.class_of(args.start);
    let end_class = path.last().map(|&v| partition.class_of(v));
    if let Some(end) = end_class {
        println!("Walk started in {start_class} and ended in {end}");
    }

    let visits = occupancy(&path, matrix.size());
    let expected = vertex_limits(&partition, &limits);
    print!("{}", report::simulation(&visits, &expected, path.len()));
    Ok(())
}
