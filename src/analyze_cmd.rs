//! Analysis commands: inspect, classes, limits, and all three together.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use kolmo_chain::{StationaryConfig, TransitionMatrix, find_limit, period, stationary_distributions};
use kolmo_graph::{ClassGraph, Graph, Partition, decompose};
use kolmo_io::{DiagramStyle, read_graph, write_class_diagram, write_graph_diagram};

use crate::cli::{AnalyzeArgs, ClassesArgs, GraphArgs, InspectArgs, LimitsArgs};
use crate::config::KolmoConfig;
use crate::convert;
use crate::report;

/// A graph read from disk together with the configuration it runs under.
pub struct Session {
    pub input: PathBuf,
    pub config: KolmoConfig,
    pub graph: Graph,
}

impl Session {
    /// Loads the configuration and the graph, reporting dropped edges.
    pub fn load(args: &GraphArgs) -> Result<Self> {
        let config = KolmoConfig::load(args.config.as_deref())?;

        info!(path = %args.input.display(), "reading graph");
        let input = read_graph(&args.input)
            .with_context(|| format!("failed to read graph: {}", args.input.display()))?;
        let (graph, dropped) = Graph::build(input.n, input.edges);
        for err in &dropped {
            println!("Ignored edge: {err}");
        }
        info!(
            n_vertices = graph.n_vertices(),
            n_edges = graph.n_edges(),
            n_dropped = dropped.len(),
            "graph built"
        );

        Ok(Self {
            input: args.input.clone(),
            config,
            graph,
        })
    }

    fn output_dir(&self) -> Result<Option<&Path>> {
        let Some(dir) = self.config.diagram.output_dir.as_deref() else {
            return Ok(None);
        };
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        Ok(Some(dir))
    }

    fn diagram_style(&self) -> Result<DiagramStyle> {
        convert::build_diagram_style(&self.config.diagram)
    }
}

/// Adjacency listing, row-sum check and graph diagram.
fn inspect_part(session: &Session, diagrams: bool) -> Result<()> {
    let _part = info_span!("inspect").entered();
    print!("{}", report::adjacency(&session.graph));

    let tolerance = session.config.graph.tolerance;
    let violations = session.graph.check_stochastic(tolerance);
    print!("{}", report::stochastic_check(&violations, tolerance));

    if diagrams {
        let style = session.diagram_style()?;
        let path = convert::diagram_path(&session.input, session.output_dir()?, "graph");
        write_graph_diagram(&path, &session.graph, &style)
            .with_context(|| format!("failed to write graph diagram: {}", path.display()))?;
        println!("Graph diagram written to {}", path.display());
    }
    Ok(())
}

/// Partition, class links, class diagram and classification.
fn classes_part(session: &Session, reduce: bool, diagrams: bool) -> Result<(Partition, ClassGraph)> {
    let _part = info_span!("classes").entered();
    let partition = decompose(&session.graph);
    let classes = ClassGraph::derive(&session.graph, &partition);
    print!("{}", report::partition(&partition));

    let shown = if reduce { classes.reduced() } else { classes.clone() };
    print!("{}", report::links(shown.links(), reduce));

    if diagrams {
        let style = session.diagram_style()?;
        let path = convert::diagram_path(&session.input, session.output_dir()?, "hasse");
        write_class_diagram(&path, &partition, shown.links(), &style)
            .with_context(|| format!("failed to write class diagram: {}", path.display()))?;
        println!("Class diagram written to {}", path.display());
    }

    print!("{}", report::classification(&partition, &classes));
    Ok((partition, classes))
}

/// Matrix, selected powers, limit search, stationary distributions and periods.
fn limits_part(
    session: &Session,
    partition: &Partition,
    classes: &ClassGraph,
    config: &StationaryConfig,
) -> Result<()> {
    let _part = info_span!("limits").entered();
    let matrix = TransitionMatrix::from_graph(&session.graph);
    print!("{}", report::matrix("Transition matrix M", &matrix));

    for &k in &session.config.stationary.show_powers {
        print!("{}", report::matrix(&format!("M^{k}"), &matrix.power(k)));
    }

    let search = find_limit(&matrix, config.epsilon(), config.limit_max_iterations())
        .context("limit search failed")?;
    print!("{}", report::limit_search(&search, config.epsilon()));

    let limits = stationary_distributions(&matrix, partition, classes, config)
        .context("stationary analysis failed")?;
    let unreliable = limits
        .iter()
        .filter_map(|l| l.as_persistent())
        .filter(|r| !r.is_reliable())
        .count();
    if unreliable > 0 {
        warn!(unreliable, "some stationary distributions may be inaccurate");
    }
    print!("{}", report::stationary(partition, &limits));

    let periods = partition
        .classes()
        .iter()
        .map(|class| matrix.sub_matrix(class).map(|sub| period(&sub)))
        .collect::<Result<Vec<_>, _>>()
        .context("period computation failed")?;
    print!("{}", report::periods(partition, &periods));
    Ok(())
}

/// Run the `inspect` command.
pub fn inspect(args: InspectArgs) -> Result<()> {
    let _cmd = info_span!("inspect_cmd").entered();
    let session = Session::load(&args.graph)?;
    let diagrams = session.config.diagram.enabled && !args.no_diagrams;
    inspect_part(&session, diagrams)
}

/// Run the `classes` command.
pub fn classes(args: ClassesArgs) -> Result<()> {
    let _cmd = info_span!("classes_cmd").entered();
    let session = Session::load(&args.graph)?;
    let diagrams = session.config.diagram.enabled && !args.no_diagrams;
    let reduce = session.config.diagram.reduce || args.reduce;
    classes_part(&session, reduce, diagrams)?;
    Ok(())
}

/// Run the `limits` command.
pub fn limits(args: LimitsArgs) -> Result<()> {
    let _cmd = info_span!("limits_cmd").entered();
    let session = Session::load(&args.graph)?;
    let config = convert::build_stationary_config(&session.config.stationary, args.epsilon)?;
    let partition = decompose(&session.graph);
    let classes = ClassGraph::derive(&session.graph, &partition);
    limits_part(&session, &partition, &classes, &config)
}

/// Run the `analyze` command: inspect, classes and limits in sequence.
pub fn run(args: AnalyzeArgs) -> Result<()> {
    let _cmd = info_span!("analyze").entered();
    let session = Session::load(&args.graph)?;
    let config = convert::build_stationary_config(&session.config.stationary, args.epsilon)?;
    let diagrams = session.config.diagram.enabled && !args.no_diagrams;
    let reduce = session.config.diagram.reduce || args.reduce;

    inspect_part(&session, diagrams)?;
    println!();
    let (partition, classes) = classes_part(&session, reduce, diagrams)?;
    println!();
    limits_part(&session, &partition, &classes, &config)
}
