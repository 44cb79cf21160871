//! Plain-text listings printed by the commands.
//!
//! Every function returns the finished text so the commands decide where it
//! goes and the layout can be tested without capturing stdout.

use std::fmt::Write;

use kolmo_chain::{ClassLimit, LimitSearch, Readout, StationaryResult, TransitionMatrix};
use kolmo_graph::{Class, ClassGraph, ClassKind, ClassLink, Graph, Partition, RowSumViolation};

// Writing to a String cannot fail, so `writeln!` results are ignored below.

fn members(class: &Class) -> String {
    let ids: Vec<String> = class.vertices().iter().map(usize::to_string).collect();
    format!("{{{}}}", ids.join(","))
}

/// One line per vertex: `Vertex 1: -> (2, 0.50) -> (3, 0.50)`.
pub fn adjacency(graph: &Graph) -> String {
    let mut out = String::from("Adjacency lists\n");
    for v in 1..=graph.n_vertices() {
        let _ = write!(out, "  Vertex {v}:");
        let mut any = false;
        for e in graph.edges(v) {
            let _ = write!(out, " -> ({}, {:.2})", e.to, e.probability);
            any = true;
        }
        if !any {
            out.push_str(" (no outgoing edges)");
        }
        out.push('\n');
    }
    out
}

/// Verdict of the row-sum check.
pub fn stochastic_check(violations: &[RowSumViolation], tolerance: f64) -> String {
    if violations.is_empty() {
        return format!("The graph is a Markov graph (row sums within {tolerance} of 1)\n");
    }
    let mut out = String::from("The graph is not a Markov graph\n");
    for v in violations {
        let _ = writeln!(out, "  vertex {}: outgoing sum {:.2}", v.vertex, v.sum);
    }
    out
}

/// The classes with their members, in completion order.
pub fn partition(partition: &Partition) -> String {
    let mut out = format!("Communicating classes ({})\n", partition.len());
    for class in partition.classes() {
        let _ = writeln!(out, "  {}: {}", class.name(), members(class));
    }
    out
}

/// The links between classes.
pub fn links(links: &[ClassLink], reduced: bool) -> String {
    let title = if reduced { "Class links (reduced)" } else { "Class links" };
    let mut out = format!("{title} ({})\n", links.len());
    for link in links {
        let _ = writeln!(out, "  {link}");
    }
    out
}

/// Kind of every class and whether the chain is irreducible.
pub fn classification(partition: &Partition, classes: &ClassGraph) -> String {
    let mut out = String::from("Classification\n");
    for class in partition.classes() {
        let kind = match classes.kind(class.id()) {
            ClassKind::Transient => "transient",
            ClassKind::Persistent => "persistent",
            ClassKind::Absorbing => "persistent (absorbing)",
        };
        let _ = writeln!(out, "  {}: {kind}", class.name());
    }
    let verdict = if classes.is_irreducible() {
        "The chain is irreducible\n"
    } else {
        "The chain is not irreducible\n"
    };
    out.push_str(verdict);
    out
}

/// The matrix with two decimals per cell.
pub fn matrix(title: &str, m: &TransitionMatrix) -> String {
    let mut out = format!("{title}\n");
    for row in m.rows() {
        let cells: Vec<String> = row.iter().map(|p| format!("{p:.2}")).collect();
        let _ = writeln!(out, "  {}", cells.join(" "));
    }
    out
}

/// Outcome of the whole-matrix limit search.
pub fn limit_search(search: &LimitSearch, epsilon: f64) -> String {
    let mut out = if search.converged {
        format!(
            "Powers converged at M^{} (difference {:.4} < {epsilon})\n",
            search.exponent, search.difference
        )
    } else {
        format!(
            "Powers did not converge by M^{} (difference {:.4})\n",
            search.exponent, search.difference
        )
    };
    out.push_str(&matrix(&format!("M^{}", search.exponent), &search.power));
    out
}

fn persistent(out: &mut String, class: &Class, r: &StationaryResult) {
    let _ = writeln!(out, "  {} {}: persistent", class.name(), members(class));
    let status = if r.converged() {
        format!("converged at S^{} (difference {:.4})", r.exponent(), r.difference())
    } else {
        format!("not converged by S^{} (difference {:.4})", r.exponent(), r.difference())
    };
    let _ = writeln!(out, "    {status}");
    if let Readout::CesaroMean { period } = r.readout() {
        let _ = writeln!(out, "    read from the mean of the last {period} powers");
    }
    if !r.rows_agree() {
        let _ = writeln!(out, "    rows disagree (spread {:.4})", r.row_spread());
    }
    let cells: Vec<String> = class
        .vertices()
        .iter()
        .zip(r.distribution())
        .map(|(v, p)| format!("{v}: {p:.4}"))
        .collect();
    let _ = writeln!(out, "    pi = {}", cells.join("  "));
}

/// Per-class limits: zero for transient classes, the stationary
/// distribution for persistent ones.
pub fn stationary(partition: &Partition, limits: &[ClassLimit]) -> String {
    let mut out = String::from("Stationary distributions\n");
    for limit in limits {
        let Some(class) = partition.get(limit.class()) else {
            continue;
        };
        match limit {
            ClassLimit::Transient { .. } => {
                let _ = writeln!(out, "  {} {}: transient, limit 0", class.name(), members(class));
            }
            ClassLimit::Persistent(r) => persistent(&mut out, class, r),
        }
    }
    out
}

/// Period of every class; a zero period marks a class with no observed return.
pub fn periods(partition: &Partition, periods: &[usize]) -> String {
    let mut out = String::from("Periods\n");
    for (class, &d) in partition.classes().iter().zip(periods) {
        if d == 0 {
            let _ = writeln!(out, "  {}: undefined (no return)", class.name());
        } else {
            let _ = writeln!(out, "  {}: {d}", class.name());
        }
    }
    out
}

/// Empirical occupancy of a walk next to the stationary value of each vertex.
pub fn simulation(occupancy: &[f64], expected: &[f64], steps: usize) -> String {
    let mut out = format!("Occupancy over {steps} steps\n  vertex  empirical  stationary\n");
    for (i, (emp, exp)) in occupancy.iter().zip(expected).enumerate() {
        let _ = writeln!(out, "  {:>6}  {emp:>9.4}  {exp:>10.4}", i + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolmo_chain::{StationaryConfig, stationary_distributions};
    use kolmo_graph::{EdgeSpec, decompose};

    fn chain() -> Graph {
        Graph::build(2, [EdgeSpec::new(1, 2, 1.0), EdgeSpec::new(2, 2, 1.0)]).0
    }

    #[test]
    fn adjacency_listing() {
        let (g, _) = Graph::build(3, [EdgeSpec::new(1, 2, 0.5), EdgeSpec::new(1, 3, 0.5)]);
        let text = adjacency(&g);
        assert!(text.contains("  Vertex 1: -> (3, 0.50) -> (2, 0.50)\n"));
        assert!(text.contains("  Vertex 2: (no outgoing edges)\n"));
    }

    #[test]
    fn stochastic_verdicts() {
        assert!(stochastic_check(&[], 0.01).starts_with("The graph is a Markov graph"));
        let text = stochastic_check(&[RowSumViolation { vertex: 3, sum: 0.7 }], 0.01);
        assert!(text.contains("not a Markov graph"));
        assert!(text.contains("vertex 3: outgoing sum 0.70"));
    }

    #[test]
    fn class_listings() {
        let g = chain();
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        assert_eq!(partition(&p), "Communicating classes (2)\n  C1: {2}\n  C2: {1}\n");
        assert_eq!(links(cg.links(), false), "Class links (1)\n  C2 -> C1\n");
        let text = classification(&p, &cg);
        assert!(text.contains("C1: persistent (absorbing)"));
        assert!(text.contains("C2: transient"));
        assert!(text.ends_with("not irreducible\n"));
    }

    #[test]
    fn matrix_two_decimals() {
        let m = TransitionMatrix::from_graph(&chain());
        assert_eq!(matrix("M", &m), "M\n  0.00 1.00\n  0.00 1.00\n");
    }

    #[test]
    fn stationary_listing() {
        let g = chain();
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        let m = TransitionMatrix::from_graph(&g);
        let limits = stationary_distributions(&m, &p, &cg, &StationaryConfig::new()).unwrap();
        let text = stationary(&p, &limits);
        assert!(text.contains("C1 {2}: persistent"));
        assert!(text.contains("pi = 2: 1.0000"));
        assert!(text.contains("C2 {1}: transient, limit 0"));
    }

    #[test]
    fn period_listing() {
        let p = Partition::from_classes(2, vec![vec![2], vec![1]]);
        assert_eq!(periods(&p, &[1, 0]), "Periods\n  C1: 1\n  C2: undefined (no return)\n");
    }

    #[test]
    fn simulation_table() {
        let text = simulation(&[0.25, 0.75], &[0.3, 0.7], 4);
        assert!(text.starts_with("Occupancy over 4 steps\n"));
        assert!(text.contains("       2     0.7500      0.7000\n"));
    }
}
