//! End-to-end class structure on small reference chains.

use kolmo_graph::{ClassGraph, ClassKind, EdgeSpec, Graph, GraphError, decompose};

fn build(n: usize, edges: &[(usize, usize, f64)]) -> (Graph, Vec<GraphError>) {
    Graph::build(n, edges.iter().map(|&(f, t, p)| EdgeSpec::new(f, t, p)))
}

// ---------------------------------------------------------------------------
// 1. simple_three_cycle
// ---------------------------------------------------------------------------
#[test]
fn simple_three_cycle() {
    let (graph, dropped) = build(3, &[(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);
    assert!(dropped.is_empty());
    assert!(graph.check_stochastic(0.01).is_empty());

    let partition = decompose(&graph);
    let cg = ClassGraph::derive(&graph, &partition);

    assert_eq!(partition.len(), 1);
    let mut members = partition.classes()[0].vertices().to_vec();
    members.sort_unstable();
    assert_eq!(members, vec![1, 2, 3]);
    assert!(cg.is_irreducible());
    assert_eq!(cg.kinds(), &[ClassKind::Persistent]);
}

// ---------------------------------------------------------------------------
// 2. transient_into_absorbing
// ---------------------------------------------------------------------------
#[test]
fn transient_into_absorbing() {
    let (graph, _) = build(2, &[(1, 2, 1.0), (2, 2, 1.0)]);
    let partition = decompose(&graph);
    let cg = ClassGraph::derive(&graph, &partition);

    assert_eq!(partition.len(), 2);
    let transient = partition.class_of(1);
    let absorbing = partition.class_of(2);
    assert_eq!(cg.kind(transient), ClassKind::Transient);
    assert_eq!(cg.kind(absorbing), ClassKind::Absorbing);
    assert_eq!(cg.links().len(), 1);
    assert_eq!(cg.links()[0].from, transient);
    assert_eq!(cg.links()[0].to, absorbing);
}

// ---------------------------------------------------------------------------
// 3. out_of_range_edge_is_dropped
// ---------------------------------------------------------------------------
#[test]
fn out_of_range_edge_is_dropped() {
    let (graph, dropped) = build(
        3,
        &[(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0), (5, 1, 0.5)],
    );
    assert_eq!(
        dropped,
        vec![GraphError::OutOfRangeEdge {
            from: 5,
            to: 1,
            n_vertices: 3
        }]
    );
    let partition = decompose(&graph);
    assert!(partition.is_irreducible());
}

// ---------------------------------------------------------------------------
// 4. weather_chain
// ---------------------------------------------------------------------------
#[test]
fn weather_chain_with_two_persistent_classes() {
    // 1 is transient and feeds two closed classes: {2,3} and the absorbing 4.
    let (graph, _) = build(
        4,
        &[
            (1, 1, 0.2),
            (1, 2, 0.4),
            (1, 4, 0.4),
            (2, 2, 0.5),
            (2, 3, 0.5),
            (3, 2, 0.7),
            (3, 3, 0.3),
            (4, 4, 1.0),
        ],
    );
    let partition = decompose(&graph);
    let cg = ClassGraph::derive(&graph, &partition);

    assert_eq!(partition.len(), 3);
    assert_eq!(cg.kind(partition.class_of(1)), ClassKind::Transient);
    assert_eq!(cg.kind(partition.class_of(2)), ClassKind::Persistent);
    assert_eq!(partition.class_of(2), partition.class_of(3));
    assert_eq!(cg.kind(partition.class_of(4)), ClassKind::Absorbing);
    assert_eq!(cg.links().len(), 2);
    assert_eq!(cg.reduced().links().len(), 2);
}
