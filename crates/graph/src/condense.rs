//! Class condensation, classification and transitive reduction.
//!
//! # Overview
//!
//! Collapsing every class of a [`Partition`] to a single node turns the
//! transition graph into a DAG: the condensation. Its edges are
//! [`ClassLink`]s. A class with an outgoing link leaks probability mass and
//! is transient; a class without one is persistent.
//!
//! The reduced form drops every link `(i, k)` that is implied by two links
//! `(i, j)` and `(j, k)`, which is the Hasse diagram of the reachability
//! order for display purposes.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, instrument};

use crate::model::Graph;
use crate::scc::{ClassId, Partition};

/// A directed edge between two distinct classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassLink {
    /// Source class.
    pub from: ClassId,
    /// Destination class.
    pub to: ClassId,
}

impl fmt::Display for ClassLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Long-run nature of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// Some probability mass eventually leaves the class.
    Transient,
    /// No mass leaves the class.
    Persistent,
    /// A persistent class with a single state.
    Absorbing,
}

impl ClassKind {
    /// Returns `true` for [`ClassKind::Persistent`] and [`ClassKind::Absorbing`].
    pub fn is_persistent(self) -> bool {
        !matches!(self, Self::Transient)
    }
}

/// The condensation of a graph over a partition.
#[derive(Debug, Clone)]
pub struct ClassGraph {
    links: Vec<ClassLink>,
    kinds: Vec<ClassKind>,
}

impl ClassGraph {
    /// Derives the class links of `graph` under `partition`.
    ///
    /// Links are kept in discovery order (by source vertex, then edge
    /// enumeration order) with duplicates removed.
    #[instrument(skip_all, fields(n_classes = partition.len()))]
    pub fn derive(graph: &Graph, partition: &Partition) -> Self {
        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for v in 1..=graph.n_vertices() {
            let from = partition.class_of(v);
            for e in graph.edges(v) {
                let to = partition.class_of(e.to);
                if from != to && seen.insert((from, to)) {
                    links.push(ClassLink { from, to });
                }
            }
        }

        let mut leaks = vec![false; partition.len()];
        for link in &links {
            leaks[link.from.index()] = true;
        }
        let kinds = partition
            .classes()
            .iter()
            .zip(&leaks)
            .map(|(class, &leaks)| match (leaks, class.len()) {
                (true, _) => ClassKind::Transient,
                (false, 1) => ClassKind::Absorbing,
                (false, _) => ClassKind::Persistent,
            })
            .collect();

        debug!(n_links = links.len(), "class links derived");
        Self { links, kinds }
    }

    /// Returns the class links.
    pub fn links(&self) -> &[ClassLink] {
        &self.links
    }

    /// Returns the kind of every class, indexed by [`ClassId`].
    pub fn kinds(&self) -> &[ClassKind] {
        &self.kinds
    }

    /// Returns the kind of one class.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a class of the partition this graph was built from.
    pub fn kind(&self, id: ClassId) -> ClassKind {
        self.kinds[id.index()]
    }

    /// Returns `true` if the class has at least one outgoing link.
    pub fn is_transient(&self, id: ClassId) -> bool {
        self.kind(id) == ClassKind::Transient
    }

    /// Returns `true` if the class has no outgoing link.
    pub fn is_persistent(&self, id: ClassId) -> bool {
        self.kind(id).is_persistent()
    }

    /// Returns `true` if the class is a persistent singleton.
    pub fn is_absorbing(&self, id: ClassId) -> bool {
        self.kind(id) == ClassKind::Absorbing
    }

    /// Returns the number of classes.
    pub fn n_classes(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if there is exactly one class.
    pub fn is_irreducible(&self) -> bool {
        self.kinds.len() == 1
    }

    /// Returns a copy with redundant links removed.
    ///
    /// Classification is unchanged: it always reflects the full link set.
    pub fn reduced(&self) -> Self {
        Self {
            links: transitive_reduction(&self.links),
            kinds: self.kinds.clone(),
        }
    }
}

/// Removes every link `(i, k)` for which `(i, j)` and `(j, k)` both exist.
///
/// Witnesses are looked up in the input snapshot, never in the partially
/// filtered output, so the surviving set does not depend on link order.
/// Surviving links keep their input order.
pub fn transitive_reduction(links: &[ClassLink]) -> Vec<ClassLink> {
    let snapshot: HashSet<(ClassId, ClassId)> = links.iter().map(|l| (l.from, l.to)).collect();
    links
        .iter()
        .filter(|ik| {
            !links.iter().any(|ij| {
                ij.from == ik.from
                    && ij.to != ik.to
                    && ij.to != ik.from
                    && snapshot.contains(&(ij.to, ik.to))
            })
        })
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EdgeSpec;
    use crate::scc::decompose;

    fn graph(n: usize, edges: &[(usize, usize, f64)]) -> Graph {
        Graph::build(n, edges.iter().map(|&(f, t, p)| EdgeSpec::new(f, t, p))).0
    }

    fn link(from: usize, to: usize) -> ClassLink {
        ClassLink {
            from: ClassId(from),
            to: ClassId(to),
        }
    }

    #[test]
    fn link_display() {
        assert_eq!(link(0, 2).to_string(), "C1 -> C3");
    }

    #[test]
    fn transient_into_absorbing() {
        let g = graph(2, &[(1, 2, 1.0), (2, 2, 1.0)]);
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);

        let c1 = p.class_of(1);
        let c2 = p.class_of(2);
        assert_eq!(cg.links(), &[ClassLink { from: c1, to: c2 }]);
        assert_eq!(cg.kind(c1), ClassKind::Transient);
        assert_eq!(cg.kind(c2), ClassKind::Absorbing);
        assert!(cg.is_persistent(c2));
        assert!(!cg.is_irreducible());
    }

    #[test]
    fn links_are_deduplicated() {
        // Both 1 and 2 feed into 3; {1,2} is one class.
        let g = graph(
            3,
            &[(1, 2, 0.5), (1, 3, 0.5), (2, 1, 0.5), (2, 3, 0.5), (3, 3, 1.0)],
        );
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        assert_eq!(cg.links().len(), 1);
    }

    #[test]
    fn persistent_multi_vertex_class() {
        let g = graph(3, &[(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0)]);
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        assert!(cg.links().is_empty());
        assert!(cg.is_irreducible());
        assert_eq!(cg.kind(ClassId(0)), ClassKind::Persistent);
        assert!(!cg.is_absorbing(ClassId(0)));
    }

    #[test]
    fn reduction_removes_shortcut() {
        let links = vec![link(0, 1), link(1, 2), link(0, 2)];
        assert_eq!(transitive_reduction(&links), vec![link(0, 1), link(1, 2)]);
    }

    #[test]
    fn reduction_keeps_long_shortcut() {
        // 0->1->2->3 plus 0->3: no two-hop witness for 0->3.
        let links = vec![link(0, 1), link(1, 2), link(2, 3), link(0, 3)];
        assert_eq!(transitive_reduction(&links).len(), 4);
    }

    #[test]
    fn reduction_uses_snapshot() {
        // 0->1, 1->2, 2->3, 0->2, 1->3, 0->3.
        // 0->2 (via 1), 1->3 (via 2) and 0->3 (via 1 or 2) all go, even though
        // the witnesses for 0->3 are themselves removed.
        let links = vec![
            link(0, 1),
            link(1, 2),
            link(2, 3),
            link(0, 2),
            link(1, 3),
            link(0, 3),
        ];
        assert_eq!(
            transitive_reduction(&links),
            vec![link(0, 1), link(1, 2), link(2, 3)]
        );
    }

    #[test]
    fn reduced_keeps_classification() {
        let g = graph(
            3,
            &[(1, 2, 0.5), (1, 3, 0.5), (2, 3, 1.0), (3, 3, 1.0)],
        );
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        let reduced = cg.reduced();
        assert_eq!(cg.links().len(), 3);
        assert_eq!(reduced.links().len(), 2);
        assert_eq!(reduced.kinds(), cg.kinds());
    }

    #[test]
    fn reduction_of_empty() {
        assert!(transitive_reduction(&[]).is_empty());
    }
}
