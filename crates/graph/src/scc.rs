//! Tarjan decomposition of a [`Graph`] into communicating classes.
//!
//! The traversal runs on an explicit frame stack instead of the call
//! stack, so arbitrarily deep chains cannot overflow. Each frame keeps the
//! position of its vertex's edge cursor; resuming a frame after a child
//! finishes folds the child's low-link into the parent, exactly as the
//! recursive formulation does on return.

use std::fmt;

use tracing::{debug, instrument};

use crate::model::Graph;

/// Zero-based index of a class within a [`Partition`].
///
/// Displays as the class name, `C1` for index 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId(pub usize);

impl ClassId {
    /// Returns the zero-based index.
    pub fn index(self) -> usize {
        self.0
    }

    /// Returns the class name (`C1`, `C2`, ...).
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0 + 1)
    }
}

/// One strongly connected component.
///
/// Vertices are kept in the order they were popped off the Tarjan stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    id: ClassId,
    vertices: Vec<usize>,
}

impl Class {
    /// Creates a class from its id and member vertices.
    pub fn new(id: ClassId, vertices: Vec<usize>) -> Self {
        Self { id, vertices }
    }

    /// Returns the class id.
    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Returns the class name.
    pub fn name(&self) -> String {
        self.id.name()
    }

    /// Returns the member vertices (1-based ids).
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    /// Returns the number of member vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns `true` if the class has no members.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns `true` if `v` belongs to this class.
    pub fn contains(&self, v: usize) -> bool {
        self.vertices.contains(&v)
    }
}

/// Ordered classes covering every vertex of a graph exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    classes: Vec<Class>,
    /// `class_of[v - 1]` is the class of vertex `v`.
    class_of: Vec<ClassId>,
}

impl Partition {
    /// Builds a partition from member lists, numbering classes in order.
    ///
    /// # Panics
    ///
    /// Panics if the lists do not cover `1..=n_vertices` exactly once.
    pub fn from_classes(n_vertices: usize, members: Vec<Vec<usize>>) -> Self {
        let mut class_of = vec![None; n_vertices];
        let classes: Vec<Class> = members
            .into_iter()
            .enumerate()
            .map(|(i, vertices)| {
                assert!(!vertices.is_empty(), "class {i} is empty");
                for &v in &vertices {
                    assert!(
                        (1..=n_vertices).contains(&v),
                        "vertex {v} outside 1..={n_vertices}"
                    );
                    assert!(class_of[v - 1].is_none(), "vertex {v} in two classes");
                    class_of[v - 1] = Some(ClassId(i));
                }
                Class::new(ClassId(i), vertices)
            })
            .collect();
        let class_of = class_of
            .into_iter()
            .enumerate()
            .map(|(i, c)| c.unwrap_or_else(|| panic!("vertex {} not covered", i + 1)))
            .collect();
        Self { classes, class_of }
    }

    /// Returns all classes in discovery order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Returns the class with the given id, if any.
    pub fn get(&self, id: ClassId) -> Option<&Class> {
        self.classes.get(id.0)
    }

    /// Returns the number of classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if there are no classes (empty graph).
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Returns the number of vertices covered.
    pub fn n_vertices(&self) -> usize {
        self.class_of.len()
    }

    /// Returns the class containing vertex `v`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not in `1..=n`.
    pub fn class_of(&self, v: usize) -> ClassId {
        self.class_of[v - 1]
    }

    /// Returns `true` if the chain has a single communicating class.
    pub fn is_irreducible(&self) -> bool {
        self.classes.len() == 1
    }
}

/// Per-vertex traversal state.
#[derive(Debug, Clone, Copy, Default)]
struct VertexState {
    num: Option<usize>,
    low: usize,
    on_stack: bool,
}

/// A suspended visit of one vertex.
struct Frame {
    vertex: usize,
    /// Outgoing destinations in enumeration order.
    successors: Vec<usize>,
    cursor: usize,
}

/// Decomposes `graph` into strongly connected components.
///
/// Roots are tried in ascending vertex order and classes are numbered in
/// the order they complete, so the result is fully determined by the
/// graph's edge enumeration order.
#[instrument(skip(graph), fields(n = graph.n_vertices()))]
pub fn decompose(graph: &Graph) -> Partition {
    let n = graph.n_vertices();
    let mut state = vec![VertexState::default(); n];
    let mut tarjan_stack: Vec<usize> = Vec::new();
    let mut frames: Vec<Frame> = Vec::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    let mut counter = 0usize;

    let mut enter = |v: usize, state: &mut [VertexState], tarjan_stack: &mut Vec<usize>| {
        let s = &mut state[v - 1];
        s.num = Some(counter);
        s.low = counter;
        s.on_stack = true;
        counter += 1;
        tarjan_stack.push(v);
        Frame {
            vertex: v,
            successors: graph.edges(v).map(|e| e.to).collect(),
            cursor: 0,
        }
    };

    for root in 1..=n {
        if state[root - 1].num.is_some() {
            continue;
        }
        let frame = enter(root, &mut state, &mut tarjan_stack);
        frames.push(frame);

        while let Some(top) = frames.last_mut() {
            let v = top.vertex;
            if let Some(&w) = top.successors.get(top.cursor) {
                top.cursor += 1;
                match state[w - 1].num {
                    None => {
                        let child = enter(w, &mut state, &mut tarjan_stack);
                        frames.push(child);
                    }
                    Some(w_num) if state[w - 1].on_stack => {
                        state[v - 1].low = state[v - 1].low.min(w_num);
                    }
                    Some(_) => {}
                }
                continue;
            }

            // All successors done.
            frames.pop();
            let v_state = state[v - 1];
            if Some(v_state.low) == v_state.num {
                let mut class = Vec::new();
                while let Some(w) = tarjan_stack.pop() {
                    state[w - 1].on_stack = false;
                    class.push(w);
                    if w == v {
                        break;
                    }
                }
                debug!(class = members.len() + 1, size = class.len(), "class closed");
                members.push(class);
            }
            if let Some(parent) = frames.last() {
                let p = parent.vertex;
                state[p - 1].low = state[p - 1].low.min(v_state.low);
            }
        }
    }

    Partition::from_classes(n, members)
}
