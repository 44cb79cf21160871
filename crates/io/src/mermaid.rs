//! Mermaid flowchart rendering for graphs and class diagrams.

use std::fmt::Write;

use kolmo_graph::{ClassLink, Graph, Partition};

/// Front-matter options shared by every diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramStyle {
    layout: String,
    theme: String,
    look: String,
}

impl Default for DiagramStyle {
    fn default() -> Self {
        Self {
            layout: "elk".into(),
            theme: "neo".into(),
            look: "neo".into(),
        }
    }
}

impl DiagramStyle {
    /// Set the layout engine.
    pub fn with_layout(mut self, layout: impl Into<String>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the look.
    pub fn with_look(mut self, look: impl Into<String>) -> Self {
        self.look = look.into();
        self
    }

    fn front_matter(&self) -> String {
        format!(
            "---\nconfig:\n  layout: {}\n  theme: {}\n  look: {}\n---\n\n",
            self.layout, self.theme, self.look
        )
    }
}

/// Alphabetic node id for vertex `v`: `1 -> A`, `26 -> Z`, `27 -> AA`.
///
/// Returns an empty string for `0`.
pub fn vertex_label(v: usize) -> String {
    let mut letters = Vec::new();
    let mut rest = v;
    while rest > 0 {
        let digit = (rest - 1) % 26;
        letters.push(char::from(b'A' + digit as u8));
        rest = (rest - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Renders the transition graph as a left-to-right flowchart.
pub fn render_graph(graph: &Graph, style: &DiagramStyle) -> String {
    let mut out = style.front_matter();
    out.push_str("flowchart LR\n");
    for v in 1..=graph.n_vertices() {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}(({v}))", vertex_label(v));
    }
    out.push('\n');
    for v in 1..=graph.n_vertices() {
        let from = vertex_label(v);
        for e in graph.edges(v) {
            let _ = writeln!(out, "{from} -->|{:.2}|{}", e.probability, vertex_label(e.to));
        }
    }
    out
}

/// Renders the class diagram as a top-down flowchart.
pub fn render_class_diagram(
    partition: &Partition,
    links: &[ClassLink],
    style: &DiagramStyle,
) -> String {
    let mut out = style.front_matter();
    out.push_str("flowchart TD\n");
    for class in partition.classes() {
        let members: Vec<String> = class.vertices().iter().map(usize::to_string).collect();
        let name = class.name();
        let _ = writeln!(out, "{name}[\"{name}: {{{}}}\"]", members.join(","));
    }
    out.push('\n');
    for link in links {
        let _ = writeln!(out, "{} --> {}", link.from, link.to);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kolmo_graph::{ClassGraph, EdgeSpec, decompose};

    #[test]
    fn labels() {
        assert_eq!(vertex_label(0), "");
        assert_eq!(vertex_label(1), "A");
        assert_eq!(vertex_label(26), "Z");
        assert_eq!(vertex_label(27), "AA");
        assert_eq!(vertex_label(52), "AZ");
        assert_eq!(vertex_label(53), "BA");
        assert_eq!(vertex_label(702), "ZZ");
        assert_eq!(vertex_label(703), "AAA");
    }

    #[test]
    fn graph_diagram_layout() {
        let (g, _) = Graph::build(2, [EdgeSpec::new(1, 2, 0.5), EdgeSpec::new(1, 1, 0.5), EdgeSpec::new(2, 2, 1.0)]);
        let text = render_graph(&g, &DiagramStyle::default());
        let expected = "---\nconfig:\n  layout: elk\n  theme: neo\n  look: neo\n---\n\n\
                        flowchart LR\nA((1))\nB((2))\n\n\
                        A -->|0.50|A\nA -->|0.50|B\nB -->|1.00|B\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn class_diagram_layout() {
        let (g, _) = Graph::build(2, [EdgeSpec::new(1, 2, 1.0), EdgeSpec::new(2, 2, 1.0)]);
        let p = decompose(&g);
        let cg = ClassGraph::derive(&g, &p);
        let style = DiagramStyle::default().with_layout("dagre").with_theme("forest");
        let text = render_class_diagram(&p, cg.links(), &style);
        assert!(text.starts_with("---\nconfig:\n  layout: dagre\n  theme: forest\n  look: neo\n"));
        assert!(text.contains("flowchart TD\nC1[\"C1: {2}\"]\nC2[\"C2: {1}\"]\n\nC2 --> C1\n"));
    }

    #[test]
    fn multi_member_class_label() {
        let (g, _) = Graph::build(
            3,
            [EdgeSpec::new(1, 2, 1.0), EdgeSpec::new(2, 3, 1.0), EdgeSpec::new(3, 1, 1.0)],
        );
        let p = decompose(&g);
        let text = render_class_diagram(&p, &[], &DiagramStyle::default());
        assert!(text.contains("C1[\"C1: {3,2,1}\"]\n"));
    }
}
