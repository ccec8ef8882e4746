//! Projection of an access graph into vis.js network data.

use serde::Serialize;

use crate::graph::{Graph, NodeKind};

pub const SHAPE_BOX: &str = "box";
pub const ARROWS_TO: &str = "to";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Color {
    pub background: String,
    pub highlight: Highlight,
}

impl Color {
    pub fn new(background: &str, highlight: &str) -> Self {
        Self {
            background: background.to_string(),
            highlight: Highlight {
                background: highlight.to_string(),
            },
        }
    }

    /// Empty colors leave the front end's defaults in place.
    pub fn neutral() -> Self {
        Self::new("", "")
    }

    pub fn green() -> Self {
        Self::new("#6ef091", "#ccffda")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayNode {
    pub id: String,
    pub label: String,
    pub shape: String,
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayEdge {
    pub from: String,
    pub to: String,
    pub arrows: String,
    pub dashes: bool,
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Network {
    pub nodes: Vec<DisplayNode>,
    pub edges: Vec<DisplayEdge>,
}

pub fn label_prefix(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::User => "🤖 ",
        NodeKind::Topic => "🗒 ",
        NodeKind::Cluster => "🗄 ",
    }
}

fn color(kind: NodeKind) -> Color {
    match kind {
        NodeKind::User => Color::green(),
        NodeKind::Topic | NodeKind::Cluster => Color::neutral(),
    }
}

/// Renders every node and edge of `graph`, sorted by node name.
pub fn create_network(graph: &Graph) -> Network {
    let mut sorted: Vec<_> = graph.nodes().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut network = Network::default();
    for node in sorted {
        network.nodes.push(DisplayNode {
            id: node.name.clone(),
            label: format!("{}{}", label_prefix(node.kind), node.name),
            shape: SHAPE_BOX.to_string(),
            color: color(node.kind),
            kind: node.kind.as_str().to_string(),
        });

        for edge in &node.edges {
            debug_assert!(
                graph.contains(&edge.target),
                "edge {} -> {} points outside the graph",
                node.name,
                edge.target
            );
            network.edges.push(DisplayEdge {
                from: node.name.clone(),
                to: edge.target.clone(),
                arrows: ARROWS_TO.to_string(),
                dashes: false,
                title: edge.operation.clone(),
            });
        }
    }
    network
}

/// Serializes `value` so it can be pasted verbatim inside a `<script>` element.
pub fn to_embeddable_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(escape_script(&json))
}

fn escape_script(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}
