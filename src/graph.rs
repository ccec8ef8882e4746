use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    User,
    Topic,
    Cluster,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::User => "user",
            NodeKind::Topic => "topic",
            NodeKind::Cluster => "cluster",
        }
    }
}

/// Outgoing edge, stored on its source node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub target: String,
    pub operation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(name: &str, kind: NodeKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            edges: Vec::new(),
        }
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }
}

/// Name-addressed arena of nodes. Build-only: nodes are never removed.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `node`, replacing any node already stored under its name.
    pub fn add_node(&mut self, node: Node) {
        debug_assert!(!node.name.is_empty(), "node name must not be empty");
        match self.index.get(&node.name).copied() {
            Some(i) => self.nodes[i] = node,
            None => {
                self.index.insert(node.name.clone(), self.nodes.len());
                self.nodes.push(node);
            }
        }
    }

    /// Returns the node called `name`, creating it with `kind` on first sight.
    /// An existing node keeps its original kind.
    pub fn get_or_insert(&mut self, name: &str, kind: NodeKind) -> &mut Node {
        let i = match self.index.get(name).copied() {
            Some(i) => i,
            None => {
                self.index.insert(name.to_string(), self.nodes.len());
                self.nodes.push(Node::new(name, kind));
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[i]
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.index.get(name).map(|&i| &mut self.nodes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }
}

/// Graphs compare by node content, independent of insertion order.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .nodes
                .iter()
                .all(|n| other.node(&n.name).is_some_and(|o| o == n))
    }
}
