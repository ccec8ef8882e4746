use std::collections::HashSet;

use acl_viewer::acl::{AclRecord, Operation, PermissionType, ResourceType};
use acl_viewer::graph::{Edge, Graph, Node, NodeKind};
use acl_viewer::transform::build_graph;
use acl_viewer::visjs::{Color, DisplayEdge, DisplayNode, Network, create_network};
use pretty_assertions::assert_eq;

fn graph(nodes: Vec<Node>) -> Graph {
    let mut g = Graph::new();
    for n in nodes {
        g.add_node(n);
    }
    g
}

fn with_edge(mut node: Node, target: &str, op: &str) -> Node {
    node.add_edge(Edge {
        target: target.to_string(),
        operation: op.to_string(),
    });
    node
}

fn display_edge(from: &str, to: &str, title: &str) -> DisplayEdge {
    DisplayEdge {
        from: from.to_string(),
        to: to.to_string(),
        arrows: "to".to_string(),
        dashes: false,
        title: title.to_string(),
    }
}

fn assert_closed(network: &Network) {
    let ids: HashSet<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
    for e in &network.edges {
        assert!(ids.contains(e.from.as_str()), "dangling from {}", e.from);
        assert!(ids.contains(e.to.as_str()), "dangling to {}", e.to);
    }
}

// =============================================================================
// Nodes
// =============================================================================

#[test]
fn spec_single_user_node() {
    let g = graph(vec![Node::new("bob", NodeKind::User)]);
    let network = create_network(&g);
    assert_eq!(
        network.nodes,
        vec![DisplayNode {
            id: "bob".to_string(),
            label: "🤖 bob".to_string(),
            shape: "box".to_string(),
            color: Color::new("#6ef091", "#ccffda"),
            kind: "user".to_string(),
        }]
    );
    assert!(network.edges.is_empty());
}

#[test]
fn spec_topic_and_cluster_are_neutral() {
    let g = graph(vec![
        Node::new("orders", NodeKind::Topic),
        Node::new("Kafka Cluster", NodeKind::Cluster),
    ]);
    let network = create_network(&g);
    assert_eq!(
        network.nodes,
        vec![
            DisplayNode {
                id: "Kafka Cluster".to_string(),
                label: "🗄 Kafka Cluster".to_string(),
                shape: "box".to_string(),
                color: Color::neutral(),
                kind: "cluster".to_string(),
            },
            DisplayNode {
                id: "orders".to_string(),
                label: "🗒 orders".to_string(),
                shape: "box".to_string(),
                color: Color::neutral(),
                kind: "topic".to_string(),
            },
        ]
    );
}

#[test]
fn spec_nodes_sorted_by_name() {
    let g = graph(vec![
        Node::new("zeta", NodeKind::Topic),
        Node::new("alpha", NodeKind::User),
        Node::new("mid", NodeKind::Topic),
    ]);
    let ids: Vec<String> = create_network(&g).nodes.into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
}

// =============================================================================
// Edges
// =============================================================================

#[test]
fn spec_basic_read_edge() {
    let g = graph(vec![
        Node::new("user-1", NodeKind::User),
        with_edge(Node::new("topic-1", NodeKind::Topic), "user-1", "Read"),
    ]);
    let network = create_network(&g);
    assert_eq!(network.edges, vec![display_edge("topic-1", "user-1", "Read")]);
}

#[test]
fn spec_cluster_describe_edge() {
    let g = graph(vec![
        Node::new("user-1", NodeKind::User),
        with_edge(
            Node::new("Kafka Cluster", NodeKind::Cluster),
            "user-1",
            "Describe",
        ),
    ]);
    let network = create_network(&g);
    assert_eq!(
        network.edges,
        vec![display_edge("Kafka Cluster", "user-1", "Describe")]
    );
}

#[test]
fn spec_edges_keep_insertion_order_within_node() {
    let node = with_edge(
        with_edge(Node::new("orders", NodeKind::Topic), "b", "Read"),
        "a",
        "Read",
    );
    let g = graph(vec![
        node,
        Node::new("a", NodeKind::User),
        Node::new("b", NodeKind::User),
    ]);
    let network = create_network(&g);
    assert_eq!(
        network.edges,
        vec![
            display_edge("orders", "b", "Read"),
            display_edge("orders", "a", "Read"),
        ]
    );
}

#[test]
fn spec_empty_graph() {
    assert_eq!(create_network(&Graph::new()), Network::default());
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn spec_referential_closure() {
    let records = vec![
        AclRecord::new(
            "User:alice",
            "orders",
            ResourceType::Topic,
            Operation::Any,
            PermissionType::Allow,
        ),
        AclRecord::new(
            "User:bob",
            "*",
            ResourceType::Cluster,
            Operation::Alter,
            PermissionType::Allow,
        ),
        AclRecord::new(
            "User:carol",
            "billing",
            ResourceType::Topic,
            Operation::Write,
            PermissionType::Allow,
        ),
        AclRecord::new(
            "User:dave",
            "grp",
            ResourceType::ConsumerGroup,
            Operation::Read,
            PermissionType::Allow,
        ),
    ];
    let network = create_network(&build_graph(&records));
    assert_closed(&network);
    assert_eq!(network.nodes.len(), 6);
    assert_eq!(network.edges.len(), 4);
}

#[test]
fn spec_projection_is_deterministic() {
    let records: Vec<AclRecord> = ["a", "b", "c", "d"]
        .iter()
        .flat_map(|user| {
            ["t1", "t2"].iter().map(move |topic| {
                AclRecord::new(
                    &format!("User:{user}"),
                    topic,
                    ResourceType::Topic,
                    Operation::Read,
                    PermissionType::Allow,
                )
            })
        })
        .collect();
    let first = create_network(&build_graph(&records));
    let second = create_network(&build_graph(&records));
    assert_eq!(first, second);
}

#[test]
fn spec_json_shape() {
    let g = graph(vec![
        Node::new("alice", NodeKind::User),
        with_edge(Node::new("orders", NodeKind::Topic), "alice", "Read"),
    ]);
    let json = serde_json::to_value(create_network(&g)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "nodes": [
                {
                    "id": "alice",
                    "label": "🤖 alice",
                    "shape": "box",
                    "color": {"background": "#6ef091", "highlight": {"background": "#ccffda"}},
                    "type": "user"
                },
                {
                    "id": "orders",
                    "label": "🗒 orders",
                    "shape": "box",
                    "color": {"background": "", "highlight": {"background": ""}},
                    "type": "topic"
                }
            ],
            "edges": [
                {"from": "orders", "to": "alice", "arrows": "to", "dashes": false, "title": "Read"}
            ]
        })
    );
}
