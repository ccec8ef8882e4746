//! ACL records to access graph.
//!
//! Edges follow the data: a topic a principal may read points at the
//! principal, a principal that may write points at the topic. Cluster
//! `Describe` and `Alter` grants follow the same convention.

use std::collections::BTreeSet;

use crate::acl::{AclRecord, Operation, PermissionType, ResourceType};
use crate::graph::{Edge, Graph, NodeKind};

/// Every cluster resource collapses into this single node.
pub const CLUSTER_NODE: &str = "Kafka Cluster";

#[derive(Debug, Clone, Copy, PartialEq)]
enum Flow {
    /// resource -> principal
    ToPrincipal(&'static str),
    /// principal -> resource
    FromPrincipal(&'static str),
}

pub fn build_graph(records: &[AclRecord]) -> Graph {
    let mut graph = Graph::new();
    for record in records {
        apply(&mut graph, record);
    }
    graph
}

/// Like [`build_graph`], plus a node for every listed topic nobody holds ACLs on.
pub fn build_graph_with_topics(records: &[AclRecord], topics: &BTreeSet<String>) -> Graph {
    let mut graph = build_graph(records);
    for topic in topics.iter().filter(|t| !t.is_empty()) {
        graph.get_or_insert(topic, NodeKind::Topic);
    }
    graph
}

fn resource(record: &AclRecord) -> Option<(&str, NodeKind)> {
    match record.resource_type {
        ResourceType::Topic if !record.resource_name.is_empty() => {
            Some((record.resource_name.as_str(), NodeKind::Topic))
        }
        ResourceType::Cluster => Some((CLUSTER_NODE, NodeKind::Cluster)),
        _ => None,
    }
}

fn flows(kind: NodeKind, operation: &Operation) -> &'static [Flow] {
    match (kind, operation) {
        (NodeKind::Cluster, Operation::Describe) => &[Flow::ToPrincipal("Describe")],
        (NodeKind::Cluster, Operation::Alter) => &[Flow::FromPrincipal("Alter")],
        (NodeKind::Topic, Operation::Read) => &[Flow::ToPrincipal("Read")],
        (NodeKind::Topic, Operation::Write) => &[Flow::FromPrincipal("Write")],
        // `Any` reads as "everything on this topic"; `All` is left out.
        (NodeKind::Topic, Operation::Any) => {
            &[Flow::ToPrincipal("Read"), Flow::FromPrincipal("Write")]
        }
        _ => &[],
    }
}

fn apply(graph: &mut Graph, record: &AclRecord) {
    let Some((resource, kind)) = resource(record) else {
        return;
    };
    let user = record.user();
    if user.is_empty() {
        tracing::debug!(principal = %record.principal, "skipping ACL without principal");
        return;
    }

    graph.get_or_insert(resource, kind);
    graph.get_or_insert(user, NodeKind::User);

    if record.permission != PermissionType::Allow {
        return;
    }

    for flow in flows(kind, &record.operation) {
        let (source, target, label) = match *flow {
            Flow::ToPrincipal(label) => (resource, user, label),
            Flow::FromPrincipal(label) => (user, resource, label),
        };
        if let Some(node) = graph.node_mut(source) {
            node.add_edge(Edge {
                target: target.to_string(),
                operation: label.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(user: &str, resource: &str, rt: ResourceType, op: Operation) -> AclRecord {
        AclRecord::new(user, resource, rt, op, PermissionType::Allow)
    }

    #[test]
    fn flows_table() {
        assert_eq!(
            flows(NodeKind::Topic, &Operation::Any),
            &[Flow::ToPrincipal("Read"), Flow::FromPrincipal("Write")]
        );
        assert!(flows(NodeKind::Topic, &Operation::All).is_empty());
        assert!(flows(NodeKind::Topic, &Operation::Describe).is_empty());
        assert!(flows(NodeKind::Cluster, &Operation::Read).is_empty());
        assert!(flows(NodeKind::Cluster, &Operation::Any).is_empty());
    }

    #[test]
    fn cluster_resource_name_is_ignored() {
        let g = build_graph(&[
            allow("User:a", "*", ResourceType::Cluster, Operation::Describe),
            allow("User:b", "kafka-cluster", ResourceType::Cluster, Operation::Describe),
        ]);
        assert_eq!(g.len(), 3);
        assert_eq!(g.node(CLUSTER_NODE).unwrap().edges.len(), 2);
    }

    #[test]
    fn empty_principal_is_skipped() {
        let g = build_graph(&[allow("User:", "orders", ResourceType::Topic, Operation::Read)]);
        assert!(g.is_empty());
    }

    #[test]
    fn unknown_resource_type_is_skipped() {
        let g = build_graph(&[allow(
            "User:a",
            "tx-1",
            ResourceType::Other("TRANSACTIONAL_ID".into()),
            Operation::Write,
        )]);
        assert!(g.is_empty());
    }

    #[test]
    fn listed_topics_without_acls_become_nodes() {
        let topics: BTreeSet<String> = ["orders", "audit"].iter().map(|s| s.to_string()).collect();
        let g = build_graph_with_topics(
            &[allow("User:a", "orders", ResourceType::Topic, Operation::Read)],
            &topics,
        );
        assert_eq!(g.len(), 3);
        assert_eq!(g.node("audit").unwrap().kind, NodeKind::Topic);
        assert_eq!(g.node("orders").unwrap().edges.len(), 1);
    }
}
