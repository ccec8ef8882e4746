//! Typed ACL entries as listed by the cluster.

use serde::{Deserialize, Serialize};

const USER_PREFIX: &str = "User:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Topic,
    Cluster,
    ConsumerGroup,
    /// Transactional ids, delegation tokens and anything newer brokers add.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Read,
    Write,
    Describe,
    Alter,
    All,
    Any,
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PermissionType {
    Allow,
    Deny,
    Any,
}

/// One grant or deny statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AclRecord {
    pub principal: String,
    pub resource_name: String,
    pub resource_type: ResourceType,
    pub operation: Operation,
    pub permission: PermissionType,
    #[serde(default = "wildcard")]
    pub host: String,
    #[serde(default = "literal")]
    pub pattern_type: String,
}

fn wildcard() -> String {
    "*".to_string()
}

fn literal() -> String {
    "LITERAL".to_string()
}

impl AclRecord {
    pub fn new(
        principal: &str,
        resource_name: &str,
        resource_type: ResourceType,
        operation: Operation,
        permission: PermissionType,
    ) -> Self {
        Self {
            principal: principal.to_string(),
            resource_name: resource_name.to_string(),
            resource_type,
            operation,
            permission,
            host: wildcard(),
            pattern_type: literal(),
        }
    }

    /// The principal with its `User:` prefix removed.
    pub fn user(&self) -> &str {
        strip_user_prefix(&self.principal)
    }
}

pub fn strip_user_prefix(principal: &str) -> &str {
    principal.strip_prefix(USER_PREFIX).unwrap_or(principal)
}

fn normalize(s: &str) -> String {
    s.trim().replace(['_', '-', ' '], "").to_ascii_lowercase()
}

impl ResourceType {
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "topic" => ResourceType::Topic,
            "cluster" => ResourceType::Cluster,
            "group" | "consumergroup" => ResourceType::ConsumerGroup,
            _ => ResourceType::Other(s.trim().to_string()),
        }
    }
}

impl Operation {
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "read" => Operation::Read,
            "write" => Operation::Write,
            "describe" => Operation::Describe,
            "alter" => Operation::Alter,
            "all" => Operation::All,
            "any" => Operation::Any,
            _ => Operation::Other(s.trim().to_string()),
        }
    }

    /// Edge label for operations that can become an edge.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Operation::Read => Some("Read"),
            Operation::Write => Some("Write"),
            Operation::Describe => Some("Describe"),
            Operation::Alter => Some("Alter"),
            _ => None,
        }
    }
}

impl PermissionType {
    /// Unknown permission values are treated as `Any`, which never yields an edge.
    pub fn parse(s: &str) -> Self {
        match normalize(s).as_str() {
            "allow" => PermissionType::Allow,
            "deny" => PermissionType::Deny,
            _ => PermissionType::Any,
        }
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceType::Topic => write!(f, "Topic"),
            ResourceType::Cluster => write!(f, "Cluster"),
            ResourceType::ConsumerGroup => write!(f, "Group"),
            ResourceType::Other(s) => write!(f, "{s}"),
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::All => write!(f, "All"),
            Operation::Any => write!(f, "Any"),
            Operation::Other(s) => write!(f, "{s}"),
            op => write!(f, "{}", op.label().unwrap_or_default()),
        }
    }
}

impl std::fmt::Display for PermissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionType::Allow => write!(f, "Allow"),
            PermissionType::Deny => write!(f, "Deny"),
            PermissionType::Any => write!(f, "Any"),
        }
    }
}

impl From<String> for ResourceType {
    fn from(s: String) -> Self {
        ResourceType::parse(&s)
    }
}

impl From<ResourceType> for String {
    fn from(t: ResourceType) -> Self {
        t.to_string()
    }
}

impl From<String> for Operation {
    fn from(s: String) -> Self {
        Operation::parse(&s)
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        op.to_string()
    }
}

impl From<String> for PermissionType {
    fn from(s: String) -> Self {
        PermissionType::parse(&s)
    }
}

impl From<PermissionType> for String {
    fn from(p: PermissionType) -> Self {
        p.to_string()
    }
}
