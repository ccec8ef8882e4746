use std::collections::BTreeSet;

use winnow::combinator::{alt, opt};
use winnow::prelude::*;
use winnow::token::{take_until, take_while};

use crate::acl::{AclRecord, Operation, PermissionType, ResourceType};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
struct ResourcePattern {
    resource_type: ResourceType,
    name: String,
    pattern_type: String,
}

#[derive(Debug, Clone, PartialEq)]
struct AclEntry {
    principal: String,
    host: String,
    operation: Operation,
    permission: PermissionType,
}

#[derive(Debug)]
enum ListingLine {
    Resource(ResourcePattern),
    Entry(AclEntry),
    /// Legacy entries list several operations on one line.
    Entries(Vec<AclEntry>),
}

/// Parses the output of `kafka-acls --list`.
///
/// Both the `ResourcePattern(...)` format and the older
/// `` `Topic:LITERAL:name` `` / `has Allow permission for operations` format
/// are accepted. Lines that are neither a resource header nor an ACL entry
/// are skipped, as are entries that appear before any header.
pub fn parse_acl_listing(input: &str) -> Result<Vec<AclRecord>> {
    let mut records = Vec::new();
    let mut current: Option<ResourcePattern> = None;

    for (i, raw) in input.lines().enumerate() {
        let mut line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let parsed = match listing_line(&mut line) {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::debug!(line = i + 1, text = raw, "ignoring line in ACL listing");
                continue;
            }
        };

        let entries = match parsed {
            ListingLine::Resource(pattern) => {
                current = Some(pattern);
                continue;
            }
            ListingLine::Entry(entry) => vec![entry],
            ListingLine::Entries(entries) => entries,
        };

        let Some(resource) = &current else {
            tracing::debug!(line = i + 1, text = raw, "ignoring ACL entry before any resource header");
            continue;
        };
        records.extend(entries.into_iter().map(|entry| AclRecord {
            principal: entry.principal,
            resource_name: resource.name.clone(),
            resource_type: resource.resource_type.clone(),
            operation: entry.operation,
            permission: entry.permission,
            host: entry.host,
            pattern_type: resource.pattern_type.clone(),
        }));
    }

    Ok(records)
}

/// Parses `kafka-topics --list` output: one topic per line, `#` comments allowed.
pub fn parse_topic_list(input: &str) -> BTreeSet<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn listing_line(input: &mut &str) -> winnow::Result<ListingLine> {
    alt((
        resource_header.map(ListingLine::Resource),
        acl_entry.map(ListingLine::Entry),
        legacy_acl_entries.map(ListingLine::Entries),
    ))
    .parse_next(input)
}

fn resource_header(input: &mut &str) -> winnow::Result<ResourcePattern> {
    opt(alt(("Current ", "Adding ", "Removing "))).parse_next(input)?;
    "ACLs for resource `".parse_next(input)?;
    let pattern = alt((resource_pattern, legacy_resource_pattern)).parse_next(input)?;
    "`".parse_next(input)?;
    opt(":").parse_next(input)?;
    Ok(pattern)
}

/// `ResourcePattern(resourceType=TOPIC, name=orders, patternType=LITERAL)`
fn resource_pattern(input: &mut &str) -> winnow::Result<ResourcePattern> {
    "ResourcePattern(resourceType=".parse_next(input)?;
    let resource_type = take_until(1.., ", name=").parse_next(input)?;
    ", name=".parse_next(input)?;
    let name = take_until(0.., ", patternType=").parse_next(input)?;
    ", patternType=".parse_next(input)?;
    let pattern_type = take_while(1.., |c: char| c != ')').parse_next(input)?;
    ")".parse_next(input)?;
    Ok(ResourcePattern {
        resource_type: ResourceType::parse(resource_type),
        name: name.to_string(),
        pattern_type: pattern_type.to_string(),
    })
}

/// `Topic:LITERAL:orders` or `Topic:orders`
fn legacy_resource_pattern(input: &mut &str) -> winnow::Result<ResourcePattern> {
    let resource_type = take_while(1.., |c: char| c.is_ascii_alphabetic()).parse_next(input)?;
    ":".parse_next(input)?;
    let rest = take_while(1.., |c: char| c != '`').parse_next(input)?;
    let (pattern_type, name) = match rest.split_once(':') {
        Some((pattern, name)) if matches!(pattern, "LITERAL" | "PREFIXED" | "MATCH") => {
            (pattern, name)
        }
        _ => ("LITERAL", rest),
    };
    Ok(ResourcePattern {
        resource_type: ResourceType::parse(resource_type),
        name: name.to_string(),
        pattern_type: pattern_type.to_string(),
    })
}

/// `(principal=User:alice, host=*, operation=READ, permissionType=ALLOW)`
fn acl_entry(input: &mut &str) -> winnow::Result<AclEntry> {
    "(principal=".parse_next(input)?;
    let principal = take_until(1.., ", host=").parse_next(input)?;
    ", host=".parse_next(input)?;
    let host = take_until(0.., ", operation=").parse_next(input)?;
    ", operation=".parse_next(input)?;
    let operation = take_until(1.., ", permissionType=").parse_next(input)?;
    ", permissionType=".parse_next(input)?;
    let permission = take_while(1.., |c: char| c != ')').parse_next(input)?;
    ")".parse_next(input)?;
    Ok(AclEntry {
        principal: principal.to_string(),
        host: host.to_string(),
        operation: Operation::parse(operation),
        permission: PermissionType::parse(permission),
    })
}

/// `User:alice has Allow permission for operations: Read, Write from hosts: *`
fn legacy_acl_entries(input: &mut &str) -> winnow::Result<Vec<AclEntry>> {
    let principal = take_until(1.., " has ").parse_next(input)?;
    " has ".parse_next(input)?;
    let permission = take_until(1.., " permission for operations: ").parse_next(input)?;
    " permission for operations: ".parse_next(input)?;
    let operations = take_until(1.., " from hosts: ").parse_next(input)?;
    " from hosts: ".parse_next(input)?;
    let host = take_while(0.., |_: char| true).parse_next(input)?;

    let permission = PermissionType::parse(permission);
    Ok(operations
        .split(',')
        .map(str::trim)
        .filter(|op| !op.is_empty())
        .map(|op| AclEntry {
            principal: principal.to_string(),
            host: host.trim().to_string(),
            operation: Operation::parse(op),
            permission,
        })
        .collect())
}
