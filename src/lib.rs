pub mod acl;
pub mod acl_parser;
pub mod config;
pub mod display_width;
pub mod error;
pub mod graph;
pub mod page;
pub mod refresh;
pub mod server;
pub mod snapshot;
pub mod source;
pub mod table_renderer;
pub mod transform;
pub mod visjs;

use acl::AclRecord;
use config::OutputFormat;
use error::Result;

/// Parses ACLs given either as a JSON array of records or as `kafka-acls --list` output.
pub fn parse_acls(input: &str) -> Result<Vec<AclRecord>> {
    if input.trim_start().starts_with('[') {
        Ok(serde_json::from_str(input)?)
    } else {
        acl_parser::parse_acl_listing(input)
    }
}

/// Builds the network for `input` and renders it in `format`.
pub fn render(input: &str, format: OutputFormat) -> Result<String> {
    let records = parse_acls(input)?;
    let graph = transform::build_graph(&records);
    let network = visjs::create_network(&graph);
    match format {
        OutputFormat::Json => Ok(visjs::to_embeddable_json(&network)?),
        OutputFormat::Html => page::render(&network, server::PAGE_TITLE),
        OutputFormat::Table => Ok(table_renderer::render(&network)),
    }
}
