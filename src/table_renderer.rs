use std::collections::{HashMap, HashSet};

use crate::display_width::{max_width, pad_right};
use crate::visjs::Network;

const HEADER: [&str; 3] = ["FROM", "OPERATION", "TO"];
const GAP: &str = "  ";

/// Renders `network` as an aligned `FROM  OPERATION  TO` listing.
///
/// Nodes without any edge are listed afterwards so that no principal or
/// resource disappears from the output.
pub fn render(network: &Network) -> String {
    let labels: HashMap<&str, &str> = network
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.label.as_str()))
        .collect();
    let label = |id: &str| -> String { labels.get(id).copied().unwrap_or(id).to_string() };

    let rows: Vec<[String; 3]> = network
        .edges
        .iter()
        .map(|e| [label(&e.from), e.title.clone(), label(&e.to)])
        .collect();

    let mut lines = Vec::new();
    if !rows.is_empty() {
        let widths: Vec<usize> = (0..3)
            .map(|col| {
                max_width(
                    rows.iter()
                        .map(|r| r[col].as_str())
                        .chain(std::iter::once(HEADER[col])),
                )
            })
            .collect();

        lines.push(format_row(&HEADER.map(str::to_string), &widths));
        for row in &rows {
            lines.push(format_row(row, &widths));
        }
    }

    let connected: HashSet<&str> = network
        .edges
        .iter()
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect();
    let isolated: Vec<&str> = network
        .nodes
        .iter()
        .filter(|n| !connected.contains(n.id.as_str()))
        .map(|n| n.label.as_str())
        .collect();
    if !isolated.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push("NO GRANTS".to_string());
        lines.extend(isolated.into_iter().map(str::to_string));
    }

    lines.join("\n")
}

fn format_row(cells: &[String; 3], widths: &[usize]) -> String {
    let line = format!(
        "{}{GAP}{}{GAP}{}",
        pad_right(&cells[0], widths[0]),
        pad_right(&cells[1], widths[1]),
        cells[2]
    );
    line.trim_end().to_string()
}
