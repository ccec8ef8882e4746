//! The HTML page hosting the vis.js network.

use crate::error::Result;
use crate::visjs::{Network, to_embeddable_json};

const VIS_VERSION: &str = "4.21.0";

pub fn render(network: &Network, title: &str) -> Result<String> {
    let nodes = to_embeddable_json(&network.nodes)?;
    let edges = to_embeddable_json(&network.edges)?;
    let title = html_escape(title);
    Ok(format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>

<script type="text/javascript" src="https://cdnjs.cloudflare.com/ajax/libs/vis/{VIS_VERSION}/vis.min.js"></script>
<link href="https://cdnjs.cloudflare.com/ajax/libs/vis/{VIS_VERSION}/vis-network.min.css" rel="stylesheet" type="text/css" />

<style type="text/css">
#acl-network {{
width: 100%;
height: 95vh;
}}
</style>
</head>
<body>

<div id="acl-network"></div>

<script type="text/javascript">
new vis.Network(
document.getElementById('acl-network'),
{{nodes: new vis.DataSet({nodes}), edges: new vis.DataSet({edges})}},
{{}});
</script>

</body>
</html>
"#
    ))
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
