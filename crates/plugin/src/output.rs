//! Agent plugin wire format.

use serde::Serialize;
use std::collections::BTreeMap;
use tpmon_core::{GraphDefinition, MetricSnapshot};

/// First line of the meta output, announcing the graph definition format
pub const META_HEADER: &str = "# mackerel-agent-plugin";

#[derive(Serialize)]
struct Meta<'a> {
    graphs: BTreeMap<String, &'a GraphDefinition>,
}

/// Render graph definitions, namespaced under `prefix`
pub fn render_meta(
    prefix: &str,
    definitions: &BTreeMap<String, GraphDefinition>,
) -> serde_json::Result<String> {
    let meta = Meta {
        graphs: definitions
            .iter()
            .map(|(group, graph)| (format!("{}.{}", prefix, group), graph))
            .collect(),
    };

    Ok(format!("{}\n{}\n", META_HEADER, serde_json::to_string(&meta)?))
}

/// Render one `name\tvalue\ttimestamp` line per defined metric in the snapshot
///
/// Metrics the snapshot lacks are skipped. Lines follow schema order.
pub fn render_metrics(
    prefix: &str,
    definitions: &BTreeMap<String, GraphDefinition>,
    snapshot: &MetricSnapshot,
    timestamp: u64,
) -> String {
    let mut out = String::new();

    for (group, graph) in definitions {
        for name in graph.metric_names() {
            if let Some(value) = snapshot.get(name) {
                out.push_str(&format!(
                    "{}.{}.{}\t{}\t{}\n",
                    prefix, group, name, value, timestamp
                ));
            }
        }
    }

    out
}
