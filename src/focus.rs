use crate::graph::IntegrationGraph;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use tracing::debug;

/// Which edges survive a lineage focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusEdges {
    /// Every edge whose endpoints are both in the kept node set.
    #[default]
    Induced,
    /// Only edges that start or end at the focus node.
    Direct,
}

impl FromStr for FocusEdges {
    type Err = crate::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "induced" => Ok(FocusEdges::Induced),
            "direct" => Ok(FocusEdges::Direct),
            _ => Err(crate::Error::UnsupportedFocusEdges(value.to_string())),
        }
    }
}

/// One-hop lineage neighborhood of `focus`: the node, its direct
/// predecessors and its direct successors. An unknown focus yields an empty
/// graph.
pub fn focus(graph: &IntegrationGraph, focus: &str, edges: FocusEdges) -> IntegrationGraph {
    let Some(center) = graph.node_index(focus) else {
        debug!(focus, "focus system not in graph");
        return IntegrationGraph::new();
    };

    let inner = graph.inner();
    let mut keep = HashSet::from([center]);
    keep.extend(inner.neighbors_directed(center, Direction::Incoming));
    keep.extend(inner.neighbors_directed(center, Direction::Outgoing));

    let sub = inner.filter_map(
        |idx, node| keep.contains(&idx).then(|| node.clone()),
        |edge_idx, integration| {
            let (from, to) = inner.edge_endpoints(edge_idx)?;
            let kept = match edges {
                FocusEdges::Induced => keep.contains(&from) && keep.contains(&to),
                FocusEdges::Direct => from == center || to == center,
            };
            kept.then(|| integration.clone())
        },
    );

    debug!(
        focus,
        nodes = sub.node_count(),
        edges = sub.edge_count(),
        "extracted lineage focus"
    );
    IntegrationGraph::from_inner(sub)
}
