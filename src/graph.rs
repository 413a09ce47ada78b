use crate::model::{Integration, System};
use crate::normalize::{NormalizedSystem, normalize_system};
use crate::theme::Theme;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeFont {
    pub size: f32,
    pub color: String,
}

/// Node payload handed to the renderer, keyed by system name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub color: String,
    pub group: String,
    pub shape: String,
    pub size: f32,
    pub font: NodeFont,
}

impl SystemNode {
    fn from_normalized(system: NormalizedSystem, theme: &Theme) -> Self {
        let title = node_tooltip(&system);
        Self {
            id: system.name.clone(),
            label: system.name,
            title,
            color: system.color,
            group: system.group,
            shape: theme.node_shape.clone(),
            size: theme.node_size,
            font: NodeFont {
                size: theme.node_font_size,
                color: theme.node_font_color.clone(),
            },
        }
    }
}

fn node_tooltip(system: &NormalizedSystem) -> String {
    format!(
        "{}\nGroup: {}\n{}",
        system.name, system.group, system.description
    )
}

/// Set of group names a build keeps. Empty keeps every system, including
/// systems without a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    groups: BTreeSet<String>,
}

impl GroupFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            groups: groups.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn admits(&self, group: &str) -> bool {
        self.groups.is_empty() || self.groups.contains(group)
    }
}

/// Directed multigraph of systems (nodes) and integrations (edges). Edge
/// indices follow the order integrations were admitted in.
#[derive(Debug, Clone, Default)]
pub struct IntegrationGraph {
    graph: DiGraph<SystemNode, Integration>,
    index: HashMap<String, NodeIndex>,
}

impl IntegrationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_inner(graph: DiGraph<SystemNode, Integration>) -> Self {
        let index = graph
            .node_indices()
            .map(|idx| (graph[idx].id.clone(), idx))
            .collect();
        Self { graph, index }
    }

    pub(crate) fn inner(&self) -> &DiGraph<SystemNode, Integration> {
        &self.graph
    }

    pub(crate) fn node_index(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&SystemNode> {
        self.node_index(name).map(|idx| &self.graph[idx])
    }

    pub fn nodes(&self) -> impl Iterator<Item = &SystemNode> {
        self.graph.node_weights()
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes().map(|node| node.id.as_str()).collect()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Integration> {
        self.graph.edge_weights()
    }

    fn upsert_node(&mut self, node: SystemNode) {
        if let Some(&idx) = self.index.get(&node.id) {
            debug!(system = %node.id, "duplicate system name, later record wins");
            self.graph[idx] = node;
            return;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
    }

    fn add_integration(&mut self, integration: &Integration) -> bool {
        let (Some(from), Some(to)) = (
            self.node_index(&integration.source),
            self.node_index(&integration.target),
        ) else {
            return false;
        };
        self.graph.add_edge(from, to, integration.clone());
        true
    }
}

pub fn build(
    systems: &[System],
    integrations: &[Integration],
    filter: &GroupFilter,
    theme: &Theme,
) -> IntegrationGraph {
    let mut graph = IntegrationGraph::new();

    for system in systems {
        if !filter.admits(&system.group) {
            continue;
        }
        let normalized = normalize_system(system, &theme.default_node_color);
        graph.upsert_node(SystemNode::from_normalized(normalized, theme));
    }

    let mut dropped = 0usize;
    for integration in integrations {
        if !graph.add_integration(integration) {
            debug!(
                integration = %integration.name,
                source = %integration.source,
                target = %integration.target,
                "endpoint not admitted, integration skipped"
            );
            dropped += 1;
        }
    }

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        dropped,
        "built integration graph"
    );
    graph
}
