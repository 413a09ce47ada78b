use crate::config::{HierarchicalConfig, LayoutConfig, OrganicConfig};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStyle {
    /// Rank based, levels follow edge direction.
    Hierarchical,
    /// Force directed.
    #[default]
    Organic,
}

impl FromStr for LayoutStyle {
    type Err = crate::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hierarchical" | "hierarchical (bottom-up)" => Ok(LayoutStyle::Hierarchical),
            "organic" | "organic (neural)" => Ok(LayoutStyle::Organic),
            _ => Err(crate::Error::UnsupportedLayout(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchicalOptions {
    pub enabled: bool,
    pub direction: String,
    pub sort_method: String,
    pub node_spacing: f32,
    pub level_separation: f32,
    pub block_shifting: bool,
    pub edge_minimization: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchicalLayout {
    pub hierarchical: HierarchicalOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
    pub gravitational_constant: f32,
    pub central_gravity: f32,
    pub spring_length: f32,
    pub spring_constant: f32,
    pub damping: f32,
    pub avoid_overlap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Physics {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barnes_hut: Option<BarnesHut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_velocity: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOptions {
    pub border_width: f32,
    pub shadow: bool,
}

/// Renderer options for one layout style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<HierarchicalLayout>,
    pub physics: Physics,
    pub nodes: NodeOptions,
}

pub fn select_layout(style: LayoutStyle, config: &LayoutConfig) -> LayoutOptions {
    let nodes = NodeOptions {
        border_width: config.node_border_width,
        shadow: config.node_shadow,
    };
    match style {
        LayoutStyle::Hierarchical => hierarchical(&config.hierarchical, nodes),
        LayoutStyle::Organic => organic(&config.organic, nodes),
    }
}

fn hierarchical(config: &HierarchicalConfig, nodes: NodeOptions) -> LayoutOptions {
    LayoutOptions {
        layout: Some(HierarchicalLayout {
            hierarchical: HierarchicalOptions {
                enabled: true,
                direction: config.direction.clone(),
                sort_method: config.sort_method.clone(),
                node_spacing: config.node_spacing,
                level_separation: config.level_separation,
                block_shifting: config.block_shifting,
                edge_minimization: config.edge_minimization,
            },
        }),
        physics: Physics {
            enabled: false,
            barnes_hut: None,
            min_velocity: None,
        },
        nodes,
    }
}

fn organic(config: &OrganicConfig, nodes: NodeOptions) -> LayoutOptions {
    LayoutOptions {
        layout: None,
        physics: Physics {
            enabled: true,
            barnes_hut: Some(BarnesHut {
                gravitational_constant: config.gravitational_constant,
                central_gravity: config.central_gravity,
                spring_length: config.spring_length,
                spring_constant: config.spring_constant,
                damping: config.damping,
                avoid_overlap: config.avoid_overlap,
            }),
            min_velocity: Some(config.min_velocity),
        },
        nodes,
    }
}
