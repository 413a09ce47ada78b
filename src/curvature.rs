use crate::graph::IntegrationGraph;
use crate::model::Integration;
use crate::theme::Theme;
use serde::Serialize;
use std::collections::HashMap;

const BASE_CURVE: f64 = 0.2;
const CURVE_STEP: f64 = 0.15;

/// Signed roundness for the `index`-th edge (0-based) sharing one ordered
/// pair: 0.2, -0.2, 0.35, -0.35, 0.5, -0.5, ...
pub fn curvature(index: usize) -> f64 {
    let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
    let magnitude = BASE_CURVE + (index / 2) as f64 * CURVE_STEP;
    magnitude * direction
}

/// Counts edges per ordered (source, target) pair in the order they are seen.
#[derive(Debug, Default)]
pub struct CurvatureTracker {
    seen: HashMap<(String, String), usize>,
}

impl CurvatureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, source: &str, target: &str) -> f64 {
        let slot = self
            .seen
            .entry((source.to_string(), target.to_string()))
            .or_insert(0);
        let index = *slot;
        *slot += 1;
        curvature(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CurveKind {
    #[serde(rename = "curvedCW")]
    CurvedCw,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Smooth {
    #[serde(rename = "type")]
    pub kind: CurveKind,
    pub roundness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeColor {
    pub inherit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeFont {
    pub size: f32,
    pub color: String,
    pub stroke_width: f32,
    pub stroke_color: String,
    pub align: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrowHead {
    pub enabled: bool,
    pub scale_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrows {
    pub to: ArrowHead,
}

/// Edge payload handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeView {
    /// Absent for rows saved before an id was assigned; the renderer then
    /// generates one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub from: String,
    pub to: String,
    pub label: String,
    pub title: String,
    pub color: EdgeColor,
    pub font: EdgeFont,
    pub smooth: Smooth,
    pub arrows: Arrows,
}

impl EdgeView {
    fn new(integration: &Integration, roundness: f64, theme: &Theme) -> Self {
        Self {
            id: integration.id,
            from: integration.source.clone(),
            to: integration.target.clone(),
            label: format!("{} / {}", integration.source_conn, integration.target_conn),
            title: edge_tooltip(integration),
            color: EdgeColor {
                inherit: "from".to_string(),
            },
            font: EdgeFont {
                size: theme.edge_font_size,
                color: theme.edge_font_color.clone(),
                stroke_width: theme.edge_font_stroke_width,
                stroke_color: theme.edge_font_stroke_color.clone(),
                align: theme.edge_font_align.clone(),
            },
            smooth: Smooth {
                kind: CurveKind::CurvedCw,
                roundness,
            },
            arrows: Arrows {
                to: ArrowHead {
                    enabled: true,
                    scale_factor: theme.arrow_scale,
                },
            },
        }
    }
}

fn edge_tooltip(integration: &Integration) -> String {
    [
        integration.name.clone(),
        integration.description.clone(),
        "---".to_string(),
        format!(
            "Type: {} \u{2794} {}",
            integration.source_conn, integration.target_conn
        ),
        format!("Biz Owner: {}", integration.business_owner),
        format!("IT Owner: {}", integration.it_owner),
    ]
    .join("\n")
}

/// Decorates every edge of `graph`, in edge order, with its display metadata
/// and a curvature unique within its (source, target) pair.
pub fn disambiguate(graph: &IntegrationGraph, theme: &Theme) -> Vec<EdgeView> {
    let mut tracker = CurvatureTracker::new();
    graph
        .edges()
        .map(|integration| {
            let roundness = tracker.next(&integration.source, &integration.target);
            EdgeView::new(integration, roundness, theme)
        })
        .collect()
}
