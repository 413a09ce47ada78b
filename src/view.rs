use crate::config::Config;
use crate::curvature::{EdgeView, disambiguate};
use crate::focus::{FocusEdges, focus};
use crate::graph::{GroupFilter, SystemNode, build};
use crate::layout::{LayoutOptions, LayoutStyle, select_layout};
use crate::model::Snapshot;
use serde::Serialize;
use tracing::info;

/// Parameters of one graph query.
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub layout: LayoutStyle,
    pub groups: GroupFilter,
    pub focus: Option<String>,
    pub focus_edges: FocusEdges,
    pub fullscreen: bool,
}

impl ViewRequest {
    pub fn new(layout: LayoutStyle) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    pub fn with_groups(mut self, groups: GroupFilter) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_focus(mut self, system: impl Into<String>) -> Self {
        self.focus = Some(system.into());
        self
    }
}

/// Everything a renderer needs to draw the landscape.
#[derive(Debug, Clone, Serialize)]
pub struct GraphView {
    pub nodes: Vec<SystemNode>,
    pub edges: Vec<EdgeView>,
    pub options: LayoutOptions,
    pub height: String,
    pub width: String,
    pub background: String,
    pub directed: bool,
}

impl GraphView {
    /// True when no node survived filtering; the renderer should show a
    /// "nothing to display" state.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

pub fn build_view(snapshot: &Snapshot, request: &ViewRequest, config: &Config) -> GraphView {
    let mut graph = build(
        &snapshot.systems,
        &snapshot.integrations,
        &request.groups,
        &config.theme,
    );
    if let Some(system) = request.focus.as_deref() {
        graph = focus(&graph, system, request.focus_edges);
    }

    let edges = disambiguate(&graph, &config.theme);
    let nodes: Vec<SystemNode> = graph.nodes().cloned().collect();
    let options = select_layout(request.layout, &config.layout);

    let height_px = if request.fullscreen {
        config.render.fullscreen_height_px
    } else {
        config.render.height_px
    };

    info!(
        nodes = nodes.len(),
        edges = edges.len(),
        layout = ?request.layout,
        focus = request.focus.as_deref().unwrap_or("-"),
        "graph view ready"
    );

    GraphView {
        nodes,
        edges,
        options,
        height: format!("{height_px}px"),
        width: config.render.width.clone(),
        background: config.render.background.clone(),
        directed: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Integration, System};

    fn snapshot() -> Snapshot {
        Snapshot {
            systems: vec![
                System::new("A", "X"),
                System::new("B", "X"),
                System::new("C", "Y"),
            ],
            integrations: vec![
                Integration::new(1, "id1", "A", "B"),
                Integration::new(2, "id2", "A", "B"),
                Integration::new(3, "id3", "B", "C"),
            ],
            ..Default::default()
        }
    }

    fn curves(view: &GraphView) -> Vec<(String, String, f64)> {
        view.edges
            .iter()
            .map(|edge| (edge.from.clone(), edge.to.clone(), edge.smooth.roundness))
            .collect()
    }

    fn triple(from: &str, to: &str, roundness: f64) -> (String, String, f64) {
        (from.to_string(), to.to_string(), roundness)
    }

    #[test]
    fn full_network() {
        let view = build_view(&snapshot(), &ViewRequest::default(), &Config::default());
        let names: Vec<&str> = view.nodes.iter().map(|node| node.id.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(
            curves(&view),
            vec![triple("A", "B", 0.2), triple("A", "B", -0.2), triple("B", "C", 0.2)]
        );
        assert_eq!(view.height, "650px");
        assert!(view.options.physics.enabled);
    }

    #[test]
    fn group_filter_drops_crossing_edge() {
        let request =
            ViewRequest::new(LayoutStyle::Hierarchical).with_groups(GroupFilter::only(["X"]));
        let view = build_view(&snapshot(), &request, &Config::default());
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(
            curves(&view),
            vec![triple("A", "B", 0.2), triple("A", "B", -0.2)]
        );
        assert!(!view.options.physics.enabled);
    }

    #[test]
    fn focus_on_middle_system() {
        let request = ViewRequest::default().with_focus("B");
        let view = build_view(&snapshot(), &request, &Config::default());
        assert_eq!(view.nodes.len(), 3);
        assert_eq!(view.edges.len(), 3);
    }

    #[test]
    fn focus_outside_filter_is_empty() {
        let request = ViewRequest::default()
            .with_groups(GroupFilter::only(["X"]))
            .with_focus("C");
        let view = build_view(&snapshot(), &request, &Config::default());
        assert!(view.is_empty());
        assert!(view.edges.is_empty());
    }

    #[test]
    fn fullscreen_uses_taller_canvas() {
        let request = ViewRequest {
            fullscreen: true,
            ..Default::default()
        };
        let view = build_view(&snapshot(), &request, &Config::default());
        assert_eq!(view.height, "950px");
        assert_eq!(view.background, "#222222");
    }
}
