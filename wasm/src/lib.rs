use integration_map::config::parse_config;
use integration_map::store::parse_json;
use integration_map::{Config, FocusEdges, GroupFilter, LayoutStyle, ViewRequest, build_view};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphViewOptions {
    layout: Option<String>,
    groups: Option<Vec<String>>,
    focus: Option<String>,
    focus_edges: Option<String>,
    fullscreen: Option<bool>,
}

fn build_request(options: GraphViewOptions) -> Result<ViewRequest, integration_map::Error> {
    let layout = match options.layout.as_deref() {
        Some(name) => name.parse::<LayoutStyle>()?,
        None => LayoutStyle::default(),
    };
    let focus_edges = match options.focus_edges.as_deref() {
        Some(name) => name.parse::<FocusEdges>()?,
        None => FocusEdges::default(),
    };
    let groups = match options.groups {
        Some(groups) if !groups.is_empty() => GroupFilter::only(groups),
        _ => GroupFilter::all(),
    };
    Ok(ViewRequest {
        layout,
        groups,
        focus: options.focus.filter(|name| !name.is_empty()),
        focus_edges,
        fullscreen: options.fullscreen.unwrap_or(false),
    })
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub fn build_graph_view(
    snapshot_json: &str,
    options_json: Option<String>,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    let snapshot = parse_json(snapshot_json).map_err(to_js)?;
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<GraphViewOptions>(&raw_options).map_err(to_js)?
    } else {
        GraphViewOptions::default()
    };
    let config = match config_json {
        Some(raw_config) => parse_config(&raw_config).map_err(to_js)?,
        None => Config::default(),
    };

    let request = build_request(options).map_err(to_js)?;
    let view = build_view(&snapshot, &request, &config);
    serde_json::to_string(&view).map_err(to_js)
}

#[cfg(test)]
mod tests {
    use crate::{GraphViewOptions, build_request};
    use integration_map::store::parse_json;
    use integration_map::{Config, LayoutStyle, build_view};

    #[test]
    fn builds_focused_hierarchical_view() {
        let snapshot = parse_json(
            r#"{
                "systems": [
                    {"name": "A", "group": "X"},
                    {"name": "B", "group": "X"},
                    {"name": "C", "group": "Y"}
                ],
                "integrations": [
                    {"id": 1, "name": "ab1", "source": "A", "source_conn": "API", "target": "B", "target_conn": "API"},
                    {"id": 2, "name": "ab2", "source": "A", "source_conn": "API", "target": "B", "target_conn": "Report"},
                    {"id": 3, "name": "bc", "source": "B", "source_conn": "API", "target": "C", "target_conn": "API"}
                ]
            }"#,
        )
        .expect("snapshot should parse");

        let options: GraphViewOptions =
            serde_json::from_str(r#"{"layout": "hierarchical", "focus": "C"}"#).unwrap();
        let request = build_request(options).expect("options should be valid");
        assert_eq!(request.layout, LayoutStyle::Hierarchical);

        let view = build_view(&snapshot, &request, &Config::default());
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert!(!view.options.physics.enabled);
    }

    #[test]
    fn rejects_unknown_layout() {
        let options: GraphViewOptions = serde_json::from_str(r#"{"layout": "radial"}"#).unwrap();
        assert!(build_request(options).is_err());
    }
}
