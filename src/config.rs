use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HierarchicalConfig {
    pub direction: String,
    pub sort_method: String,
    pub node_spacing: f32,
    pub level_separation: f32,
    pub block_shifting: bool,
    pub edge_minimization: bool,
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            direction: "DU".to_string(),
            sort_method: "directed".to_string(),
            node_spacing: 350.0,
            level_separation: 300.0,
            block_shifting: true,
            edge_minimization: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganicConfig {
    pub gravitational_constant: f32,
    pub central_gravity: f32,
    pub spring_length: f32,
    pub spring_constant: f32,
    pub damping: f32,
    pub avoid_overlap: f32,
    pub min_velocity: f32,
}

impl Default for OrganicConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: -3000.0,
            central_gravity: 0.3,
            spring_length: 300.0,
            spring_constant: 0.001,
            damping: 0.5,
            avoid_overlap: 0.2,
            min_velocity: 0.75,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub node_border_width: f32,
    pub node_shadow: bool,
    pub hierarchical: HierarchicalConfig,
    pub organic: OrganicConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_border_width: 2.0,
            node_shadow: true,
            hierarchical: HierarchicalConfig::default(),
            organic: OrganicConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub height_px: u32,
    pub fullscreen_height_px: u32,
    pub width: String,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            height_px: 650,
            fullscreen_height_px: 950,
            width: "100%".to_string(),
            background: "#222222".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::dark();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            layout: LayoutConfig::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    default_node_color: Option<String>,
    node_shape: Option<String>,
    node_size: Option<f32>,
    node_font_size: Option<f32>,
    node_font_color: Option<String>,
    edge_font_size: Option<f32>,
    edge_font_color: Option<String>,
    edge_font_stroke_width: Option<f32>,
    edge_font_stroke_color: Option<String>,
    edge_font_align: Option<String>,
    arrow_scale: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct HierarchicalConfigFile {
    direction: Option<String>,
    sort_method: Option<String>,
    node_spacing: Option<f32>,
    level_separation: Option<f32>,
    block_shifting: Option<bool>,
    edge_minimization: Option<bool>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct OrganicConfigFile {
    gravitational_constant: Option<f32>,
    central_gravity: Option<f32>,
    spring_length: Option<f32>,
    spring_constant: Option<f32>,
    damping: Option<f32>,
    avoid_overlap: Option<f32>,
    min_velocity: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    height_px: Option<u32>,
    fullscreen_height_px: Option<u32>,
    width: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    node_border_width: Option<f32>,
    node_shadow: Option<bool>,
    hierarchical: Option<HierarchicalConfigFile>,
    organic: Option<OrganicConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> crate::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| crate::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents)
}

/// Overlays a JSON5 config document on the defaults. Absent keys keep their
/// default value.
pub fn parse_config(contents: &str) -> crate::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(theme_name) = parsed.theme.as_deref() {
        if let Some(theme) = Theme::by_name(theme_name) {
            config.theme = theme;
        } else {
            tracing::warn!(theme = theme_name, "unknown theme preset, keeping default");
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.default_node_color {
            config.theme.default_node_color = v;
        }
        if let Some(v) = vars.node_shape {
            config.theme.node_shape = v;
        }
        if let Some(v) = vars.node_size {
            config.theme.node_size = v;
        }
        if let Some(v) = vars.node_font_size {
            config.theme.node_font_size = v;
        }
        if let Some(v) = vars.node_font_color {
            config.theme.node_font_color = v;
        }
        if let Some(v) = vars.edge_font_size {
            config.theme.edge_font_size = v;
        }
        if let Some(v) = vars.edge_font_color {
            config.theme.edge_font_color = v;
        }
        if let Some(v) = vars.edge_font_stroke_width {
            config.theme.edge_font_stroke_width = v;
        }
        if let Some(v) = vars.edge_font_stroke_color {
            config.theme.edge_font_stroke_color = v;
        }
        if let Some(v) = vars.edge_font_align {
            config.theme.edge_font_align = v;
        }
        if let Some(v) = vars.arrow_scale {
            config.theme.arrow_scale = v;
        }
    }

    if let Some(v) = parsed.node_border_width {
        config.layout.node_border_width = v;
    }
    if let Some(v) = parsed.node_shadow {
        config.layout.node_shadow = v;
    }

    if let Some(hierarchical) = parsed.hierarchical {
        if let Some(v) = hierarchical.direction {
            config.layout.hierarchical.direction = v;
        }
        if let Some(v) = hierarchical.sort_method {
            config.layout.hierarchical.sort_method = v;
        }
        if let Some(v) = hierarchical.node_spacing {
            config.layout.hierarchical.node_spacing = v;
        }
        if let Some(v) = hierarchical.level_separation {
            config.layout.hierarchical.level_separation = v;
        }
        if let Some(v) = hierarchical.block_shifting {
            config.layout.hierarchical.block_shifting = v;
        }
        if let Some(v) = hierarchical.edge_minimization {
            config.layout.hierarchical.edge_minimization = v;
        }
    }

    if let Some(organic) = parsed.organic {
        if let Some(v) = organic.gravitational_constant {
            config.layout.organic.gravitational_constant = v;
        }
        if let Some(v) = organic.central_gravity {
            config.layout.organic.central_gravity = v;
        }
        if let Some(v) = organic.spring_length {
            config.layout.organic.spring_length = v;
        }
        if let Some(v) = organic.spring_constant {
            config.layout.organic.spring_constant = v;
        }
        if let Some(v) = organic.damping {
            config.layout.organic.damping = v;
        }
        if let Some(v) = organic.avoid_overlap {
            config.layout.organic.avoid_overlap = v;
        }
        if let Some(v) = organic.min_velocity {
            config.layout.organic.min_velocity = v;
        }
    }

    if let Some(render) = parsed.render {
        if let Some(v) = render.height_px {
            config.render.height_px = v;
        }
        if let Some(v) = render.fullscreen_height_px {
            config.render.fullscreen_height_px = v;
        }
        if let Some(v) = render.width {
            config.render.width = v;
        }
    }

    config.render.background = config.theme.background.clone();

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dark_canvas() {
        let config = Config::default();
        assert_eq!(config.render.background, "#222222");
        assert_eq!(config.theme.default_node_color, "#D3D3D3");
        assert_eq!(config.render.height_px, 650);
        assert_eq!(config.layout.hierarchical.direction, "DU");
    }

    #[test]
    fn overlays_partial_json5() {
        let config = parse_config(
            r##"{
                // comments and trailing commas are fine
                theme: "light",
                themeVariables: { defaultNodeColor: "#ABCDEF" },
                organic: { springLength: 120 },
                render: { heightPx: 800, },
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.default_node_color, "#ABCDEF");
        assert_eq!(config.theme.background, "#FFFFFF");
        assert_eq!(config.render.background, "#FFFFFF");
        assert_eq!(config.layout.organic.spring_length, 120.0);
        assert_eq!(config.layout.organic.damping, 0.5);
        assert_eq!(config.render.height_px, 800);
        assert_eq!(config.render.fullscreen_height_px, 950);
    }

    #[test]
    fn unknown_theme_keeps_default() {
        let config = parse_config(r#"{"theme": "neon"}"#).unwrap();
        assert_eq!(config.theme.background, "#222222");
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(
            parse_config("{ theme: "),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn missing_path_uses_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.organic.gravitational_constant, -3000.0);
    }
}
