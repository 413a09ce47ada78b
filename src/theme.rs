use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub default_node_color: String,
    pub node_shape: String,
    pub node_size: f32,
    pub node_font_size: f32,
    pub node_font_color: String,
    pub edge_font_size: f32,
    pub edge_font_color: String,
    pub edge_font_stroke_width: f32,
    pub edge_font_stroke_color: String,
    pub edge_font_align: String,
    pub arrow_scale: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: "#222222".to_string(),
            default_node_color: "#D3D3D3".to_string(),
            node_shape: "dot".to_string(),
            node_size: 25.0,
            node_font_size: 16.0,
            node_font_color: "white".to_string(),
            edge_font_size: 10.0,
            edge_font_color: "white".to_string(),
            edge_font_stroke_width: 2.0,
            edge_font_stroke_color: "#222222".to_string(),
            edge_font_align: "middle".to_string(),
            arrow_scale: 1.0,
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            default_node_color: "#C7D2E5".to_string(),
            node_shape: "dot".to_string(),
            node_size: 25.0,
            node_font_size: 16.0,
            node_font_color: "#1C2430".to_string(),
            edge_font_size: 10.0,
            edge_font_color: "#1C2430".to_string(),
            edge_font_stroke_width: 2.0,
            edge_font_stroke_color: "#FFFFFF".to_string(),
            edge_font_align: "middle".to_string(),
            arrow_scale: 1.0,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" | "default" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
