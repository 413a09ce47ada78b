use crate::model::System;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// A system record whose color is guaranteed to be a usable hex value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSystem {
    pub name: String,
    pub description: String,
    pub group: String,
    pub color: String,
}

pub fn normalize_system(system: &System, default_color: &str) -> NormalizedSystem {
    NormalizedSystem {
        name: system.name.clone(),
        description: system.description.clone(),
        group: system.group.clone(),
        color: resolve_color(system.color.as_deref(), default_color),
    }
}

pub fn resolve_color(raw: Option<&str>, default_color: &str) -> String {
    match raw.map(str::trim) {
        Some(value) if HEX_COLOR_RE.is_match(value) => value.to_string(),
        Some("") | None => default_color.to_string(),
        Some(value) => {
            debug!(color = value, fallback = default_color, "unparseable node color");
            default_color.to_string()
        }
    }
}
