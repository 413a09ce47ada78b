#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod curvature;
pub mod error;
pub mod export;
pub mod focus;
pub mod graph;
pub mod layout;
pub mod model;
pub mod normalize;
pub mod store;
pub mod theme;
pub mod view;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, load_config};
pub use curvature::{EdgeView, curvature};
pub use error::{Error, Result};
pub use focus::{FocusEdges, focus};
pub use graph::{GroupFilter, IntegrationGraph, SystemNode, build};
pub use layout::{LayoutOptions, LayoutStyle, select_layout};
pub use model::{ConnectionKind, Group, Integration, Owner, OwnerRole, Snapshot, System};
pub use theme::Theme;
pub use view::{GraphView, ViewRequest, build_view};
