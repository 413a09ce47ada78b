use crate::config::load_config;
use crate::export::{write_view, write_view_file};
use crate::focus::FocusEdges;
use crate::graph::GroupFilter;
use crate::layout::LayoutStyle;
use crate::model::Snapshot;
use crate::store::{load_dir, load_json};
use crate::view::{ViewRequest, build_view};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "imap",
    version,
    about = "Build the integration landscape graph and its rendering options as JSON"
)]
pub struct Args {
    /// Directory holding data_groups.csv, data_systems.csv, data_owners.csv and data_integrations.csv
    #[arg(short = 'd', long = "data-dir", conflicts_with = "snapshot")]
    pub data_dir: Option<PathBuf>,

    /// Single JSON snapshot with groups, systems, owners and integrations
    #[arg(short = 's', long = "snapshot")]
    pub snapshot: Option<PathBuf>,

    /// Layout style
    #[arg(short = 'l', long = "layout", value_enum, default_value = "organic")]
    pub layout: LayoutArg,

    /// Keep only systems in this group (repeatable)
    #[arg(short = 'g', long = "group")]
    pub groups: Vec<String>,

    /// Show only the direct lineage of this system
    #[arg(short = 'f', long = "focus")]
    pub focus: Option<String>,

    /// Which edges a focus keeps
    #[arg(long = "focus-edges", value_enum, default_value = "induced")]
    pub focus_edges: FocusEdgesArg,

    /// Use the fullscreen canvas height
    #[arg(long = "fullscreen")]
    pub fullscreen: bool,

    /// Config JSON/JSON5 file (theme, layout constants, canvas)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Single-line JSON instead of pretty printed
    #[arg(long = "compact")]
    pub compact: bool,

    /// Debug logging on stderr (overridden by RUST_LOG)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LayoutArg {
    Organic,
    Hierarchical,
}

impl From<LayoutArg> for LayoutStyle {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Organic => LayoutStyle::Organic,
            LayoutArg::Hierarchical => LayoutStyle::Hierarchical,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum FocusEdgesArg {
    Induced,
    Direct,
}

impl From<FocusEdgesArg> for FocusEdges {
    fn from(arg: FocusEdgesArg) -> Self {
        match arg {
            FocusEdgesArg::Induced => FocusEdges::Induced,
            FocusEdgesArg::Direct => FocusEdges::Direct,
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let snapshot = read_snapshot(&args)?;
    for issue in snapshot.validate() {
        warn!("{issue}");
    }

    let request = request_from_args(&args);
    let view = build_view(&snapshot, &request, &config);
    if view.is_empty() {
        eprintln!("No data matches filters.");
    }

    let pretty = !args.compact;
    match args.output.as_deref() {
        Some(path) => write_view_file(path, &view, pretty)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_view(&mut handle, &view, pretty)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_snapshot(args: &Args) -> Result<Snapshot> {
    if let Some(path) = args.snapshot.as_deref() {
        return Ok(load_json(path)?);
    }
    let dir = args.data_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    Ok(load_dir(&dir)?)
}

fn request_from_args(args: &Args) -> ViewRequest {
    let groups = if args.groups.is_empty() {
        GroupFilter::all()
    } else {
        GroupFilter::only(args.groups.iter().cloned())
    };
    ViewRequest {
        layout: args.layout.into(),
        groups,
        focus: args.focus.clone(),
        focus_edges: args.focus_edges.into(),
        fullscreen: args.fullscreen,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_flags_onto_request() {
        let args = Args::parse_from([
            "imap",
            "-l",
            "hierarchical",
            "-g",
            "Finance",
            "-g",
            "Ops",
            "--focus",
            "ERP",
            "--focus-edges",
            "direct",
            "--fullscreen",
        ]);
        let request = request_from_args(&args);
        assert_eq!(request.layout, LayoutStyle::Hierarchical);
        assert_eq!(request.groups, GroupFilter::only(["Finance", "Ops"]));
        assert_eq!(request.focus.as_deref(), Some("ERP"));
        assert_eq!(request.focus_edges, FocusEdges::Direct);
        assert!(request.fullscreen);
    }

    #[test]
    fn defaults_to_full_organic_network() {
        let args = Args::parse_from(["imap"]);
        let request = request_from_args(&args);
        assert_eq!(request.layout, LayoutStyle::Organic);
        assert!(request.groups.is_empty());
        assert!(request.focus.is_none());
        assert_eq!(request.focus_edges, FocusEdges::Induced);
    }

    #[test]
    fn snapshot_and_data_dir_conflict() {
        let result = Args::try_parse_from(["imap", "-d", "data", "-s", "snap.json"]);
        assert!(result.is_err());
    }
}
