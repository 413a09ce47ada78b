use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unsupported layout style `{0}` (expected `organic` or `hierarchical`)")]
    UnsupportedLayout(String),

    #[error("unsupported focus edge mode `{0}` (expected `induced` or `direct`)")]
    UnsupportedFocusEdges(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {table} table: {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed config: {0}")]
    Config(#[from] json5::Error),

    #[error("failed to write graph view: {0}")]
    Export(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
