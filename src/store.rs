use crate::model::Snapshot;
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

pub const GROUPS_FILE: &str = "data_groups.csv";
pub const SYSTEMS_FILE: &str = "data_systems.csv";
pub const OWNERS_FILE: &str = "data_owners.csv";
pub const INTEGRATIONS_FILE: &str = "data_integrations.csv";

/// Reads the four record tables from `dir`. A table whose file does not exist
/// is empty.
pub fn load_dir(dir: &Path) -> crate::Result<Snapshot> {
    let snapshot = Snapshot {
        groups: read_table_file(&dir.join(GROUPS_FILE), "groups")?,
        systems: read_table_file(&dir.join(SYSTEMS_FILE), "systems")?,
        owners: read_table_file(&dir.join(OWNERS_FILE), "owners")?,
        integrations: read_table_file(&dir.join(INTEGRATIONS_FILE), "integrations")?,
    };
    info!(
        groups = snapshot.groups.len(),
        systems = snapshot.systems.len(),
        owners = snapshot.owners.len(),
        integrations = snapshot.integrations.len(),
        dir = %dir.display(),
        "loaded snapshot tables"
    );
    Ok(snapshot)
}

pub fn load_json(path: &Path) -> crate::Result<Snapshot> {
    let contents = std::fs::read_to_string(path).map_err(|source| crate::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(&contents)
}

pub fn parse_json(contents: &str) -> crate::Result<Snapshot> {
    Ok(serde_json::from_str(contents)?)
}

pub fn read_table<R, T>(reader: R, table: &'static str) -> crate::Result<Vec<T>>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);
    csv_reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|source| crate::Error::Csv { table, source })
}

fn read_table_file<T: DeserializeOwned>(path: &Path, table: &'static str) -> crate::Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "table file missing, treating as empty");
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(path).map_err(|source| crate::Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_table(file, table)
}
