use crate::view::GraphView;
use crate::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn view_to_json(view: &GraphView, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(view)
    } else {
        serde_json::to_string(view)
    };
    json.map_err(Error::Export)
}

pub fn write_view<W: Write>(writer: W, view: &GraphView, pretty: bool) -> Result<()> {
    let written = if pretty {
        serde_json::to_writer_pretty(writer, view)
    } else {
        serde_json::to_writer(writer, view)
    };
    written.map_err(Error::Export)
}

pub fn write_view_file(path: &Path, view: &GraphView, pretty: bool) -> Result<()> {
    let io_error = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_view(&mut writer, view, pretty)?;
    writer.flush().map_err(io_error)
}
