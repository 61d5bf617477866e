use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::{RecordTable, COLUMNS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Header row first, even for an empty table.
pub fn write_csv<W: Write>(table: &RecordTable, writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in table {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(table: &RecordTable, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, table)?;
    Ok(())
}

pub fn write_table<W: Write>(table: &RecordTable, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(table, writer),
        OutputFormat::Json => write_json(table, writer),
    }
}

/// Write `table` to a fresh `<uuid>.<ext>` file under `dir`, creating the
/// directory if needed. Concurrent exports never share a file name.
pub fn export_to_dir(table: &RecordTable, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", uuid::Uuid::new_v4(), format.extension()));
    let file = fs::File::create(&path)?;
    write_table(table, format, std::io::BufWriter::new(file))?;
    Ok(path)
}
