//! Serialization of document records.

use std::{
    fmt,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::Path,
    str::FromStr,
};

use crate::{domain::DocumentRecord, storage::ReadError};

/// The external representation of a document record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML.
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "unknown output format '{other}' (expected 'json' or 'yaml')"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Errors that can occur when writing document records.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// An I/O error occurred.
    #[error("failed to write record")]
    Io(#[from] io::Error),

    /// The record could not be serialized as JSON.
    #[error("failed to serialize record as JSON")]
    Json(#[from] serde_json::Error),

    /// The record could not be serialized as YAML.
    #[error("failed to serialize record as YAML")]
    Yaml(#[from] serde_yaml::Error),
}

/// Writes records to a writer.
///
/// A single record is written on its own; several records are written as a
/// list in the given order.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write<W: Write>(
    writer: &mut W,
    records: &[DocumentRecord],
    format: OutputFormat,
) -> Result<(), WriteError> {
    match (records, format) {
        ([record], OutputFormat::Json) => serde_json::to_writer_pretty(&mut *writer, record)?,
        (records, OutputFormat::Json) => serde_json::to_writer_pretty(&mut *writer, records)?,
        ([record], OutputFormat::Yaml) => serde_yaml::to_writer(&mut *writer, record)?,
        (records, OutputFormat::Yaml) => serde_yaml::to_writer(&mut *writer, records)?,
    }
    if format == OutputFormat::Json {
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes records to a file, replacing any existing content.
///
/// # Errors
///
/// Returns an error if the file cannot be created or the records cannot be
/// written.
pub fn save(
    path: &Path,
    records: &[DocumentRecord],
    format: OutputFormat,
) -> Result<(), WriteError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, records, format)
}

/// Loads a single record previously written as JSON or YAML.
///
/// YAML is assumed for `.yaml` and `.yml` files, JSON otherwise.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not contain a record.
pub fn load(path: &Path) -> Result<DocumentRecord, ReadError> {
    let reader = BufReader::new(File::open(path)?);
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        Ok(serde_yaml::from_reader(reader)?)
    } else {
        Ok(serde_json::from_reader(reader)?)
    }
}
