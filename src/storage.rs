use std::{
    fmt, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use walkdir::WalkDir;

use crate::domain::Paragraph;

pub mod json;
pub mod markdown;
pub mod record;

pub use record::{OutputFormat, WriteError};

/// The format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// A markdown document.
    Markdown,
    /// A JSON paragraph stream.
    Json,
}

impl InputFormat {
    /// Infers the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::UnsupportedFormat`] if the extension is missing
    /// or not recognised.
    pub fn from_path(path: &Path) -> Result<Self, ReadError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("md" | "markdown") => Ok(Self::Markdown),
            Some("json") => Ok(Self::Json),
            _ => Err(ReadError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown input format '{other}' (expected 'md' or 'json')"
            )),
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => f.write_str("md"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Errors that can occur when reading an input document.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// An I/O error occurred.
    #[error("failed to read input")]
    Io(#[from] io::Error),

    /// A JSON paragraph stream or saved record could not be parsed.
    #[error("invalid JSON input")]
    Json(#[from] serde_json::Error),

    /// A saved YAML record could not be parsed.
    #[error("invalid YAML record")]
    Yaml(#[from] serde_yaml::Error),

    /// The input format could not be determined from the path.
    #[error("unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// A directory could not be traversed.
    #[error("failed to walk input directory")]
    Walk(#[from] walkdir::Error),
}

/// Reads the paragraphs of a document.
///
/// If `format` is `None` it is inferred from the file extension.
///
/// # Errors
///
/// Returns an error if the format cannot be determined or the document
/// cannot be read.
#[tracing::instrument(level = "debug")]
pub fn read_paragraphs(
    path: &Path,
    format: Option<InputFormat>,
) -> Result<Vec<Paragraph>, ReadError> {
    let format = match format {
        Some(format) => format,
        None => InputFormat::from_path(path)?,
    };
    let paragraphs = match format {
        InputFormat::Markdown => markdown::load(path)?,
        InputFormat::Json => json::load(path)?,
    };
    tracing::debug!(paragraphs = paragraphs.len(), %format, "read document");
    Ok(paragraphs)
}

/// Expands input paths into the documents to process.
///
/// Files are returned as given. Directories are walked recursively for
/// markdown files, which are returned sorted by path.
///
/// # Errors
///
/// Returns an error if a directory cannot be traversed.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, ReadError> {
    let mut inputs = Vec::new();
    for path in paths {
        if !path.is_dir() {
            inputs.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file()
                && matches!(InputFormat::from_path(entry.path()), Ok(InputFormat::Markdown))
            {
                found.push(entry.into_path());
            }
        }
        found.sort();
        tracing::debug!(dir = %path.display(), documents = found.len(), "walked input directory");
        inputs.extend(found);
    }
    Ok(inputs)
}
