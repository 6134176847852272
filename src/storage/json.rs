//! JSON paragraph streams.
//!
//! The stream is an array of paragraphs, each with a `text`, an optional
//! `style` and optional `runs`:
//!
//! ```json
//! [
//!   { "text": "Introduction", "style": "Heading 1" },
//!   { "text": "Login", "runs": [{ "text": "Login", "bold": true }] },
//!   { "text": "The system shall log all access." }
//! ]
//! ```

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::{domain::Paragraph, storage::ReadError};

/// Parses a JSON paragraph stream.
///
/// # Errors
///
/// Returns an error if the content is not a JSON array of paragraphs.
pub fn parse(content: &str) -> Result<Vec<Paragraph>, ReadError> {
    Ok(serde_json::from_str(content)?)
}

/// Reads a JSON paragraph stream from a reader.
///
/// # Errors
///
/// Returns an error if the reader fails or the content is not a JSON array of
/// paragraphs.
pub fn read<R: Read>(reader: R) -> Result<Vec<Paragraph>, ReadError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a JSON paragraph stream from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load(path: &Path) -> Result<Vec<Paragraph>, ReadError> {
    read(BufReader::new(File::open(path)?))
}
