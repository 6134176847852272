//! Requirements Document Extraction
//!
//! Documents are split into sections at heading paragraphs, and each
//! section's paragraphs are classified as requirements or prose.

pub mod domain;
pub use domain::{
    Config, DocumentBuilder, DocumentRecord, Paragraph, Requirement, RequirementId, Section,
};

pub mod prompt;

/// Document readers and record serializers.
pub mod storage;
pub use storage::{InputFormat, OutputFormat, ReadError, WriteError};
