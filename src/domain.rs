//! Domain models for requirements extraction.
//!
//! This module contains the paragraph input model, the heading classifiers,
//! section segmentation, requirement extraction, and the document builder
//! that ties them together.

pub mod classifier;
pub use classifier::{BoldRuns, Classifier, HeadingPolicy, HeadingSignal, RunBoldness, StyleName};

mod config;
pub use config::Config;

/// Document records and the builder that produces them.
pub mod document;
pub use document::{DocumentBuilder, DocumentRecord};

/// Paragraphs as produced by document readers.
pub mod paragraph;
pub use paragraph::{Paragraph, Run};

pub mod requirement;
pub use requirement::{Extractor, IdError, Locale, Requirement, RequirementId, TriggerPhrases};

pub mod section;
pub use section::{segment, Section};
