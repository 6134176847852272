//! Section segmentation.
//!
//! A document is split into sections in a single forward pass. Each heading
//! closes the section in progress and opens a new one titled with the
//! heading text. A section is only emitted if it has a title or at least one
//! body paragraph, so a document opening with a heading never produces an
//! empty leading section, while a heading immediately followed by another
//! heading still yields a titled section with no body.

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::{HeadingSignal, Paragraph, Requirement};

/// A titled (or leading, untitled) run of paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    #[serde(
        default,
        serialize_with = "title_as_string",
        deserialize_with = "title_from_string"
    )]
    pub(crate) title: Option<NonEmptyString>,
    pub(crate) paragraphs: Vec<String>,
    #[serde(default)]
    pub(crate) requirements: Vec<Requirement>,
}

impl Section {
    /// Returns the section title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_ref().map(NonEmptyString::as_str)
    }

    /// Returns the body paragraphs in document order.
    #[must_use]
    pub fn paragraphs(&self) -> &[String] {
        &self.paragraphs
    }

    /// Returns the requirements found in the body paragraphs.
    #[must_use]
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }
}

/// Splits paragraphs into sections using the given heading signal.
///
/// Blank paragraphs are skipped. Paragraph text is trimmed. The returned
/// sections have no requirements attached yet.
#[must_use]
pub fn segment<I, S>(paragraphs: I, signal: &S) -> Vec<Section>
where
    I: IntoIterator<Item = Paragraph>,
    S: HeadingSignal + ?Sized,
{
    let mut sections = Vec::new();
    let mut current = Section::default();

    for paragraph in paragraphs {
        let text = paragraph.trimmed_text();
        if text.is_empty() {
            continue;
        }

        if signal.is_heading(&paragraph) {
            tracing::trace!(heading = text, "heading");
            let previous = std::mem::replace(
                &mut current,
                Section {
                    title: NonEmptyString::new(text.to_string()).ok(),
                    ..Section::default()
                },
            );
            close(previous, &mut sections);
        } else {
            current.paragraphs.push(text.to_string());
        }
    }

    close(current, &mut sections);
    sections
}

fn close(section: Section, sections: &mut Vec<Section>) {
    if section.title.is_none() && section.paragraphs.is_empty() {
        return;
    }
    tracing::debug!(
        title = section.title(),
        paragraphs = section.paragraphs.len(),
        "section closed"
    );
    sections.push(section);
}

fn title_as_string<S>(title: &Option<NonEmptyString>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match title {
        Some(title) => serializer.serialize_some(title.as_str()),
        None => serializer.serialize_none(),
    }
}

fn title_from_string<'de, D>(deserializer: D) -> Result<Option<NonEmptyString>, D::Error>
where
    D: Deserializer<'de>,
{
    let title = Option::<String>::deserialize(deserializer)?;
    Ok(title.and_then(|title| NonEmptyString::new(title).ok()))
}
