use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{Classifier, Config, Extractor, Paragraph, Requirement, Section, section::segment};

/// The structured result of extracting one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    source: String,
    sections: Vec<Section>,
}

impl DocumentRecord {
    /// Returns the reference to the origin document.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the sections in document order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterates over every requirement in the document, section by section.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.sections.iter().flat_map(Section::requirements)
    }
}

/// Builds [`DocumentRecord`]s from paragraph streams.
///
/// A builder only holds immutable configuration and may be shared between
/// threads to process independent documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentBuilder {
    classifier: Classifier,
    extractor: Extractor,
}

impl DocumentBuilder {
    /// Creates a builder from a heading signal and a requirement extractor.
    #[must_use]
    pub const fn new(classifier: Classifier, extractor: Extractor) -> Self {
        Self {
            classifier,
            extractor,
        }
    }

    /// Creates a builder as described by the configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.classifier(), Extractor::new(config.trigger_phrases()))
    }

    /// Segments the paragraphs and extracts the requirements of each
    /// section.
    ///
    /// The whole paragraph stream is consumed before the record is returned.
    #[must_use]
    #[instrument(level = "debug", skip(self, paragraphs))]
    pub fn build<I>(&self, source: &str, paragraphs: I) -> DocumentRecord
    where
        I: IntoIterator<Item = Paragraph>,
    {
        let mut sections = segment(paragraphs, &self.classifier);
        for section in &mut sections {
            section.requirements = self.extractor.extract(&section.paragraphs);
        }

        tracing::debug!(
            sections = sections.len(),
            requirements = sections.iter().map(|s| s.requirements.len()).sum::<usize>(),
            "document built"
        );

        DocumentRecord {
            source: source.to_string(),
            sections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Run, RunBoldness, TriggerPhrases};

    fn heading(text: &str) -> Paragraph {
        Paragraph::new(text).with_style("Heading 1")
    }

    fn body(text: &str) -> Paragraph {
        Paragraph::new(text).with_style("Normal")
    }

    #[test]
    fn introduction_with_implicit_and_explicit_requirements() {
        let record = DocumentBuilder::default().build(
            "spec.md",
            vec![
                heading("Introduction"),
                body("The system shall log all access."),
                body("REQ-10: data must be encrypted."),
            ],
        );

        assert_eq!(record.source(), "spec.md");
        let [section] = record.sections() else {
            panic!("expected one section, got {:?}", record.sections());
        };
        assert_eq!(section.title(), Some("Introduction"));
        assert_eq!(section.paragraphs().len(), 2);
        assert_eq!(
            section.requirements(),
            [
                Requirement::implicit("The system shall log all access."),
                Requirement::explicit(
                    "REQ-10".parse().unwrap(),
                    "REQ-10: data must be encrypted."
                ),
            ]
        );
    }

    #[test]
    fn empty_input_yields_empty_record() {
        let record = DocumentBuilder::default().build("empty.md", Vec::new());
        assert!(record.sections().is_empty());
        assert_eq!(record.requirements().count(), 0);
    }

    #[test]
    fn requirements_stay_in_their_section() {
        let record = DocumentBuilder::default().build(
            "doc",
            vec![
                body("When started, the system loads config."),
                heading("Storage"),
                body("Files are kept for a year."),
                heading("Security"),
                body("REQ-2 and REQ-3 apply."),
            ],
        );

        let counts: Vec<usize> = record
            .sections()
            .iter()
            .map(|s| s.requirements().len())
            .collect();
        assert_eq!(counts, vec![1, 0, 2]);
    }

    #[test]
    fn building_twice_is_identical() {
        let input = vec![
            body("preamble"),
            heading("Scope"),
            body("REQ-1 REQ-2 both"),
            body("If x then y."),
        ];
        let builder = DocumentBuilder::default();
        let first = builder.build("doc", input.clone());
        let second = builder.build("doc", input);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn bold_policy_from_parts() {
        let builder = DocumentBuilder::new(
            RunBoldness::default().into(),
            Extractor::new(TriggerPhrases::new(["o sistema"])),
        );
        let record = builder.build(
            "doc",
            vec![
                Paragraph::new("Login").with_runs(vec![Run::bold("Login")]),
                Paragraph::new("O sistema deve autenticar.")
                    .with_runs(vec![Run::plain("O sistema deve autenticar.")]),
            ],
        );

        assert_eq!(record.sections()[0].title(), Some("Login"));
        assert_eq!(record.requirements().count(), 1);
    }

    #[test]
    fn serialized_field_names_are_stable() {
        let record = DocumentBuilder::default().build(
            "in.md",
            vec![heading("Scope"), body("REQ-7 must hold.")],
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "source": "in.md",
                "sections": [{
                    "title": "Scope",
                    "paragraphs": ["REQ-7 must hold."],
                    "requirements": [{"id": "REQ-7", "text": "REQ-7 must hold."}]
                }]
            })
        );

        let back: DocumentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn builder_is_shareable_across_threads() {
        let builder = DocumentBuilder::default();
        let records: Vec<DocumentRecord> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let builder = &builder;
                    scope.spawn(move || {
                        builder.build(&format!("doc-{i}"), vec![body(&format!("REQ-{i} x"))])
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for (i, record) in records.iter().enumerate() {
            let id = record.requirements().next().unwrap().id.clone().unwrap();
            assert_eq!(id.digits(), i.to_string());
        }
    }
}
