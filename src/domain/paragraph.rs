use serde::{Deserialize, Deserializer, Serialize, de::IgnoredAny};

/// A single paragraph handed to the extractor by a document reader.
///
/// The text is kept as the reader produced it; trimming happens when the
/// paragraph is consumed. The format signal is split across the optional
/// named `style` and the formatted `runs`, and either may be missing.
/// Metadata of the wrong type is dropped with a warning rather than failing
/// the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// The paragraph text.
    pub text: String,

    /// The named style of the paragraph (e.g. `Heading 1`, `Normal`).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_style"
    )]
    pub style: Option<String>,

    /// The formatted sub-runs making up the paragraph, in order.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient_runs"
    )]
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// Creates an unstyled paragraph with no formatting runs.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
            runs: Vec::new(),
        }
    }

    /// Sets the named style of the paragraph.
    #[must_use]
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Replaces the formatting runs of the paragraph.
    #[must_use]
    pub fn with_runs(mut self, runs: Vec<Run>) -> Self {
        self.runs = runs;
        self
    }

    /// Returns the text with surrounding whitespace removed.
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    /// Whether the paragraph has no visible text.
    ///
    /// Blank paragraphs are dropped before segmentation and never become
    /// headings or body text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed_text().is_empty()
    }
}

/// A contiguous span of paragraph text sharing the same formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// The text of the run.
    pub text: String,

    /// Whether the run is bold.
    ///
    /// `None` means the flag is inherited or unknown, and is treated as not
    /// bold.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_bold"
    )]
    pub bold: Option<bool>,
}

impl Run {
    /// Creates a run with no explicit bold flag.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: None,
        }
    }

    /// Creates a run explicitly marked bold.
    #[must_use]
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: Some(true),
        }
    }

    /// Whether the run is explicitly bold.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.bold == Some(true)
    }
}

/// A metadata value that is either well-formed, null, or anything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(Option<T>),
    Malformed(IgnoredAny),
}

fn lenient<'de, D, T>(deserializer: D, field: &'static str) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Valid(value) => value,
        Lenient::Malformed(IgnoredAny) => {
            tracing::warn!(field, "ignoring malformed paragraph metadata");
            None
        }
    })
}

fn lenient_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    lenient(deserializer, "style")
}

fn lenient_runs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Run>, D::Error> {
    lenient(deserializer, "runs").map(Option::unwrap_or_default)
}

fn lenient_bold<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    lenient(deserializer, "bold")
}
