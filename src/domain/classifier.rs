//! Heading detection.
//!
//! A paragraph starts a new section when its heading signal says so. Two
//! signal sources exist and are kept separate:
//!
//! - [`StyleName`]: the paragraph's named style begins with a prefix such as
//!   `Heading`.
//! - [`RunBoldness`]: the paragraph's formatting runs are bold. By default a
//!   single bold run is enough ([`BoldRuns::Any`]), so a line with only one
//!   emphasised word counts as a heading. [`BoldRuns::All`] requires every run
//!   to be bold.
//!
//! Missing metadata never makes a paragraph a heading.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::Paragraph;

/// A source of the "this paragraph is a heading" signal.
pub trait HeadingSignal {
    /// Returns `true` if the paragraph starts a new section.
    fn is_heading(&self, paragraph: &Paragraph) -> bool;
}

/// Detects headings by a case-sensitive prefix of the named style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleName {
    prefix: String,
}

impl StyleName {
    /// The style prefix used by word processors for heading styles.
    pub const DEFAULT_PREFIX: &'static str = "Heading";

    /// Creates a detector matching styles that start with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the style prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for StyleName {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PREFIX)
    }
}

impl HeadingSignal for StyleName {
    fn is_heading(&self, paragraph: &Paragraph) -> bool {
        paragraph
            .style
            .as_deref()
            .is_some_and(|style| style.starts_with(&self.prefix))
    }
}

/// How many runs must be bold for [`RunBoldness`] to report a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoldRuns {
    /// At least one run is bold.
    #[default]
    Any,
    /// Every run is bold.
    All,
}

impl FromStr for BoldRuns {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "all" => Ok(Self::All),
            other => Err(format!("unknown bold run rule '{other}' (expected 'any' or 'all')")),
        }
    }
}

impl fmt::Display for BoldRuns {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::All => f.write_str("all"),
        }
    }
}

/// Detects headings by the boldness of the paragraph's runs.
///
/// A paragraph without runs is never a heading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunBoldness {
    runs: BoldRuns,
}

impl RunBoldness {
    /// Creates a detector with the given run quantifier.
    #[must_use]
    pub const fn new(runs: BoldRuns) -> Self {
        Self { runs }
    }

    /// Returns the run quantifier.
    #[must_use]
    pub const fn runs(&self) -> BoldRuns {
        self.runs
    }
}

impl HeadingSignal for RunBoldness {
    fn is_heading(&self, paragraph: &Paragraph) -> bool {
        let mut runs = paragraph.runs.iter().peekable();
        if runs.peek().is_none() {
            return false;
        }
        match self.runs {
            BoldRuns::Any => runs.any(super::Run::is_bold),
            BoldRuns::All => runs.all(super::Run::is_bold),
        }
    }
}

/// Which heading signal a document is segmented by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingPolicy {
    /// Strict segmentation: headings are paragraphs with a heading style.
    #[default]
    Style,
    /// Bold-title segmentation: headings are paragraphs with bold runs.
    Bold,
}

impl FromStr for HeadingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "style" | "strict" => Ok(Self::Style),
            "bold" | "bold-title" => Ok(Self::Bold),
            other => Err(format!(
                "unknown heading policy '{other}' (expected 'style' or 'bold')"
            )),
        }
    }
}

impl fmt::Display for HeadingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style => f.write_str("style"),
            Self::Bold => f.write_str("bold"),
        }
    }
}

/// A configured heading signal, one of the two supported sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classifier {
    /// See [`StyleName`].
    StyleName(StyleName),
    /// See [`RunBoldness`].
    RunBoldness(RunBoldness),
}

impl Default for Classifier {
    fn default() -> Self {
        Self::StyleName(StyleName::default())
    }
}

impl From<StyleName> for Classifier {
    fn from(value: StyleName) -> Self {
        Self::StyleName(value)
    }
}

impl From<RunBoldness> for Classifier {
    fn from(value: RunBoldness) -> Self {
        Self::RunBoldness(value)
    }
}

impl HeadingSignal for Classifier {
    fn is_heading(&self, paragraph: &Paragraph) -> bool {
        match self {
            Self::StyleName(signal) => signal.is_heading(paragraph),
            Self::RunBoldness(signal) => signal.is_heading(paragraph),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::Run;

    #[test_case(Some("Heading 1"), true; "heading level one")]
    #[test_case(Some("Heading2"), true; "heading without space")]
    #[test_case(Some("heading 1"), false; "prefix is case sensitive")]
    #[test_case(Some("Normal"), false; "body style")]
    #[test_case(Some("Subheading"), false; "prefix not at start")]
    #[test_case(None, false; "missing style")]
    fn style_name(style: Option<&str>, expected: bool) {
        let mut paragraph = Paragraph::new("Scope");
        paragraph.style = style.map(str::to_string);
        assert_eq!(StyleName::default().is_heading(&paragraph), expected);
    }

    #[test]
    fn style_name_ignores_runs() {
        let paragraph = Paragraph::new("Scope").with_runs(vec![Run::bold("Scope")]);
        assert!(!StyleName::default().is_heading(&paragraph));
    }

    #[test]
    fn custom_style_prefix() {
        let signal = StyleName::new("Titre");
        assert!(signal.is_heading(&Paragraph::new("x").with_style("Titre 1")));
        assert!(!signal.is_heading(&Paragraph::new("x").with_style("Heading 1")));
    }

    fn partly_bold() -> Paragraph {
        Paragraph::new("Note: keep this").with_runs(vec![
            Run::bold("Note:"),
            Run::plain(" keep this"),
        ])
    }

    #[test]
    fn any_bold_run_counts_partly_emphasised_line() {
        assert!(RunBoldness::new(BoldRuns::Any).is_heading(&partly_bold()));
    }

    #[test]
    fn all_bold_runs_rejects_partly_emphasised_line() {
        assert!(!RunBoldness::new(BoldRuns::All).is_heading(&partly_bold()));
    }

    #[test_case(BoldRuns::Any; "any")]
    #[test_case(BoldRuns::All; "all")]
    fn fully_bold_line_is_heading(runs: BoldRuns) {
        let paragraph = Paragraph::new("Scope").with_runs(vec![Run::bold("Sco"), Run::bold("pe")]);
        assert!(RunBoldness::new(runs).is_heading(&paragraph));
    }

    #[test_case(BoldRuns::Any; "any")]
    #[test_case(BoldRuns::All; "all")]
    fn no_runs_is_not_heading(runs: BoldRuns) {
        let paragraph = Paragraph::new("Scope").with_style("Heading 1");
        assert!(!RunBoldness::new(runs).is_heading(&paragraph));
    }

    #[test]
    fn unknown_bold_flag_is_not_bold() {
        let paragraph = Paragraph::new("Scope").with_runs(vec![Run::plain("Scope")]);
        assert!(!RunBoldness::default().is_heading(&paragraph));
    }

    #[test]
    fn classifier_dispatches_to_configured_signal() {
        let styled = Paragraph::new("Scope").with_style("Heading 1");
        let bold = Paragraph::new("Scope").with_runs(vec![Run::bold("Scope")]);

        let by_style = Classifier::default();
        assert!(by_style.is_heading(&styled));
        assert!(!by_style.is_heading(&bold));

        let by_bold = Classifier::from(RunBoldness::default());
        assert!(!by_bold.is_heading(&styled));
        assert!(by_bold.is_heading(&bold));
    }

    #[test_case("style", HeadingPolicy::Style)]
    #[test_case("strict", HeadingPolicy::Style)]
    #[test_case("BOLD", HeadingPolicy::Bold)]
    #[test_case("bold-title", HeadingPolicy::Bold)]
    fn parse_heading_policy(input: &str, expected: HeadingPolicy) {
        assert_eq!(input.parse::<HeadingPolicy>().unwrap(), expected);
    }

    #[test]
    fn parse_unknown_policy_fails() {
        assert!("italic".parse::<HeadingPolicy>().is_err());
        assert!("most".parse::<BoldRuns>().is_err());
    }
}
