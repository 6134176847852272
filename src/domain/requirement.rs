//! Requirement records and the extraction heuristics that produce them.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches `REQ`, an optional single hyphen or space, and a digit run, as a
/// whole word in any letter case.
static EXPLICIT_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bREQ[- ]?([0-9]+)\b").expect("identifier pattern must compile")
});

/// A normalized requirement identifier of the form `REQ-<digits>`.
///
/// The digits are kept verbatim, including leading zeros.
///
/// ```
/// use reqextract::RequirementId;
///
/// let id: RequirementId = "REQ-0042".parse().unwrap();
/// assert_eq!(id.digits(), "0042");
/// assert_eq!(id.to_string(), "REQ-0042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequirementId(String);

impl RequirementId {
    const PREFIX: &'static str = "REQ-";

    /// Builds an identifier from a captured digit run.
    fn from_digits(digits: &str) -> Self {
        Self(format!("{}{digits}", Self::PREFIX))
    }

    /// Returns the digit run of the identifier.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0[Self::PREFIX.len()..]
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequirementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RequirementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| IdError(s.to_string()))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IdError(s.to_string()));
        }
        Ok(Self::from_digits(digits))
    }
}

impl TryFrom<String> for RequirementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RequirementId> for String {
    fn from(id: RequirementId) -> Self {
        id.0
    }
}

/// Error returned when a string is not a normalized `REQ-<digits>` identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid requirement identifier '{0}': expected 'REQ-' followed by digits")]
pub struct IdError(String);

/// A requirement found in a section.
///
/// Explicit requirements carry the identifier found in the text. Implicit
/// requirements were recognised by their opening words and have no
/// identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// The identifier, if the paragraph contained one.
    pub id: Option<RequirementId>,
    /// The full, unmodified paragraph text.
    pub text: String,
}

impl Requirement {
    /// Creates an explicit requirement.
    #[must_use]
    pub fn explicit(id: RequirementId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
        }
    }

    /// Creates an implicit requirement.
    #[must_use]
    pub fn implicit(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
        }
    }

    /// Whether the requirement carries an identifier.
    #[must_use]
    pub const fn is_explicit(&self) -> bool {
        self.id.is_some()
    }
}

/// Built-in trigger phrase tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English obligation and conditional openers.
    #[default]
    En,
    /// Portuguese obligation and conditional openers.
    Pt,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "pt" => Ok(Self::Pt),
            other => Err(format!("unknown locale '{other}' (expected 'en' or 'pt')")),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::En => f.write_str("en"),
            Self::Pt => f.write_str("pt"),
        }
    }
}

/// The opening phrases that mark a paragraph as an implicit requirement.
///
/// Phrases are stored lowercased and matched as plain prefixes of the
/// lowercased paragraph text, so `if` also matches `iframe`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerPhrases(Vec<String>);

impl TriggerPhrases {
    const EN: &'static [&'static str] = &["the system", "must", "shall", "when", "if", "in case"];
    const PT: &'static [&'static str] = &["o sistema", "deve", "deverá", "quando", "caso", "se"];

    /// Creates a table from arbitrary phrases.
    ///
    /// Phrases are trimmed and lowercased. Empty phrases are dropped, since
    /// they would match every paragraph.
    #[must_use]
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            phrases
                .into_iter()
                .map(|phrase| phrase.as_ref().trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect(),
        )
    }

    /// Returns the built-in table for a locale.
    #[must_use]
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::En => Self::new(Self::EN),
            Locale::Pt => Self::new(Self::PT),
        }
    }

    /// Returns `true` if the text opens with one of the phrases.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        let lowercase = text.to_lowercase();
        self.0
            .iter()
            .any(|phrase| lowercase.starts_with(phrase.as_str()))
    }

    /// Iterates over the phrases.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for TriggerPhrases {
    fn default() -> Self {
        Self::for_locale(Locale::default())
    }
}

/// Finds the requirements in a section's paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extractor {
    phrases: TriggerPhrases,
}

impl Extractor {
    /// Creates an extractor using the given implicit trigger phrases.
    #[must_use]
    pub const fn new(phrases: TriggerPhrases) -> Self {
        Self { phrases }
    }

    /// Returns the implicit trigger phrases.
    #[must_use]
    pub const fn phrases(&self) -> &TriggerPhrases {
        &self.phrases
    }

    /// Extracts requirements from paragraphs, in paragraph order.
    ///
    /// A paragraph containing explicit identifiers yields one requirement per
    /// identifier, left to right, each carrying the full paragraph text.
    /// Otherwise a paragraph opening with a trigger phrase yields a single
    /// implicit requirement. Any other paragraph yields nothing.
    #[must_use]
    pub fn extract<S: AsRef<str>>(&self, paragraphs: &[S]) -> Vec<Requirement> {
        let mut requirements = Vec::new();
        for paragraph in paragraphs {
            self.extract_paragraph(paragraph.as_ref(), &mut requirements);
        }
        requirements
    }

    fn extract_paragraph(&self, text: &str, requirements: &mut Vec<Requirement>) {
        let before = requirements.len();
        requirements.extend(explicit_ids(text).map(|id| Requirement::explicit(id, text)));

        if requirements.len() == before && self.phrases.matches(text) {
            tracing::trace!(text, "implicit requirement");
            requirements.push(Requirement::implicit(text));
        }
    }
}

/// Iterates over the explicit identifiers in `text`, left to right.
pub fn explicit_ids(text: &str) -> impl Iterator<Item = RequirementId> + '_ {
    EXPLICIT_ID
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|digits| RequirementId::from_digits(digits.as_str()))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn ids(text: &str) -> Vec<String> {
        explicit_ids(text).map(String::from).collect()
    }

    #[test_case("REQ123", "REQ-123"; "no separator")]
    #[test_case("REQ-123", "REQ-123"; "hyphen")]
    #[test_case("req 123", "REQ-123"; "lowercase with space")]
    #[test_case("Req-0123", "REQ-0123"; "leading zeros kept")]
    #[test_case("see (REQ-7).", "REQ-7"; "punctuation boundaries")]
    fn identifier_normalization(text: &str, expected: &str) {
        assert_eq!(ids(text), vec![expected.to_string()]);
    }

    #[test_case("XREQ-1"; "prefixed by letter")]
    #[test_case("REQ-12a"; "suffixed by letter")]
    #[test_case("REQ_1"; "underscore separator")]
    #[test_case("REQ--1"; "double hyphen")]
    #[test_case("REQ  1"; "double space")]
    #[test_case("REQ-"; "no digits")]
    #[test_case("REQUIREMENT 5"; "longer word")]
    #[test_case("REQ-١٢"; "non ascii digits")]
    fn non_matches(text: &str) {
        assert!(ids(text).is_empty(), "unexpected match in {text:?}");
    }

    #[test]
    fn multiple_identifiers_yield_one_record_each_in_order() {
        let text = "REQ-1 and REQ-2 cover login.";
        let requirements = Extractor::default().extract(&[text]);
        assert_eq!(
            requirements,
            vec![
                Requirement::explicit("REQ-1".parse().unwrap(), text),
                Requirement::explicit("REQ-2".parse().unwrap(), text),
            ]
        );
    }

    #[test]
    fn explicit_identifier_suppresses_implicit_heuristic() {
        let text = "The system shall comply with REQ-9.";
        let requirements = Extractor::default().extract(&[text]);
        assert_eq!(requirements.len(), 1);
        assert_eq!(requirements[0].id.as_ref().unwrap().as_str(), "REQ-9");
    }

    #[test_case("The system shall log all access."; "the system")]
    #[test_case("MUST reject empty passwords."; "uppercase must")]
    #[test_case("shall be available 24/7."; "shall")]
    #[test_case("When the user logs out, clear the session."; "when")]
    #[test_case("If payment fails, retry once."; "if")]
    #[test_case("In case of outage, notify ops."; "in case")]
    fn implicit_requirement(text: &str) {
        assert_eq!(
            Extractor::default().extract(&[text]),
            vec![Requirement::implicit(text)]
        );
    }

    #[test_case("This chapter describes the login flow."; "prose")]
    #[test_case("Users may log in with email."; "no trigger")]
    #[test_case(""; "empty")]
    #[test_case("  the system shall"; "leading whitespace is not trimmed")]
    fn prose_yields_nothing(text: &str) {
        assert!(Extractor::default().extract(&[text]).is_empty());
    }

    #[test]
    fn portuguese_phrases() {
        let extractor = Extractor::new(TriggerPhrases::for_locale(Locale::Pt));
        let paragraphs = [
            "O sistema deve registrar acessos.",
            "Deverá existir um backup diário.",
            "Caso o pagamento falhe, repetir.",
            "Este capítulo descreve o login.",
        ];
        let requirements = extractor.extract(&paragraphs);
        assert_eq!(requirements.len(), 3);
        assert!(requirements.iter().all(|r| !r.is_explicit()));
        assert_eq!(requirements[2].text, paragraphs[2]);
    }

    #[test]
    fn custom_phrases_are_normalized() {
        let phrases = TriggerPhrases::new(["  The Operator ", "", "   "]);
        assert_eq!(phrases.iter().collect::<Vec<_>>(), vec!["the operator"]);
        assert!(phrases.matches("THE OPERATOR shall confirm."));
    }

    #[test]
    fn order_follows_paragraphs() {
        let paragraphs = ["When idle, sleep.", "Nothing here.", "REQ-3 holds."];
        let requirements = Extractor::default().extract(&paragraphs);
        let texts: Vec<_> = requirements.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["When idle, sleep.", "REQ-3 holds."]);
    }

    #[test]
    fn total_over_unusual_input() {
        let long = "x".repeat(100_000) + " REQ-1";
        let extractor = Extractor::default();
        assert_eq!(extractor.extract(&[long.as_str()]).len(), 1);
        assert!(extractor.extract(&["ünïcödé 要件 🚀"]).is_empty());
    }

    #[test_case("REQ-1"; "single digit")]
    #[test_case("REQ-000"; "zeros")]
    fn parse_valid_id(input: &str) {
        assert_eq!(input.parse::<RequirementId>().unwrap().as_str(), input);
    }

    #[test_case("req-1"; "lowercase")]
    #[test_case("REQ1"; "missing hyphen")]
    #[test_case("REQ-"; "missing digits")]
    #[test_case("REQ-1a"; "trailing letter")]
    #[test_case("SYS-001"; "other kind")]
    fn parse_invalid_id(input: &str) {
        assert_eq!(
            input.parse::<RequirementId>(),
            Err(IdError(input.to_string()))
        );
    }

    #[test]
    fn serializes_absent_id_as_null() {
        let json = serde_json::to_string(&Requirement::implicit("When x")).unwrap();
        assert_eq!(json, r#"{"id":null,"text":"When x"}"#);
    }

    #[test]
    fn deserialization_validates_id() {
        let ok: Requirement = serde_json::from_str(r#"{"id":"REQ-5","text":"t"}"#).unwrap();
        assert_eq!(ok.id.unwrap().digits(), "5");
        assert!(serde_json::from_str::<Requirement>(r#"{"id":"R5","text":"t"}"#).is_err());
    }
}
