use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    BoldRuns, Classifier, HeadingPolicy, Locale, RunBoldness, StyleName, TriggerPhrases,
};

/// Configuration for document extraction.
///
/// This struct holds the settings that control how headings are detected and
/// which phrases mark implicit requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Which heading signal segments the document.
    pub heading: HeadingPolicy,

    /// The style name prefix that marks a heading under
    /// [`HeadingPolicy::Style`].
    ///
    /// The match is a case-sensitive prefix match, e.g. `Heading` matches
    /// `Heading 1` and `Heading2`.
    style_prefix: String,

    /// How many runs must be bold under [`HeadingPolicy::Bold`].
    pub bold_runs: BoldRuns,

    /// The built-in trigger phrase table.
    pub locale: Locale,

    /// Custom trigger phrases.
    ///
    /// If this is empty, the phrases of `locale` are used.
    trigger_phrases: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            heading: HeadingPolicy::default(),
            style_prefix: default_style_prefix(),
            bold_runs: BoldRuns::default(),
            locale: Locale::default(),
            trigger_phrases: Vec::new(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the heading style prefix.
    #[must_use]
    pub fn style_prefix(&self) -> &str {
        &self.style_prefix
    }

    /// Sets the heading style prefix.
    pub fn set_style_prefix(&mut self, prefix: impl Into<String>) {
        self.style_prefix = prefix.into();
    }

    /// Replaces the custom trigger phrases.
    ///
    /// An empty list restores the built-in phrases of the configured locale.
    pub fn set_trigger_phrases(&mut self, phrases: Vec<String>) {
        self.trigger_phrases = phrases;
    }

    /// Returns the heading signal described by this configuration.
    #[must_use]
    pub fn classifier(&self) -> Classifier {
        match self.heading {
            HeadingPolicy::Style => StyleName::new(self.style_prefix.clone()).into(),
            HeadingPolicy::Bold => RunBoldness::new(self.bold_runs).into(),
        }
    }

    /// Returns the implicit trigger phrases described by this configuration.
    #[must_use]
    pub fn trigger_phrases(&self) -> TriggerPhrases {
        if self.trigger_phrases.is_empty() {
            TriggerPhrases::for_locale(self.locale)
        } else {
            TriggerPhrases::new(&self.trigger_phrases)
        }
    }
}

fn default_style_prefix() -> String {
    StyleName::DEFAULT_PREFIX.to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default)]
        heading: HeadingPolicy,

        #[serde(default = "default_style_prefix")]
        style_prefix: String,

        #[serde(default)]
        bold_runs: BoldRuns,

        #[serde(default)]
        locale: Locale,

        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        trigger_phrases: Vec<String>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                heading,
                style_prefix,
                bold_runs,
                locale,
                trigger_phrases,
            } => Self {
                heading,
                style_prefix,
                bold_runs,
                locale,
                trigger_phrases,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            heading: config.heading,
            style_prefix: config.style_prefix,
            bold_runs: config.bold_runs,
            locale: config.locale,
            trigger_phrases: config.trigger_phrases,
        }
    }
}
