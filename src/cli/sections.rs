use std::path::PathBuf;

use clap::Parser;
use reqextract::{Config, DocumentRecord, Section};
use tracing::instrument;

use super::{
    terminal::{is_narrow, Colorize},
    DocumentArgs,
};

#[derive(Debug, Parser)]
#[command(about = "Show the sections of a document with requirement counts")]
pub struct Sections {
    /// The document to summarise
    input: PathBuf,

    #[command(flatten)]
    pub(super) document: DocumentArgs,

    /// Output format (table, json)
    #[arg(long, value_name = "FORMAT", default_value = "table")]
    output: OutputFormat,

    /// Suppress headers and format for scripting
    #[arg(long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Per-section counts shown in the summary.
#[derive(Debug, PartialEq, Eq)]
struct Summary<'a> {
    title: Option<&'a str>,
    paragraphs: usize,
    explicit: usize,
    implicit: usize,
}

impl<'a> From<&'a Section> for Summary<'a> {
    fn from(section: &'a Section) -> Self {
        let explicit = section
            .requirements()
            .iter()
            .filter(|r| r.is_explicit())
            .count();
        Self {
            title: section.title(),
            paragraphs: section.paragraphs().len(),
            explicit,
            implicit: section.requirements().len() - explicit,
        }
    }
}

impl Sections {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let record = self.record(config)?;
        let summaries: Vec<Summary<'_>> = record.sections().iter().map(Summary::from).collect();

        if summaries.is_empty() {
            println!("No sections found in {}.", record.source());
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => {
                let output = Self::to_json(&record, &summaries);
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Table => {
                if self.quiet {
                    Self::output_quiet(&summaries);
                } else {
                    Self::output_table(&record, &summaries);
                }
            }
        }

        Ok(())
    }

    fn record(&self, config: Config) -> anyhow::Result<DocumentRecord> {
        let builder = self.document.builder(config);
        self.document.build(&builder, &self.input)
    }

    fn to_json(record: &DocumentRecord, summaries: &[Summary<'_>]) -> serde_json::Value {
        use serde_json::json;

        let sections: Vec<_> = summaries
            .iter()
            .map(|summary| {
                json!({
                    "title": summary.title,
                    "paragraphs": summary.paragraphs,
                    "explicit": summary.explicit,
                    "implicit": summary.implicit,
                })
            })
            .collect();

        json!({
            "source": record.source(),
            "sections": sections,
        })
    }

    fn output_quiet(summaries: &[Summary<'_>]) {
        for summary in summaries {
            println!("{}", quiet_line(summary));
        }
    }

    fn output_table(record: &DocumentRecord, summaries: &[Summary<'_>]) {
        const UNTITLED: &str = "(untitled)";
        let narrow = is_narrow();

        println!("Sections in {}", record.source());
        println!("{}", "─".repeat(12 + record.source().len()).dim());

        if narrow {
            // Stacked output for narrow terminals
            for summary in summaries {
                let title = summary.title.unwrap_or(UNTITLED);
                println!("{}", title.info());
                println!(
                    "  {} paragraphs, {} explicit, {} implicit",
                    summary.paragraphs, summary.explicit, summary.implicit
                );
            }
        } else {
            let width = summaries
                .iter()
                .map(|s| s.title.unwrap_or(UNTITLED).chars().count())
                .max()
                .unwrap_or_default()
                .clamp(5, 48);

            println!(
                "{:<width$}  {:>10}  {:>8}  {:>8}",
                "Title", "Paragraphs", "Explicit", "Implicit"
            );
            for summary in summaries {
                let title = truncate(summary.title.unwrap_or(UNTITLED), width);
                let padded = format!("{title:<width$}");
                let padded = if summary.title.is_some() {
                    padded.info()
                } else {
                    padded.dim()
                };
                println!(
                    "{padded}  {:>10}  {:>8}  {:>8}",
                    summary.paragraphs, summary.explicit, summary.implicit
                );
            }
        }

        println!();

        let explicit: usize = summaries.iter().map(|s| s.explicit).sum();
        let implicit: usize = summaries.iter().map(|s| s.implicit).sum();
        if explicit + implicit == 0 {
            println!("Requirements: {} ⚠️", "0".warning());
        } else {
            println!(
                "Requirements: {} ({explicit} explicit, {implicit} implicit)",
                (explicit + implicit).to_string().success()
            );
        }
    }
}

/// A tab-separated summary line: title, paragraphs, explicit, implicit.
fn quiet_line(summary: &Summary<'_>) -> String {
    format!(
        "{}\t{}\t{}\t{}",
        summary.title.unwrap_or_default(),
        summary.paragraphs,
        summary.explicit,
        summary.implicit
    )
}

/// Shortens `text` to at most `width` characters, marking the cut with an
/// ellipsis.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(width.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}
