use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use reqextract::{prompt, storage, Config, DocumentBuilder};
use tracing::instrument;

use super::DocumentArgs;

#[derive(Debug, Parser)]
#[command(about = "Render the test-generation prompt for a document")]
pub struct Prompt {
    /// The document, or a saved record with --record
    input: PathBuf,

    /// Treat the input as a record previously written by 'extract'
    #[arg(long)]
    record: bool,

    /// Read the instruction template from a file instead of the built-in one
    #[arg(long, value_name = "PATH")]
    template: Option<PathBuf>,

    #[command(flatten)]
    pub(super) document: DocumentArgs,
}

impl Prompt {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        print!("{}", self.render(config)?);
        Ok(())
    }

    fn render(&self, config: Config) -> anyhow::Result<String> {
        let config = self.document.config(config);
        let record = if self.record {
            storage::record::load(&self.input)
                .with_context(|| format!("failed to load record {}", self.input.display()))?
        } else {
            let builder = DocumentBuilder::from_config(&config);
            self.document.build(&builder, &self.input)?
        };

        let template = match &self.template {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read template {}", path.display()))?,
            None => prompt::default_template(config.locale).to_string(),
        };

        if record.requirements().next().is_none() {
            tracing::warn!(source = record.source(), "no requirements found");
        }

        Ok(prompt::render(&record, template.trim_end(), config.locale))
    }
}
