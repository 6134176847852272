use std::{io, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use reqextract::{storage, Config, DocumentRecord, OutputFormat};
use tracing::instrument;

use super::DocumentArgs;

#[derive(Debug, Parser)]
#[command(about = "Extract sections and requirements into a structured record")]
pub struct Extract {
    /// Documents to extract. Directories are searched for markdown files.
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    #[command(flatten)]
    pub(super) document: DocumentArgs,

    /// Output format (json, yaml)
    #[arg(short, long, value_name = "FORMAT", default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write the output to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Extract {
    #[instrument(level = "debug", skip(self, config))]
    pub fn run(self, config: Config) -> anyhow::Result<()> {
        let inputs = storage::collect_inputs(&self.inputs)?;
        if inputs.is_empty() {
            anyhow::bail!("No documents found in the given inputs");
        }

        let builder = self.document.builder(config);
        let records = inputs
            .par_iter()
            .map(|path| self.document.build(&builder, path))
            .collect::<anyhow::Result<Vec<DocumentRecord>>>()?;

        tracing::info!(
            documents = records.len(),
            requirements = records.iter().map(|r| r.requirements().count()).sum::<usize>(),
            "extraction complete"
        );

        match &self.output {
            Some(path) => storage::record::save(path, &records, self.format)
                .with_context(|| format!("failed to write {}", path.display()))?,
            None => storage::record::write(&mut io::stdout().lock(), &records, self.format)?,
        }

        Ok(())
    }
}
