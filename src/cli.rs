use std::path::{Path, PathBuf};

mod extract;
mod prompt;
mod sections;
mod terminal;

use anyhow::Context;
use clap::ArgAction;
use extract::Extract;
use prompt::Prompt;
use reqextract::{
    domain::{BoldRuns, HeadingPolicy, Locale},
    storage, Config, DocumentBuilder, DocumentRecord, InputFormat,
};
use sections::Sections;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = match &self.config {
            Some(path) => Config::load(path).map_err(|e| anyhow::anyhow!(e))?,
            None => Config::default(),
        };

        self.command.run(config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries the extracted records
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Extract sections and requirements into a structured record
    Extract(Extract),

    /// Summarise the sections of a document
    Sections(Sections),

    /// Render the test-generation prompt for a document
    Prompt(Prompt),
}

impl Command {
    fn run(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::Extract(command) => command.run(config)?,
            Self::Sections(command) => command.run(config)?,
            Self::Prompt(command) => command.run(config)?,
        }
        Ok(())
    }
}

/// Options controlling how documents are read and segmented.
///
/// Each option overrides the corresponding configuration file setting.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DocumentArgs {
    /// Input format (md, json), inferred from the file extension by default
    #[arg(long, value_name = "FORMAT")]
    input_format: Option<InputFormat>,

    /// Heading detection policy (style, bold)
    #[arg(long, value_name = "POLICY")]
    heading: Option<HeadingPolicy>,

    /// Style name prefix marking headings under the style policy
    #[arg(long, value_name = "PREFIX")]
    style_prefix: Option<String>,

    /// Runs that must be bold under the bold policy (any, all)
    #[arg(long, value_name = "RULE")]
    bold_runs: Option<BoldRuns>,

    /// Built-in implicit requirement phrases (en, pt)
    #[arg(long, value_name = "LOCALE")]
    locale: Option<Locale>,
}

impl DocumentArgs {
    fn builder(&self, config: Config) -> DocumentBuilder {
        DocumentBuilder::from_config(&self.config(config))
    }

    /// Applies the command-line overrides to the loaded configuration.
    fn config(&self, mut config: Config) -> Config {
        if let Some(heading) = self.heading {
            config.heading = heading;
        }
        if let Some(prefix) = &self.style_prefix {
            config.set_style_prefix(prefix.clone());
        }
        if let Some(bold_runs) = self.bold_runs {
            config.bold_runs = bold_runs;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
            config.set_trigger_phrases(Vec::new());
        }
        tracing::debug!(?config, "effective configuration");
        config
    }

    fn build(&self, builder: &DocumentBuilder, path: &Path) -> anyhow::Result<DocumentRecord> {
        let paragraphs = storage::read_paragraphs(path, self.input_format)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(builder.build(&path.display().to_string(), paragraphs))
    }
}
