//! Markdown documents as paragraph streams.
//!
//! Content is parsed as CommonMark, and the resulting blocks are mapped onto
//! paragraphs the way a word processor would report them:
//!
//! - ATX and setext headings become paragraphs styled `Heading N`.
//! - Paragraphs become paragraphs styled `Normal`, with soft line breaks
//!   joined by a single space.
//! - Each list item starts its own paragraph.
//! - Strong emphasis (`**bold**`, `__bold__`) becomes bold runs.
//! - Code blocks, HTML blocks and thematic breaks are skipped.
//! - A leading `---` block is skipped as front matter only if it is closed by
//!   another `---` line and holds a YAML mapping.

use std::{
    fs::File,
    io::{self, BufRead, BufReader, Read},
    path::Path,
};

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use crate::domain::{Paragraph, Run};

const BODY_STYLE: &str = "Normal";
const FRONT_MATTER_DELIMITER: &str = "---";

/// Parses markdown content into paragraphs.
#[must_use]
pub fn parse(content: &str) -> Vec<Paragraph> {
    let mut collector = Collector::default();
    for event in Parser::new(strip_front_matter(content)) {
        collector.event(event);
    }
    collector.finish()
}

/// Reads markdown from a reader into paragraphs.
///
/// # Errors
///
/// Returns an error if the reader fails or the content is not valid UTF-8.
pub fn read<R: BufRead>(reader: &mut R) -> io::Result<Vec<Paragraph>> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    Ok(parse(&content))
}

/// Reads a markdown file into paragraphs.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn load(path: &Path) -> io::Result<Vec<Paragraph>> {
    let mut reader = BufReader::new(File::open(path)?);
    read(&mut reader)
}

/// Returns the content after a closed front matter block, or the content
/// unchanged if it does not open with one.
fn strip_front_matter(content: &str) -> &str {
    let mut lines = content.split_inclusive('\n');
    let Some(opening) = lines.next() else {
        return content;
    };
    if opening.trim_end() != FRONT_MATTER_DELIMITER {
        return content;
    }

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            let yaml = &content[start..offset];
            if yaml.trim().is_empty() || serde_yaml::from_str::<serde_yaml::Mapping>(yaml).is_ok()
            {
                return &content[offset + line.len()..];
            }
            tracing::debug!("leading '---' block is not YAML front matter");
            return content;
        }
        offset += line.len();
    }
    content
}

/// Accumulates inline content from parser events into paragraphs.
#[derive(Debug, Default)]
struct Collector {
    paragraphs: Vec<Paragraph>,
    runs: Vec<Run>,
    heading: Option<usize>,
    strong: usize,
    skipping: usize,
}

impl Collector {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::HtmlBlock | Tag::MetadataBlock(_)) => {
                self.flush();
                self.skipping += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_)) => {
                self.skipping = self.skipping.saturating_sub(1);
            }
            _ if self.skipping > 0 => {}
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush();
                self.heading = Some(level as usize);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush();
                self.heading = None;
            }
            Event::Start(Tag::Paragraph | Tag::Item)
            | Event::End(TagEnd::Paragraph | TagEnd::Item)
            | Event::Rule => self.flush(),
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Text(text) | Event::Code(text) => self.push(&text),
            Event::SoftBreak | Event::HardBreak => self.push(" "),
            _ => {}
        }
    }

    /// Appends inline text, merging it into the previous run when the
    /// boldness matches.
    fn push(&mut self, text: &str) {
        let run = if self.strong > 0 {
            Run::bold(text)
        } else {
            Run::plain(text)
        };
        match self.runs.last_mut() {
            Some(last) if last.bold == run.bold => last.text.push_str(&run.text),
            _ => self.runs.push(run),
        }
    }

    fn flush(&mut self) {
        let runs = std::mem::take(&mut self.runs);
        let text: String = runs.iter().map(|run| run.text.as_str()).collect();
        if text.trim().is_empty() {
            return;
        }
        let style = self
            .heading
            .map_or_else(|| BODY_STYLE.to_string(), |level| format!("Heading {level}"));
        self.paragraphs
            .push(Paragraph::new(text).with_style(style).with_runs(runs));
    }

    fn finish(mut self) -> Vec<Paragraph> {
        self.flush();
        self.paragraphs
    }
}
