//! Plain text output formatter

use super::{OutputFormatter, RenderedDocument};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one sentence per line, blocks separated by a blank line
///
/// Emphasised word prefixes are wrapped in `**`. Blocks that were not
/// transformed are printed as they were.
pub struct TextFormatter<W: Write> {
    writer: W,
    show_sources: bool,
    written: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            show_sources: false,
            written: 0,
        }
    }

    /// Print a `==> name <==` header before each document
    pub fn with_sources(mut self, show: bool) -> Self {
        self.show_sources = show;
        self
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &RenderedDocument) -> Result<()> {
        if self.written > 0 {
            writeln!(self.writer)?;
        }
        if self.show_sources {
            writeln!(self.writer, "==> {} <==", document.source)?;
        }

        for (i, block) in document.blocks.iter().enumerate() {
            if i > 0 {
                writeln!(self.writer)?;
            }
            if block.processed {
                for sentence in &block.sentences {
                    writeln!(self.writer, "{}", sentence.emphasized.trim())?;
                }
            } else if !block.text.trim().is_empty() {
                writeln!(self.writer, "{}", block.text.trim())?;
            }
        }

        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{PassSummary, RenderedBlock, RenderedSentence};

    fn sentence(index: usize, text: &str, emphasized: &str) -> RenderedSentence {
        RenderedSentence {
            index,
            text: text.to_string(),
            classes: vec!["fr-sentence".to_string()],
            emphasized: emphasized.to_string(),
        }
    }

    fn document(source: &str) -> RenderedDocument {
        RenderedDocument {
            source: source.to_string(),
            html: String::new(),
            blocks: vec![
                RenderedBlock {
                    tag: "p".to_string(),
                    text: "Go now. Stay.".to_string(),
                    processed: true,
                    sentences: vec![
                        sentence(0, "Go now", "**G**o **n**ow"),
                        sentence(1, " Stay", " **S**tay"),
                    ],
                },
                RenderedBlock {
                    tag: "p".to_string(),
                    text: "Run `make`.".to_string(),
                    processed: false,
                    sentences: Vec::new(),
                },
            ],
            summary: PassSummary::default(),
            ruler_visible: false,
        }
    }

    #[test]
    fn test_sentences_per_line() {
        let mut output = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut output);
            formatter.format_document(&document("a.txt")).unwrap();
            formatter.finish().unwrap();
        }
        let result = String::from_utf8(output).unwrap();
        assert_eq!(result, "**G**o **n**ow\n**S**tay\n\nRun `make`.\n");
    }

    #[test]
    fn test_source_headers() {
        let mut output = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut output).with_sources(true);
            formatter.format_document(&document("a.txt")).unwrap();
            formatter.format_document(&document("b.txt")).unwrap();
            formatter.finish().unwrap();
        }
        let result = String::from_utf8(output).unwrap();
        assert!(result.starts_with("==> a.txt <==\n"));
        assert!(result.contains("\n\n==> b.txt <==\n"));
    }
}
