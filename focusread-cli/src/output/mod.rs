//! Output formatting module

use anyhow::Result;
use focusread_core::{Inline, SentenceSpan};
use focusread_engine::{Document, FocusReader, PassReport};
use serde::{Deserialize, Serialize};

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output one rendered source file
    fn format_document(&mut self, document: &RenderedDocument) -> Result<()>;

    /// Finalize output (e.g., close JSON array or HTML body)
    fn finish(&mut self) -> Result<()>;
}

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// One input file after a transformation pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedDocument {
    /// Input name shown in the output
    pub source: String,
    /// Serialized content root
    pub html: String,
    /// Every block the pass looked at, in document order
    pub blocks: Vec<RenderedBlock>,
    /// Pass counters
    pub summary: PassSummary,
    /// Whether the reading ruler overlay ended up visible
    pub ruler_visible: bool,
}

/// One block of a rendered document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedBlock {
    /// Element tag, e.g. `p` or `h2`
    pub tag: String,
    /// Text content before transformation
    pub text: String,
    /// Whether the block was transformed
    pub processed: bool,
    /// Sentences with their classes; empty for untouched blocks
    pub sentences: Vec<RenderedSentence>,
}

/// One sentence of a transformed block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedSentence {
    /// Zero-based index within the block
    pub index: usize,
    /// Sentence text without markup
    pub text: String,
    /// Classes carried by the sentence container
    pub classes: Vec<String>,
    /// Text with emphasised word prefixes wrapped in `**`
    pub emphasized: String,
}

/// Serializable copy of a [`PassReport`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Blocks transformed
    pub applied: usize,
    /// Blank or excluded blocks
    pub skipped: usize,
    /// Blocks that failed and were left untouched
    pub failed: usize,
}

impl From<PassReport> for PassSummary {
    fn from(report: PassReport) -> Self {
        Self {
            applied: report.applied + report.unchanged,
            skipped: report.skipped,
            failed: report.failed,
        }
    }
}

impl RenderedDocument {
    /// Collect the outcome of a pass over `doc`
    pub fn collect(
        source: impl Into<String>,
        doc: &Document,
        reader: &FocusReader,
        content_root: &str,
        report: PassReport,
    ) -> Result<Self> {
        let root = doc.element_by_id(content_root).unwrap_or(doc.root());
        let html = doc.inner_html(root)?;

        let blocks = reader
            .blocks()
            .map(|block| RenderedBlock {
                tag: doc.tag(block.node()).unwrap_or_default().to_string(),
                text: block.original().to_string(),
                processed: block.is_processed(),
                sentences: block
                    .rendered()
                    .map(|styled| styled.sentences().map(RenderedSentence::from_span).collect())
                    .unwrap_or_default(),
            })
            .collect();

        Ok(Self {
            source: source.into(),
            html,
            blocks,
            summary: report.into(),
            ruler_visible: reader.ruler().is_visible(doc),
        })
    }
}

impl RenderedSentence {
    fn from_span(span: &SentenceSpan) -> Self {
        let mut emphasized = String::new();
        for inline in &span.inlines {
            match inline {
                Inline::Plain { text } => emphasized.push_str(text),
                Inline::Emphasis { bold, rest } => {
                    emphasized.push_str("**");
                    emphasized.push_str(bold);
                    emphasized.push_str("**");
                    emphasized.push_str(rest);
                }
            }
        }
        Self {
            index: span.index,
            text: span.text_content(),
            classes: span.style.class_names(),
            emphasized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{build_document, CONTENT_ROOT_ID};
    use focusread_engine::{FeatureFlags, ScanConfig};

    fn render(text: &str, flags: FeatureFlags) -> RenderedDocument {
        let mut doc = build_document(text, None).unwrap();
        let scan = ScanConfig {
            content_root: Some(CONTENT_ROOT_ID.to_string()),
            ..ScanConfig::default()
        };
        let mut reader = FocusReader::new(&doc, flags, scan);
        let report = reader.apply_transformations(&mut doc);
        RenderedDocument::collect("test.txt", &doc, &reader, CONTENT_ROOT_ID, report).unwrap()
    }

    #[test]
    fn test_collect_blocks_and_sentences() {
        let rendered = render("# Title\n\nOne. Two!", FeatureFlags::default());
        assert_eq!(rendered.source, "test.txt");
        assert_eq!(rendered.blocks.len(), 2);
        assert_eq!(rendered.blocks[0].tag, "h1");
        assert_eq!(rendered.blocks[1].sentences.len(), 2);
        assert_eq!(rendered.blocks[1].sentences[1].text, "Two");
        assert_eq!(rendered.summary.applied, 2);
        assert!(rendered.html.starts_with("<h1"));
    }

    #[test]
    fn test_emphasized_uses_double_asterisks() {
        let rendered = render("Reading matters.", FeatureFlags::default());
        let sentence = &rendered.blocks[0].sentences[0];
        assert_eq!(sentence.emphasized, "**Re**ading **ma**tters");
        assert_eq!(sentence.classes, vec!["fr-sentence", "fr-highlight-0"]);
    }

    #[test]
    fn test_excluded_block_is_unprocessed() {
        let rendered = render("Run `cargo` now.", FeatureFlags::default());
        assert!(!rendered.blocks[0].processed);
        assert!(rendered.blocks[0].sentences.is_empty());
        assert_eq!(rendered.summary.skipped, 1);
    }

    #[test]
    fn test_summary_from_report() {
        let report = PassReport {
            applied: 2,
            unchanged: 1,
            skipped: 3,
            reset: 0,
            failed: 1,
        };
        let summary = PassSummary::from(report);
        assert_eq!(
            summary,
            PassSummary {
                applied: 3,
                skipped: 3,
                failed: 1
            }
        );
    }
}
