//! Styled representation of a text block
//!
//! [`StyledBlock::build`] runs the whole pipeline: segmentation, per-word
//! emphasis and cyclic styling. The result is a flat list of sentence
//! containers interleaved with the original delimiter text, which a host
//! materialises into its own presentation tree or renders as HTML.

use crate::config::{Feature, FeatureFlags};
use crate::emphasis::{escape_html, split_emphasis, tokenize, Token};
use crate::error::{CoreError, Result};
use crate::segmenter::{segment, Fragment};
use crate::style::{style_for, StyleDescriptor};

/// Inline run inside a sentence container
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Inline {
    /// Unmarked text (whitespace, or words when bionic mode is off)
    Plain {
        /// Text content
        text: String,
    },
    /// Word with an emphasised prefix
    Emphasis {
        /// Emphasised prefix
        bold: String,
        /// Unmarked remainder
        rest: String,
    },
}

impl Inline {
    fn push_text(&self, out: &mut String) {
        match self {
            Inline::Plain { text } => out.push_str(text),
            Inline::Emphasis { bold, rest } => {
                out.push_str(bold);
                out.push_str(rest);
            }
        }
    }

    fn push_html(&self, out: &mut String) {
        match self {
            Inline::Plain { text } => out.push_str(&escape_html(text)),
            Inline::Emphasis { bold, rest } => {
                out.push_str("<strong>");
                out.push_str(&escape_html(bold));
                out.push_str("</strong>");
                out.push_str(&escape_html(rest));
            }
        }
    }
}

/// One styled sentence container
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceSpan {
    /// Zero-based sentence index within the block
    pub index: usize,
    /// Visual treatment
    pub style: StyleDescriptor,
    /// Inline content
    pub inlines: Vec<Inline>,
}

impl SentenceSpan {
    /// Text content with markup stripped
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for inline in &self.inlines {
            inline.push_text(&mut out);
        }
        out
    }
}

/// Node of a styled block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "node", rename_all = "snake_case"))]
pub enum StyledNode {
    /// Sentence container
    Sentence(SentenceSpan),
    /// Delimiter or gap text outside any container
    Text {
        /// Verbatim source text
        text: String,
    },
}

/// Styled replacement content for one block
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyledBlock {
    /// Containers and delimiter text in source order
    pub nodes: Vec<StyledNode>,
}

impl StyledBlock {
    /// Transform `text` for block number `block_index`
    pub fn build(text: &str, block_index: usize, flags: FeatureFlags) -> Self {
        let bionic = flags.effective(Feature::Bionic);
        let mut nodes = Vec::new();

        for fragment in segment(text) {
            match fragment {
                Fragment::Sentence(sentence) => {
                    nodes.push(StyledNode::Sentence(SentenceSpan {
                        index: sentence.index,
                        style: style_for(sentence.index, block_index, flags),
                        inlines: inlines_for(sentence.text, bionic),
                    }));
                    if !sentence.delimiter.is_empty() {
                        nodes.push(StyledNode::Text {
                            text: sentence.delimiter.to_string(),
                        });
                    }
                }
                Fragment::Gap(gap) => nodes.push(StyledNode::Text {
                    text: gap.to_string(),
                }),
            }
        }

        Self { nodes }
    }

    /// Sentence containers in order
    pub fn sentences(&self) -> impl Iterator<Item = &SentenceSpan> {
        self.nodes.iter().filter_map(|node| match node {
            StyledNode::Sentence(span) => Some(span),
            StyledNode::Text { .. } => None,
        })
    }

    /// Number of sentence containers
    pub fn sentence_count(&self) -> usize {
        self.sentences().count()
    }

    /// Text content with all markup stripped
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                StyledNode::Sentence(span) => {
                    for inline in &span.inlines {
                        inline.push_text(&mut out);
                    }
                }
                StyledNode::Text { text } => out.push_str(text),
            }
        }
        out
    }

    /// Render as escaped HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                StyledNode::Sentence(span) => {
                    out.push_str("<span class=\"");
                    out.push_str(&span.style.class_attr());
                    out.push_str("\">");
                    for inline in &span.inlines {
                        inline.push_html(&mut out);
                    }
                    out.push_str("</span>");
                }
                StyledNode::Text { text } => out.push_str(&escape_html(text)),
            }
        }
        out
    }

    /// Check that the stripped text equals `original`
    pub fn verify_lossless(&self, original: &str) -> Result<()> {
        let actual = self.text_content();
        if actual == original {
            return Ok(());
        }

        let offset = actual
            .bytes()
            .zip(original.bytes())
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| actual.len().min(original.len()));

        Err(CoreError::LossyReconstruction {
            expected_len: original.len(),
            actual_len: actual.len(),
            offset,
        })
    }
}

fn inlines_for(sentence: &str, bionic: bool) -> Vec<Inline> {
    if !bionic {
        return vec![Inline::Plain {
            text: sentence.to_string(),
        }];
    }

    tokenize(sentence)
        .into_iter()
        .map(|token| match token {
            Token::Word(word) => {
                let (bold, rest) = split_emphasis(word);
                Inline::Emphasis {
                    bold: bold.to_string(),
                    rest: rest.to_string(),
                }
            }
            Token::Space(space) => Inline::Plain {
                text: space.to_string(),
            },
        })
        .collect()
}
