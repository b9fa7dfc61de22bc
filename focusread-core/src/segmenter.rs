//! Punctuation-based sentence segmentation
//!
//! A boundary is one of `.`, `!` or `?` followed by whitespace or the end
//! of the input. The punctuation together with the whitespace run after it
//! forms the sentence's delimiter, so the segmentation is lossless:
//! concatenating every fragment reproduces the input byte for byte.
//!
//! # Limitations
//!
//! This is a heuristic, not sentence-boundary detection. Punctuation that
//! is not followed by whitespace never splits (`e.g.x`, `example.com`,
//! `3.14`), but abbreviations followed by a space do: `"Dr. Smith"` is
//! split after `"Dr"`. Ellipses split at their last dot only.

use regex::Regex;
use std::sync::OnceLock;

static BOUNDARY: OnceLock<Regex> = OnceLock::new();

fn boundary() -> &'static Regex {
    BOUNDARY.get_or_init(|| Regex::new(r"[.!?](?:\s+|$)").expect("boundary pattern is valid"))
}

/// A non-empty sentence and its trailing delimiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    /// Sentence body without the terminating punctuation
    pub text: &'a str,
    /// Terminating punctuation plus following whitespace (may be empty)
    pub delimiter: &'a str,
    /// Zero-based index among the block's sentences
    pub index: usize,
    /// Byte offset of `text` in the segmented input
    pub offset: usize,
}

impl<'a> Sentence<'a> {
    /// Byte length of the sentence including its delimiter
    pub fn len(&self) -> usize {
        self.text.len() + self.delimiter.len()
    }

    /// Always false: empty bodies are emitted as [`Fragment::Gap`]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One piece of a segmented text, in source order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// A sentence unit
    Sentence(Sentence<'a>),
    /// Empty or whitespace-only body together with its delimiter.
    ///
    /// Not counted as a sentence, kept so reconstruction stays exact.
    Gap(&'a str),
}

impl<'a> Fragment<'a> {
    /// Source text covered by this fragment
    pub fn source(&self) -> String {
        match self {
            Fragment::Sentence(sentence) => {
                let mut out = String::with_capacity(sentence.len());
                out.push_str(sentence.text);
                out.push_str(sentence.delimiter);
                out
            }
            Fragment::Gap(gap) => gap.to_string(),
        }
    }

    /// The sentence, if this fragment is one
    pub fn as_sentence(&self) -> Option<&Sentence<'a>> {
        match self {
            Fragment::Sentence(sentence) => Some(sentence),
            Fragment::Gap(_) => None,
        }
    }
}

/// Split `text` into sentence fragments
pub fn segment(text: &str) -> Vec<Fragment<'_>> {
    let mut fragments = Vec::new();
    let mut next_index = 0;
    let mut start = 0;

    for found in boundary().find_iter(text) {
        push_fragment(
            &mut fragments,
            &mut next_index,
            text,
            start,
            found.start(),
            found.end(),
        );
        start = found.end();
    }

    // Trailing text without a terminator is a sentence with an empty delimiter
    if start < text.len() {
        push_fragment(
            &mut fragments,
            &mut next_index,
            text,
            start,
            text.len(),
            text.len(),
        );
    }

    fragments
}

fn push_fragment<'a>(
    fragments: &mut Vec<Fragment<'a>>,
    next_index: &mut usize,
    text: &'a str,
    start: usize,
    split: usize,
    end: usize,
) {
    let body = &text[start..split];
    if body.trim().is_empty() {
        if start < end {
            fragments.push(Fragment::Gap(&text[start..end]));
        }
        return;
    }

    fragments.push(Fragment::Sentence(Sentence {
        text: body,
        delimiter: &text[split..end],
        index: *next_index,
        offset: start,
    }));
    *next_index += 1;
}

/// Sentences of `text`, skipping gaps
pub fn sentences(text: &str) -> impl Iterator<Item = Sentence<'_>> {
    segment(text)
        .into_iter()
        .filter_map(|fragment| fragment.as_sentence().copied())
}

/// Concatenate fragments back into source text
pub fn reconstruct(fragments: &[Fragment<'_>]) -> String {
    fragments.iter().map(Fragment::source).collect()
}
