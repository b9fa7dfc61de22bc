//! Cyclic style assignment
//!
//! Sentence highlight classes cycle with the sentence index, line-gradient
//! classes cycle with the block index. Both are pure functions of their
//! inputs.

use crate::config::{Feature, FeatureFlags};

/// Number of alternating highlight and gradient classes
pub const CYCLE_LEN: usize = 3;

/// Class carried by every sentence container
pub const SENTENCE_CLASS: &str = "fr-sentence";
/// Prefix of the highlight classes (`fr-highlight-0` ..)
pub const HIGHLIGHT_PREFIX: &str = "fr-highlight-";
/// Prefix of the line-gradient classes (`fr-beeline-0` ..)
pub const BEELINE_PREFIX: &str = "fr-beeline-";
/// Extra spacing class
pub const SPACING_CLASS: &str = "fr-extra-spacing";

/// Visual treatment of one sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDescriptor {
    /// Highlight class, `sentence_index mod 3`, when highlighting is on
    pub highlight: Option<u8>,
    /// Gradient class, `block_index mod 3`, when beeline is on
    pub gradient: Option<u8>,
    /// Whether the spacing class applies
    pub spacing: bool,
}

impl StyleDescriptor {
    /// Class list, starting with [`SENTENCE_CLASS`]
    pub fn class_names(&self) -> Vec<String> {
        let mut classes = vec![SENTENCE_CLASS.to_string()];
        if let Some(highlight) = self.highlight {
            classes.push(format!("{HIGHLIGHT_PREFIX}{highlight}"));
        }
        if let Some(gradient) = self.gradient {
            classes.push(format!("{BEELINE_PREFIX}{gradient}"));
        }
        if self.spacing {
            classes.push(SPACING_CLASS.to_string());
        }
        classes
    }

    /// Space-separated class attribute value
    pub fn class_attr(&self) -> String {
        self.class_names().join(" ")
    }

    /// Whether no treatment beyond the base class applies
    pub fn is_plain(&self) -> bool {
        self.highlight.is_none() && self.gradient.is_none() && !self.spacing
    }
}

fn cycle(index: usize) -> u8 {
    (index % CYCLE_LEN) as u8
}

/// Compute the style of sentence `sentence_index` in block `block_index`
///
/// Every flag is read through the global switch, so a disabled reader
/// yields a plain descriptor.
pub fn style_for(sentence_index: usize, block_index: usize, flags: FeatureFlags) -> StyleDescriptor {
    StyleDescriptor {
        highlight: flags
            .effective(Feature::Highlight)
            .then(|| cycle(sentence_index)),
        gradient: flags.effective(Feature::Beeline).then(|| cycle(block_index)),
        spacing: flags.effective(Feature::Spacing),
    }
}
