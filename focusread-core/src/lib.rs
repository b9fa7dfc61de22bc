//! Text engine for focus reading
//!
//! Takes a raw text block and a [`FeatureFlags`] value and produces a styled
//! representation: sentences split on simple punctuation, leading letters of
//! each word emphasised ("bionic reading"), and each sentence assigned a
//! cyclic highlight and line-gradient class.
//!
//! Every operation is synchronous, deterministic and total over its inputs.
//!
//! # Example
//!
//! ```rust
//! use focusread_core::{FeatureFlags, StyledBlock};
//!
//! let text = "Reading is fun. Focus helps!";
//! let block = StyledBlock::build(text, 0, FeatureFlags::default());
//!
//! assert_eq!(block.sentence_count(), 2);
//! assert_eq!(block.text_content(), text);
//! assert!(block.to_html().contains("<strong>Re</strong>ading"));
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod emphasis;
pub mod error;
pub mod markup;
pub mod segmenter;
pub mod style;
pub mod theme;

// Re-export key types
pub use config::{Feature, FeatureFlags};
pub use emphasis::{emphasis_len, emphasize, escape_html, split_emphasis, tokenize, Token};
pub use error::{CoreError, Result};
pub use markup::{Inline, SentenceSpan, StyledBlock, StyledNode};
pub use segmenter::{reconstruct, segment, sentences, Fragment, Sentence};
pub use style::{style_for, StyleDescriptor, CYCLE_LEN};
pub use theme::STYLESHEET;
