//! Per-block apply/reset lifecycle
//!
//! A block moves between two states only:
//! `Untouched --apply--> Processed --reset--> Untouched`, repeatable
//! indefinitely. The processed flag is held on the [`TextBlock`] and
//! mirrored on the element as `data-focusread="applied"`.

use crate::dom::{Document, MutationOrigin, NodeId, NodeKind};
use crate::error::Result;
use crate::exclusion::ExclusionPolicy;
use focusread_core::markup::{Inline, StyledBlock, StyledNode};
use focusread_core::{Feature, FeatureFlags};

/// Attribute marking a processed block element
pub const PROCESSED_ATTR: &str = "data-focusread";
/// Value of [`PROCESSED_ATTR`] on processed blocks
pub const PROCESSED_VALUE: &str = "applied";

/// Lifecycle state of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockState {
    /// Holds its original content
    #[default]
    Untouched,
    /// Content replaced by styled sentence containers
    Processed,
}

/// Result of [`apply_to_block`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Content replaced
    Applied {
        /// Number of sentence containers produced
        sentences: usize,
    },
    /// Global switch is off
    Disabled,
    /// Block was already processed
    AlreadyProcessed,
    /// Block has no non-whitespace text
    Blank,
    /// Block contains excluded content
    Excluded,
}

impl ApplyOutcome {
    /// Whether the block was changed
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }
}

/// Result of [`reset_block`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Content rewritten as plain text
    Restored {
        /// The reconstructed text
        text: String,
    },
    /// Block was not processed; nothing changed
    NotProcessed,
}

/// A readable unit of content bound to an element
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    node: NodeId,
    original: String,
    state: BlockState,
    rendered: Option<StyledBlock>,
}

impl TextBlock {
    /// Capture the block rooted at `node`, recording its current text
    pub fn capture(doc: &Document, node: NodeId) -> Result<Self> {
        let original = doc.text_content(node)?;
        let state = if doc.attribute(node, PROCESSED_ATTR) == Some(PROCESSED_VALUE) {
            BlockState::Processed
        } else {
            BlockState::Untouched
        };
        Ok(Self {
            node,
            original,
            state,
            rendered: None,
        })
    }

    /// Element backing this block
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Text at capture time
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Current state
    pub fn state(&self) -> BlockState {
        self.state
    }

    /// Whether the processed flag is set
    pub fn is_processed(&self) -> bool {
        self.state == BlockState::Processed
    }

    /// Styled content produced by the last apply, while processed
    pub fn rendered(&self) -> Option<&StyledBlock> {
        self.rendered.as_ref()
    }
}

/// Transform one block in place.
///
/// The new content is built off-tree and swapped in with a single
/// `replace_children`, so either the whole block changes or none of it.
pub fn apply_to_block(
    doc: &mut Document,
    block: &mut TextBlock,
    block_index: usize,
    flags: FeatureFlags,
    exclusion: &dyn ExclusionPolicy,
) -> Result<ApplyOutcome> {
    if !flags.effective(Feature::Global) {
        return Ok(ApplyOutcome::Disabled);
    }
    if block.is_processed() {
        return Ok(ApplyOutcome::AlreadyProcessed);
    }

    let text = doc.text_content(block.node)?;
    if text.trim().is_empty() {
        log::trace!("block {} skipped: blank", block.node);
        return Ok(ApplyOutcome::Blank);
    }
    if exclusion.is_excluded(doc, block.node)? {
        log::debug!("block {} skipped: contains excluded content", block.node);
        return Ok(ApplyOutcome::Excluded);
    }

    let styled = StyledBlock::build(&text, block_index, flags);
    styled.verify_lossless(&text)?;

    let node = block.node;
    doc.with_origin(MutationOrigin::Engine, |doc| -> Result<()> {
        let children = materialize(doc, &styled)?;
        for old in doc.replace_children(node, children)? {
            doc.discard(old)?;
        }
        doc.set_attribute(node, PROCESSED_ATTR, PROCESSED_VALUE)
    })?;

    let sentences = styled.sentence_count();
    log::debug!(
        "block {} applied: {} sentences (index {})",
        block.node,
        sentences,
        block_index
    );

    block.state = BlockState::Processed;
    block.rendered = Some(styled);
    Ok(ApplyOutcome::Applied { sentences })
}

/// Restore a processed block to plain text.
///
/// The text is read back from the sentence containers and the delimiter
/// text between them, then written as a single text node.
pub fn reset_block(doc: &mut Document, block: &mut TextBlock) -> Result<ResetOutcome> {
    if !block.is_processed() {
        return Ok(ResetOutcome::NotProcessed);
    }

    let text = read_back(doc, block.node)?;
    let node = block.node;
    doc.with_origin(MutationOrigin::Engine, |doc| -> Result<()> {
        let plain = doc.create_text(text.clone());
        for old in doc.replace_children(node, vec![plain])? {
            doc.discard(old)?;
        }
        doc.remove_attribute(node, PROCESSED_ATTR)
    })?;

    if text != block.original {
        log::debug!("block {} reset: text differs from capture", block.node);
    }

    block.state = BlockState::Untouched;
    block.rendered = None;
    Ok(ResetOutcome::Restored { text })
}

fn read_back(doc: &Document, node: NodeId) -> Result<String> {
    let mut text = String::new();
    let mut containers = 0;
    for child in doc.children(node)? {
        match doc.kind(*child)? {
            NodeKind::Text(delimiter) => text.push_str(delimiter),
            NodeKind::Element(_) => {
                if doc.has_class(*child, focusread_core::style::SENTENCE_CLASS) {
                    containers += 1;
                }
                text.push_str(&doc.text_content(*child)?);
            }
        }
    }
    log::trace!("block {node} read back from {containers} containers");
    Ok(text)
}

fn materialize(doc: &mut Document, styled: &StyledBlock) -> Result<Vec<NodeId>> {
    let mut nodes = Vec::with_capacity(styled.nodes.len());
    for node in &styled.nodes {
        match node {
            StyledNode::Sentence(span) => {
                let container = doc.create_element("span");
                for class in span.style.class_names() {
                    doc.add_class(container, &class)?;
                }
                for inline in &span.inlines {
                    match inline {
                        Inline::Plain { text } => {
                            let text = doc.create_text(text.as_str());
                            doc.append_child(container, text)?;
                        }
                        Inline::Emphasis { bold, rest } => {
                            let strong = doc.create_element("strong");
                            let bold_text = doc.create_text(bold.as_str());
                            doc.append_child(strong, bold_text)?;
                            doc.append_child(container, strong)?;
                            if !rest.is_empty() {
                                let rest_text = doc.create_text(rest.as_str());
                                doc.append_child(container, rest_text)?;
                            }
                        }
                    }
                }
                nodes.push(container);
            }
            StyledNode::Text { text } => nodes.push(doc.create_text(text.as_str())),
        }
    }
    Ok(nodes)
}
