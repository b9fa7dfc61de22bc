//! Which elements are blocks, and which blocks are left alone

use crate::dom::{Document, NodeId};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Host-side scanning configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Tags treated as readable blocks
    pub block_tags: Vec<String>,
    /// A block whose subtree contains any of these tags is skipped
    pub excluded_tags: Vec<String>,
    /// Non-text media dimmed in focus mode
    pub media_tags: Vec<String>,
    /// `id` of the content root; `None` scans the whole document
    pub content_root: Option<String>,
    /// `id` of the reading ruler overlay
    pub ruler_id: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            block_tags: strings(&[
                "p",
                "li",
                "h1",
                "h2",
                "h3",
                "h4",
                "h5",
                "h6",
                "dd",
                "dt",
                "blockquote",
            ]),
            excluded_tags: strings(&["pre", "code", "textarea", "input", "a"]),
            media_tags: strings(&["img", "video", "iframe", "svg", "canvas"]),
            content_root: None,
            ruler_id: "fr-ruler".to_string(),
        }
    }
}

/// Decides whether a block must not be transformed
pub trait ExclusionPolicy {
    /// Whether `block` is excluded. An error fails the block for this pass.
    fn is_excluded(&self, doc: &Document, block: NodeId) -> Result<bool>;
}

/// Excludes blocks containing any of a set of tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagExclusion {
    tags: Vec<String>,
}

impl TagExclusion {
    /// Exclude blocks whose descendants include one of `tags`
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Self {
        Self {
            tags: tags.iter().map(|t| t.as_ref().to_ascii_lowercase()).collect(),
        }
    }

    /// Policy built from a scan configuration
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(&config.excluded_tags)
    }
}

impl ExclusionPolicy for TagExclusion {
    fn is_excluded(&self, doc: &Document, block: NodeId) -> Result<bool> {
        Ok(!doc.elements_by_tag(block, &self.tags)?.is_empty())
    }
}

/// Policy that never excludes anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExclusion;

impl ExclusionPolicy for NoExclusion {
    fn is_excluded(&self, _doc: &Document, _block: NodeId) -> Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_defaults_match_reader_selectors() {
        let config = ScanConfig::default();
        assert!(config.block_tags.contains(&"blockquote".to_string()));
        assert_eq!(config.block_tags.len(), 11);
        assert!(config.excluded_tags.contains(&"code".to_string()));
        assert!(config.media_tags.contains(&"canvas".to_string()));
        assert_eq!(config.ruler_id, "fr-ruler");
    }

    #[test]
    fn test_tag_exclusion_checks_subtree() {
        let mut doc = Document::new();
        let p = doc.create_element("p");
        let code = doc.create_element("CODE");
        let text = doc.create_text("x = 1");
        doc.append_child(code, text).unwrap();
        doc.append_child(p, code).unwrap();
        doc.append_child(doc.root(), p).unwrap();

        let plain = doc.create_element("p");
        doc.append_child(doc.root(), plain).unwrap();

        let policy = TagExclusion::from_config(&ScanConfig::default());
        assert_eq!(policy.is_excluded(&doc, p), Ok(true));
        assert_eq!(policy.is_excluded(&doc, plain), Ok(false));
        assert_eq!(NoExclusion.is_excluded(&doc, p), Ok(false));
    }

    #[test]
    fn test_missing_block_is_an_error() {
        let doc = Document::new();
        let policy = TagExclusion::new(&["a"]);
        let missing = NodeId::from_raw(42);
        assert_eq!(
            policy.is_excluded(&doc, missing),
            Err(EngineError::MissingNode(missing))
        );
    }

    #[test]
    fn test_scan_config_partial_deserialize() {
        let config: ScanConfig =
            serde_json::from_str(r#"{"content_root": "content"}"#).unwrap();
        assert_eq!(config.content_root.as_deref(), Some("content"));
        assert_eq!(config.block_tags, ScanConfig::default().block_tags);
    }
}
