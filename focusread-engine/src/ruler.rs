//! Reading ruler overlay
//!
//! A horizontal band that follows the pointer. The overlay element is
//! supplied by the host; when it is absent every operation is a no-op.

use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Class hiding the overlay
pub const HIDDEN_CLASS: &str = "hidden";

/// Pixels the band sits above the pointer
pub const RULER_OFFSET: f64 = 20.0;

/// Ruler state bound to an optional overlay element
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadingRuler {
    element: Option<NodeId>,
    enabled: bool,
}

impl ReadingRuler {
    /// Bind to the element with `id`, if the document has one
    pub fn locate(doc: &Document, id: &str) -> Self {
        let element = doc.element_by_id(id);
        if element.is_none() {
            log::debug!("ruler overlay '{id}' not found; ruler disabled");
        }
        Self {
            element,
            enabled: false,
        }
    }

    /// Overlay element, if bound
    pub fn element(&self) -> Option<NodeId> {
        self.element
    }

    /// Whether the ruler feature is on
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the overlay exists and is not hidden
    pub fn is_visible(&self, doc: &Document) -> bool {
        self.element
            .is_some_and(|element| !doc.has_class(element, HIDDEN_CLASS))
    }

    /// Show or hide the overlay
    pub fn set_enabled(&mut self, doc: &mut Document, enabled: bool) -> Result<()> {
        self.enabled = enabled;
        let Some(element) = self.element else {
            return Ok(());
        };
        if enabled {
            doc.remove_class(element, HIDDEN_CLASS)
        } else {
            doc.add_class(element, HIDDEN_CLASS)
        }
    }

    /// Move the overlay to the pointer's vertical position.
    ///
    /// Returns the new top offset, or `None` when disabled, hidden or absent.
    pub fn update_position(
        &self,
        doc: &mut Document,
        client_y: f64,
        scroll_y: f64,
    ) -> Result<Option<f64>> {
        let Some(element) = self.element else {
            return Ok(None);
        };
        if !self.enabled || !self.is_visible(doc) {
            return Ok(None);
        }

        let top = client_y + scroll_y - RULER_OFFSET;
        doc.set_attribute(element, "style", &format!("top: {top}px"))?;
        Ok(Some(top))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_ruler() -> Document {
        let mut doc = Document::new();
        let ruler = doc.create_element("div");
        doc.set_attribute(ruler, "id", "fr-ruler").unwrap();
        doc.add_class(ruler, HIDDEN_CLASS).unwrap();
        let root = doc.root();
        doc.append_child(root, ruler).unwrap();
        doc
    }

    #[test]
    fn test_position_tracks_pointer_only_when_enabled() {
        let mut doc = doc_with_ruler();
        let mut ruler = ReadingRuler::locate(&doc, "fr-ruler");
        assert!(ruler.element().is_some());
        assert_eq!(ruler.update_position(&mut doc, 100.0, 0.0).unwrap(), None);

        ruler.set_enabled(&mut doc, true).unwrap();
        assert!(ruler.is_visible(&doc));
        assert_eq!(
            ruler.update_position(&mut doc, 100.0, 50.0).unwrap(),
            Some(130.0)
        );
        let element = ruler.element().unwrap();
        assert_eq!(doc.attribute(element, "style"), Some("top: 130px"));

        ruler.set_enabled(&mut doc, false).unwrap();
        assert!(doc.has_class(element, HIDDEN_CLASS));
        assert_eq!(ruler.update_position(&mut doc, 10.0, 0.0).unwrap(), None);
    }

    #[test]
    fn test_missing_overlay_is_noop() {
        let mut doc = Document::new();
        let mut ruler = ReadingRuler::locate(&doc, "fr-ruler");
        ruler.set_enabled(&mut doc, true).unwrap();
        assert!(ruler.is_enabled());
        assert!(!ruler.is_visible(&doc));
        assert_eq!(ruler.update_position(&mut doc, 5.0, 5.0).unwrap(), None);
    }
}
