//! Focus mode: dim non-text media

use crate::dom::{Document, NodeId};
use crate::error::Result;

/// Class applied to dimmed media
pub const DIM_CLASS: &str = "fr-dim";

/// Add or remove [`DIM_CLASS`] on every media element under `root`.
///
/// Returns the number of elements touched.
pub fn set_dimming<S: AsRef<str>>(
    doc: &mut Document,
    root: NodeId,
    media_tags: &[S],
    dimmed: bool,
) -> Result<usize> {
    let media = doc.elements_by_tag(root, media_tags)?;
    for element in &media {
        if dimmed {
            doc.add_class(*element, DIM_CLASS)?;
        } else {
            doc.remove_class(*element, DIM_CLASS)?;
        }
    }
    log::debug!(
        "{} {} media elements",
        if dimmed { "dimmed" } else { "undimmed" },
        media.len()
    );
    Ok(media.len())
}

/// Remove [`DIM_CLASS`] from every element in the document, media or not
pub fn clear_dimming(doc: &mut Document) -> Result<usize> {
    let root = doc.root();
    let dimmed: Vec<NodeId> = doc
        .descendants(root)?
        .into_iter()
        .filter(|node| doc.has_class(*node, DIM_CLASS))
        .collect();
    for element in &dimmed {
        doc.remove_class(*element, DIM_CLASS)?;
    }
    Ok(dimmed.len())
}
