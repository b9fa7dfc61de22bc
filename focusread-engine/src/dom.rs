//! Minimal presentation tree
//!
//! An arena of element and text nodes standing in for a browser document.
//! Structural changes (children added or replaced) are queued as
//! [`MutationRecord`]s tagged with the [`MutationOrigin`] active when they
//! happened, so a watcher can tell engine output from external content.
//!
//! Slots of discarded subtrees are recycled. Every [`NodeId`] carries the
//! generation of its slot, so an id kept past a discard resolves to
//! [`EngineError::MissingNode`] instead of aliasing the slot's next tenant.

use crate::error::{EngineError, Result};
use focusread_core::escape_html;
use std::collections::BTreeMap;
use std::fmt;

/// Handle to a node in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// Build a first-generation id from its raw arena index
    pub fn from_raw(index: usize) -> Self {
        Self {
            index,
            generation: 0,
        }
    }

    /// Raw arena index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Times the slot had been recycled when this id was issued
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}

/// Element payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ElementData {
    /// Lowercase tag name
    pub tag: String,
    /// Class list, without duplicates
    pub classes: Vec<String>,
    /// Attributes other than `class`
    pub attributes: BTreeMap<String, String>,
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Element node
    Element(ElementData),
    /// Text node
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Who caused a structural change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationOrigin {
    /// Host or page content
    #[default]
    External,
    /// The focusread engine itself
    Engine,
}

/// A queued structural change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// Node whose children changed
    pub target: NodeId,
    /// Nodes inserted under `target`
    pub added: Vec<NodeId>,
    /// Number of children removed from `target`
    pub removed: usize,
    /// Origin active when the change happened
    pub origin: MutationOrigin,
}

/// Tags rendered without a closing tag
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link", "source", "wbr"];

/// Arena-backed document rooted at a `body` element
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    root: NodeId,
    origin: MutationOrigin,
    mutations: Vec<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `body` root
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId::from_raw(0),
            origin: MutationOrigin::External,
            mutations: Vec::new(),
        };
        doc.root = doc.create_element("body");
        doc
    }

    /// Root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, attached or not
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Whether the arena is empty (never true: the root always exists)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots ever allocated, live or recycled
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(EngineError::MissingNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(EngineError::MissingNode(id))
    }

    /// Whether `id` refers to a live node
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Element(data) => Ok(data),
            NodeKind::Text(_) => Err(EngineError::NotAnElement(id)),
        }
    }

    /// Element payload of `id`
    pub fn element(&self, id: NodeId) -> Result<&ElementData> {
        match &self.node(id)?.kind {
            NodeKind::Element(data) => Ok(data),
            NodeKind::Text(_) => Err(EngineError::NotAnElement(id)),
        }
    }

    /// Node payload of `id`
    pub fn kind(&self, id: NodeId) -> Result<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    /// Tag name, or `None` for text nodes and unknown ids
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|data| data.tag.as_str())
    }

    /// Allocate a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: tag.to_ascii_lowercase(),
            ..ElementData::default()
        }))
    }

    /// Allocate a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::from_raw(self.slots.len() - 1)
    }

    /// Detach `id` and release it together with its subtree.
    ///
    /// Released slots are reused by later allocations; ids into the subtree
    /// stop resolving. The root is never released.
    pub fn discard(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Ok(());
        }
        if let Some(parent) = self.node(id)?.parent {
            self.detach(id)?;
            self.record(parent, Vec::new(), 1);
        }

        let mut released = self.descendants(id)?;
        released.push(id);
        for node in released {
            let slot = &mut self.slots[node.index];
            slot.node = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(node.index);
        }
        Ok(())
    }

    /// Parent of `id`, if attached
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// Children of `id`
    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(id)?.children)
    }

    /// Whether `ancestor` is `id` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return Ok(true);
            }
            current = self.node(node)?.parent;
        }
        Ok(false)
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.node(child)?;
        if self.is_inclusive_ancestor(child, parent)? {
            return Err(EngineError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn detach(&mut self, child: NodeId) -> Result<()> {
        if let Some(old_parent) = self.node(child)?.parent {
            self.node_mut(old_parent)?.children.retain(|c| *c != child);
            self.node_mut(child)?.parent = None;
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it if attached elsewhere
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.record(parent, vec![child], 0);
        Ok(())
    }

    /// Replace every child of `parent` with `children` in one step.
    ///
    /// All inputs are validated before anything changes, so a failed call
    /// leaves the tree untouched. Returns the former children that were not
    /// re-inserted; they are detached but still live until discarded.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        children: Vec<NodeId>,
    ) -> Result<Vec<NodeId>> {
        for child in &children {
            self.check_insert(parent, *child)?;
        }

        let old = std::mem::take(&mut self.node_mut(parent)?.children);
        for child in &old {
            self.node_mut(*child)?.parent = None;
        }
        for child in &children {
            self.detach(*child)?;
            self.node_mut(*child)?.parent = Some(parent);
        }
        self.node_mut(parent)?.children = children.clone();
        let removed = old
            .iter()
            .copied()
            .filter(|child| !children.contains(child))
            .collect();
        self.record(parent, children, old.len());
        Ok(removed)
    }

    fn record(&mut self, target: NodeId, added: Vec<NodeId>, removed: usize) {
        self.mutations.push(MutationRecord {
            target,
            added,
            removed,
            origin: self.origin,
        });
    }

    /// Run `f` with every structural change tagged as `origin`
    pub fn with_origin<R>(&mut self, origin: MutationOrigin, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.origin, origin);
        let result = f(self);
        self.origin = previous;
        result
    }

    /// Drain queued mutation records
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    /// Concatenated text of `id` and its descendants
    pub fn text_content(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.collect_text(id, &mut out)?;
        Ok(out)
    }

    fn collect_text(&self, id: NodeId, out: &mut String) -> Result<()> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element(_) => {
                for child in &node.children {
                    self.collect_text(*child, out)?;
                }
            }
        }
        Ok(())
    }

    /// Descendants of `id` in document order, excluding `id`
    pub fn descendants(&self, id: NodeId) -> Result<Vec<NodeId>> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id)?.children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next)?.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Descendant elements of `id` whose tag is in `tags`, in document order
    pub fn elements_by_tag<S: AsRef<str>>(&self, id: NodeId, tags: &[S]) -> Result<Vec<NodeId>> {
        Ok(self
            .descendants(id)?
            .into_iter()
            .filter(|node| {
                self.tag(*node)
                    .is_some_and(|tag| tags.iter().any(|t| t.as_ref().eq_ignore_ascii_case(tag)))
            })
            .collect())
    }

    /// First element whose `id` attribute equals `element_id`
    pub fn element_by_id(&self, element_id: &str) -> Option<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root).unwrap_or_default())
            .find(|node| self.attribute(*node, "id") == Some(element_id))
    }

    /// Add a class if not already present
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        let data = self.element_mut(id)?;
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(class.to_string());
        }
        Ok(())
    }

    /// Remove a class if present
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<()> {
        self.element_mut(id)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Whether the element carries `class`
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .map(|data| data.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Set an attribute. `class` is routed to the class list.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<()> {
        let data = self.element_mut(id)?;
        if name == "class" {
            data.classes.clear();
            for class in value.split_whitespace() {
                if !data.classes.iter().any(|c| c == class) {
                    data.classes.push(class.to_string());
                }
            }
        } else {
            data.attributes.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    /// Remove an attribute
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<()> {
        self.element_mut(id)?.attributes.remove(name);
        Ok(())
    }

    /// Attribute value, if the node is an element carrying it
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .ok()
            .and_then(|data| data.attributes.get(name))
            .map(String::as_str)
    }

    /// Serialize the children of `id` as HTML
    pub fn inner_html(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        for child in self.children(id)? {
            self.write_html(*child, &mut out)?;
        }
        Ok(out)
    }

    /// Serialize `id` and its subtree as HTML
    pub fn outer_html(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.write_html(id, &mut out)?;
        Ok(out)
    }

    fn write_html(&self, id: NodeId, out: &mut String) -> Result<()> {
        let node = self.node(id)?;
        match &node.kind {
            NodeKind::Text(text) => out.push_str(&escape_html(text)),
            NodeKind::Element(data) => {
                out.push('<');
                out.push_str(&data.tag);
                for (name, value) in &data.attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
                }
                if !data.classes.is_empty() {
                    out.push_str(&format!(" class=\"{}\"", escape_html(&data.classes.join(" "))));
                }
                out.push('>');
                if VOID_TAGS.contains(&data.tag.as_str()) {
                    return Ok(());
                }
                for child in &node.children {
                    self.write_html(*child, out)?;
                }
                out.push_str("</");
                out.push_str(&data.tag);
                out.push('>');
            }
        }
        Ok(())
    }
}
