//! In-memory document tree
//!
//! Arena-backed node storage with stable integer ids. The tree stands in for
//! the host document: element and text nodes, attribute access, structural
//! mutation, deep text extraction, lookup by `id` attribute, and the current
//! user selection as a [`Range`] of node + character offset boundaries.
//!
//! Detaching a node leaves its slot in the arena so outstanding [`NodeId`]s
//! stay valid; [`Document::is_attached`] distinguishes live nodes from
//! removed ones.

mod range;

pub use range::{Boundary, Range};

use std::collections::BTreeMap;

/// Stable identifier for a node in a [`Document`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

/// Node payload
#[derive(Debug, Clone)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

/// Element tag and attributes
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An arena-backed document tree with selection state
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    selection: Option<Range>,
}

impl Document {
    /// Create a document with an empty `body` root element
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            selection: None,
        };
        doc.root = doc.create_element("body");
        doc
    }

    /// The root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Element(ElementData {
            tag: tag.into(),
            attributes: BTreeMap::new(),
        }))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// Create an element and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: impl Into<String>) -> NodeId {
        let el = self.create_element(tag);
        self.append_child(parent, el);
        el
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let t = self.create_text(text);
        self.append_child(parent, t);
        t
    }

    /// Node payload accessor
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.node(id).data
    }

    /// Element tag, if `id` is an element
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element(el) => Some(el.tag.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Text content, if `id` is a text node
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Text(t) => Some(t.as_str()),
            NodeData::Element(_) => None,
        }
    }

    /// Set an attribute on an element node; no-op for text nodes
    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let NodeData::Element(el) = &mut self.node_mut(id).data {
            el.attributes.insert(name.into(), value.into());
        }
    }

    /// Attribute lookup on an element node
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element(el) => el.attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    /// Children of a node (empty for text nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Parent node
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// The immediate containing element of a node, if any
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.node(id).parent?;
        match self.node(parent).data {
            NodeData::Element(_) => Some(parent),
            NodeData::Text(_) => None,
        }
    }

    /// Position of a node within its parent's children
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.node(id).parent?;
        self.node(parent).children.iter().position(|&c| c == id)
    }

    /// Append `child` to `parent`, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(parent).children.push(child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Insert `child` into `parent` at `index` (clamped to the child count)
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        self.detach(child);
        let len = self.node(parent).children.len();
        let index = index.min(len);
        self.node_mut(parent).children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    /// Remove a node from its parent; the node and its subtree stay allocated
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.node(id).parent {
            self.node_mut(parent).children.retain(|&c| c != id);
            self.node_mut(id).parent = None;
        }
    }

    /// Replace a node with a plain text node holding its rendered text
    ///
    /// Returns the replacement node, or `None` when `id` has no parent.
    pub fn replace_with_text(&mut self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.index_in_parent(id)?;
        let text = self.text_content(id);
        self.detach(id);
        let replacement = self.create_text(text);
        self.insert_child(parent, index, replacement);
        Some(replacement)
    }

    /// Whether the node is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = id;
        loop {
            if cursor == self.root {
                return true;
            }
            match self.node(cursor).parent {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    /// Find the first attached element whose `id` attribute equals `value`
    pub fn element_by_id(&self, value: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if self.attribute(id, "id") == Some(value) {
                return Some(id);
            }
            // Reverse so the leftmost subtree is visited first
            stack.extend(self.node(id).children.iter().rev());
        }
        None
    }

    /// Concatenated text of the node's subtree
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.node(id).data {
            NodeData::Text(t) => out.push_str(t),
            NodeData::Element(_) => {
                for &child in &self.node(id).children {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Child-index path from the root to a node; `None` for detached nodes
    pub fn path_to(&self, id: NodeId) -> Option<Vec<usize>> {
        let mut indices = Vec::new();
        let mut cursor = id;
        while cursor != self.root {
            indices.push(self.index_in_parent(cursor)?);
            cursor = self.node(cursor).parent?;
        }
        indices.reverse();
        Some(indices)
    }

    /// Resolve a child-index path from the root
    pub fn node_at_path(&self, path: &[usize]) -> Option<NodeId> {
        let mut cursor = self.root;
        for &index in path {
            cursor = *self.node(cursor).children.get(index)?;
        }
        Some(cursor)
    }

    /// Deep-clone a subtree into fresh detached nodes
    pub fn clone_subtree(&mut self, id: NodeId) -> NodeId {
        let data = self.node(id).data.clone();
        let children = self.node(id).children.clone();
        let copy = self.alloc(data);
        for child in children {
            let child_copy = self.clone_subtree(child);
            self.append_child(copy, child_copy);
        }
        copy
    }

    /// Set the current user selection
    pub fn select(&mut self, start: NodeId, start_offset: usize, end: NodeId, end_offset: usize) {
        self.selection = Some(Range {
            start: Boundary {
                node: start,
                offset: start_offset,
            },
            end: Boundary {
                node: end,
                offset: end_offset,
            },
        });
    }

    /// The current user selection, if any
    pub fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    /// Clear the current user selection
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_construction() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        let t = doc.append_text(p, "hello");

        assert_eq!(doc.tag(p), Some("p"));
        assert_eq!(doc.text(t), Some("hello"));
        assert_eq!(doc.children(doc.root()), &[p]);
        assert_eq!(doc.parent_element(t), Some(p));
    }

    #[test]
    fn test_element_by_id() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        let p = doc.append_element(div, "p");
        doc.set_attribute(p, "id", "target");

        assert_eq!(doc.element_by_id("target"), Some(p));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_text_content_is_deep() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "one ");
        let b = doc.append_element(p, "b");
        doc.append_text(b, "two");
        doc.append_text(p, " three");

        assert_eq!(doc.text_content(p), "one two three");
    }

    #[test]
    fn test_detach_and_attachment() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        let t = doc.append_text(p, "x");

        assert!(doc.is_attached(t));
        doc.detach(p);
        assert!(!doc.is_attached(p));
        assert!(!doc.is_attached(t));
        assert_eq!(doc.text(t), Some("x"));
    }

    #[test]
    fn test_replace_with_text_flattens_markup() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        let span = doc.append_element(p, "span");
        doc.append_text(span, "styled ");
        let b = doc.append_element(span, "b");
        doc.append_text(b, "bold");

        let replacement = doc.replace_with_text(span).unwrap();
        assert_eq!(doc.text(replacement), Some("styled bold"));
        assert_eq!(doc.children(p), &[replacement]);
        assert!(!doc.is_attached(span));
    }

    #[test]
    fn test_path_roundtrip() {
        let mut doc = Document::new();
        let div = doc.append_element(doc.root(), "div");
        doc.append_text(div, "a");
        let p = doc.append_element(div, "p");
        let t = doc.append_text(p, "b");

        let path = doc.path_to(t).unwrap();
        assert_eq!(path, vec![0, 1, 0]);
        assert_eq!(doc.node_at_path(&path), Some(t));
        assert_eq!(doc.node_at_path(&[0, 9]), None);
    }

    #[test]
    fn test_clone_subtree_is_detached_copy() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        doc.append_text(p, "a");
        let b = doc.append_element(p, "button");
        doc.append_text(b, "go");

        let copy = doc.clone_subtree(p);
        assert_ne!(copy, p);
        assert!(!doc.is_attached(copy));
        assert_eq!(doc.text_content(copy), "ago");
        assert_eq!(doc.children(copy).len(), 2);
    }

    #[test]
    fn test_selection_state() {
        let mut doc = Document::new();
        let p = doc.append_element(doc.root(), "p");
        let t = doc.append_text(p, "hello");

        assert!(doc.selection().is_none());
        doc.select(t, 1, t, 4);
        let range = doc.selection().unwrap();
        assert_eq!(range.start.offset, 1);
        assert_eq!(range.end.offset, 4);
        doc.clear_selection();
        assert!(doc.selection().is_none());
    }
}
