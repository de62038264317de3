//! Range operations over the document tree
//!
//! A [`Range`] marks a contiguous span of content between two boundaries.
//! Offsets are character offsets when the boundary node is a text node and
//! child indices when it is an element.
//!
//! Content operations support the two shapes a single-container selection can
//! take: both boundaries inside one text node, or boundaries inside two text
//! nodes that are siblings under the same parent element (with any markup in
//! between). Other shapes yield `None`/empty results.

use super::{Document, NodeId};

/// One end of a range: a node plus an offset within it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    pub node: NodeId,
    pub offset: usize,
}

/// A contiguous span of document content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: Boundary,
    pub end: Boundary,
}

fn char_prefix(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn char_suffix(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}

fn char_slice(s: &str, from: usize, to: usize) -> String {
    s.chars().skip(from).take(to.saturating_sub(from)).collect()
}

impl Document {
    /// The deepest node containing both range boundaries
    pub fn range_common_ancestor(&self, range: &Range) -> Option<NodeId> {
        if range.start.node == range.end.node {
            return Some(range.start.node);
        }
        let mut ancestors = Vec::new();
        let mut cursor = Some(range.start.node);
        while let Some(id) = cursor {
            ancestors.push(id);
            cursor = self.parent(id);
        }
        let mut cursor = Some(range.end.node);
        while let Some(id) = cursor {
            if ancestors.contains(&id) {
                return Some(id);
            }
            cursor = self.parent(id);
        }
        None
    }

    /// Sibling text-node boundaries under one parent: `(parent, i, j)`
    ///
    /// Also covers the single-node case, where `i == j`.
    fn range_span(&self, range: &Range) -> Option<(NodeId, usize, usize)> {
        self.text(range.start.node)?;
        self.text(range.end.node)?;
        let parent = self.parent(range.start.node)?;
        if self.parent(range.end.node) != Some(parent) {
            return None;
        }
        let i = self.index_in_parent(range.start.node)?;
        let j = self.index_in_parent(range.end.node)?;
        if i > j {
            return None;
        }
        Some((parent, i, j))
    }

    /// The rendered text of the range
    pub fn range_text(&self, range: &Range) -> String {
        if range.start.node == range.end.node {
            if let Some(text) = self.text(range.start.node) {
                return char_slice(text, range.start.offset, range.end.offset);
            }
            return String::new();
        }
        let Some((parent, i, j)) = self.range_span(range) else {
            return String::new();
        };
        let mut out = String::new();
        if let Some(text) = self.text(range.start.node) {
            out.push_str(&char_suffix(text, range.start.offset));
        }
        for &child in &self.children(parent)[i + 1..j] {
            out.push_str(&self.text_content(child));
        }
        if let Some(text) = self.text(range.end.node) {
            out.push_str(&char_prefix(text, range.end.offset));
        }
        out
    }

    /// Deep-clone the range contents into fresh detached nodes
    ///
    /// Nested markup (including interactive elements) is preserved.
    pub fn clone_range_contents(&mut self, range: &Range) -> Vec<NodeId> {
        if range.start.node == range.end.node {
            let piece = match self.text(range.start.node) {
                Some(text) => char_slice(text, range.start.offset, range.end.offset),
                None => return Vec::new(),
            };
            if piece.is_empty() {
                return Vec::new();
            }
            return vec![self.create_text(piece)];
        }
        let Some((parent, i, j)) = self.range_span(range) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(text) = self.text(range.start.node) {
            let piece = char_suffix(text, range.start.offset);
            if !piece.is_empty() {
                out.push(self.create_text(piece));
            }
        }
        let middle: Vec<NodeId> = self.children(parent)[i + 1..j].to_vec();
        for child in middle {
            out.push(self.clone_subtree(child));
        }
        if let Some(text) = self.text(range.end.node) {
            let piece = char_prefix(text, range.end.offset);
            if !piece.is_empty() {
                out.push(self.create_text(piece));
            }
        }
        out
    }

    /// Remove the range contents from the tree
    ///
    /// Text outside the range in the boundary nodes is retained as split text
    /// nodes. Returns the insertion point `(parent, index)` where replacement
    /// content belongs, or `None` for unsupported range shapes.
    pub fn delete_range_contents(&mut self, range: &Range) -> Option<(NodeId, usize)> {
        let (parent, i, j) = self.range_span(range)?;
        let prefix = char_prefix(self.text(range.start.node)?, range.start.offset);
        let suffix = char_suffix(self.text(range.end.node)?, range.end.offset);
        let doomed: Vec<NodeId> = self.children(parent)[i..=j].to_vec();
        for node in doomed {
            self.detach(node);
        }
        let mut index = i;
        if !prefix.is_empty() {
            let t = self.create_text(prefix);
            self.insert_child(parent, index, t);
            index += 1;
        }
        if !suffix.is_empty() {
            let t = self.create_text(suffix);
            self.insert_child(parent, index, t);
        }
        Some((parent, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(doc: &mut Document, text: &str) -> (NodeId, NodeId) {
        let root = doc.root();
        let p = doc.append_element(root, "p");
        let t = doc.append_text(p, text);
        (p, t)
    }

    #[test]
    fn test_range_text_within_one_node() {
        let mut doc = Document::new();
        let (_, t) = paragraph(&mut doc, "hello world");
        let range = Range {
            start: Boundary { node: t, offset: 6 },
            end: Boundary { node: t, offset: 11 },
        };
        assert_eq!(doc.range_text(&range), "world");
    }

    #[test]
    fn test_range_text_across_siblings() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        let a = doc.append_text(p, "press ");
        let b = doc.append_element(p, "b");
        doc.append_text(b, "here");
        let c = doc.append_text(p, " now");

        let range = Range {
            start: Boundary { node: a, offset: 2 },
            end: Boundary { node: c, offset: 4 },
        };
        assert_eq!(doc.range_text(&range), "ess here now");
    }

    #[test]
    fn test_common_ancestor() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        let a = doc.append_text(p, "x");
        let b = doc.append_element(p, "b");
        let inner = doc.append_text(b, "y");

        let same = Range {
            start: Boundary { node: a, offset: 0 },
            end: Boundary { node: a, offset: 1 },
        };
        assert_eq!(doc.range_common_ancestor(&same), Some(a));

        let across = Range {
            start: Boundary { node: a, offset: 0 },
            end: Boundary {
                node: inner,
                offset: 1,
            },
        };
        assert_eq!(doc.range_common_ancestor(&across), Some(p));
    }

    #[test]
    fn test_delete_splits_boundary_text() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "hello world today");
        let range = Range {
            start: Boundary { node: t, offset: 6 },
            end: Boundary { node: t, offset: 11 },
        };
        let (parent, index) = doc.delete_range_contents(&range).unwrap();
        assert_eq!(parent, p);
        assert_eq!(index, 1);
        assert_eq!(doc.text_content(p), "hello  today");

        let marker = doc.create_element("span");
        doc.insert_child(parent, index, marker);
        doc.append_text(marker, "world");
        assert_eq!(doc.text_content(p), "hello world today");
    }

    #[test]
    fn test_delete_across_siblings_removes_middle_markup() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        let a = doc.append_text(p, "press ");
        let b = doc.append_element(p, "button");
        doc.append_text(b, "go");
        let c = doc.append_text(p, " now");

        let range = Range {
            start: Boundary { node: a, offset: 2 },
            end: Boundary { node: c, offset: 1 },
        };
        let (parent, index) = doc.delete_range_contents(&range).unwrap();
        assert_eq!(parent, p);
        assert!(!doc.is_attached(b));
        assert_eq!(doc.text_content(p), "prnow");
        assert_eq!(index, 1);
    }

    #[test]
    fn test_clone_preserves_nested_markup() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, "p");
        let a = doc.append_text(p, "press ");
        let b = doc.append_element(p, "button");
        doc.append_text(b, "go");
        let c = doc.append_text(p, " now");

        let range = Range {
            start: Boundary { node: a, offset: 0 },
            end: Boundary { node: c, offset: 4 },
        };
        let clones = doc.clone_range_contents(&range);
        assert_eq!(clones.len(), 3);
        assert_eq!(doc.text(clones[0]), Some("press "));
        assert_eq!(doc.tag(clones[1]), Some("button"));
        assert_eq!(doc.text(clones[2]), Some(" now"));
        // Originals untouched
        assert!(doc.is_attached(b));
    }

    #[test]
    fn test_unsupported_shape_degrades_quietly() {
        let mut doc = Document::new();
        let root = doc.root();
        let p1 = doc.append_element(root, "p");
        let t1 = doc.append_text(p1, "one");
        let p2 = doc.append_element(root, "p");
        let t2 = doc.append_text(p2, "two");

        let range = Range {
            start: Boundary { node: t1, offset: 0 },
            end: Boundary { node: t2, offset: 2 },
        };
        assert_eq!(doc.range_text(&range), "");
        assert!(doc.clone_range_contents(&range).is_empty());
        assert!(doc.delete_range_contents(&range).is_none());
        assert_eq!(doc.text_content(root), "onetwo");
    }
}
