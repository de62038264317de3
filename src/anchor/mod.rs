//! Structural anchors into the document tree
//!
//! An anchor records where a highlight lives as two structural locations:
//! a path of child indices from the document root plus a character offset
//! inside the located text node. Paths survive serialization, so an anchor
//! saved from one session can be resolved against any later document with
//! the same node structure. Resolution is checked: a path that no longer
//! leads to a node, or an offset past the node's content, yields an
//! [`AnchorError`] rather than a bogus range.
//!
//! Path syntax: `/` is the root, `/0/2/1` descends by child index.

mod parser;

pub use parser::PathParseError;

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::dom::{Boundary, Document, NodeData, Range};

/// A child-index path from the document root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Build a path from child indices (empty = root)
    pub fn new(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// The child indices, outermost first
    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "/");
        }
        for index in &self.0 {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = PathParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}

/// Errors resolving an anchor against a document
#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("no node at path {path}")]
    Unresolvable { path: NodePath },

    #[error("offset {offset} out of bounds for node at {path}")]
    OffsetOutOfBounds { path: NodePath, offset: usize },
}

/// A persistable reference to a span of document content
///
/// Field names follow the persisted wire format: start/end container paths
/// with character offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    #[serde(rename = "startContainerPath")]
    pub start_path: NodePath,
    #[serde(rename = "startOffset")]
    pub start_offset: usize,
    #[serde(rename = "endContainerPath")]
    pub end_path: NodePath,
    #[serde(rename = "endOffset")]
    pub end_offset: usize,
}

impl Anchor {
    /// Capture an anchor from a live range; `None` if a boundary is detached
    pub fn from_range(doc: &Document, range: &Range) -> Option<Self> {
        Some(Self {
            start_path: NodePath(doc.path_to(range.start.node)?),
            start_offset: range.start.offset,
            end_path: NodePath(doc.path_to(range.end.node)?),
            end_offset: range.end.offset,
        })
    }

    /// Re-derive a live range from the stored paths
    pub fn resolve(&self, doc: &Document) -> Result<Range, AnchorError> {
        let start = resolve_location(doc, &self.start_path, self.start_offset)?;
        let end = resolve_location(doc, &self.end_path, self.end_offset)?;
        Ok(Range { start, end })
    }
}

fn resolve_location(
    doc: &Document,
    path: &NodePath,
    offset: usize,
) -> Result<Boundary, AnchorError> {
    let node = doc
        .node_at_path(path.indices())
        .ok_or_else(|| AnchorError::Unresolvable { path: path.clone() })?;
    let limit = match doc.data(node) {
        NodeData::Text(t) => t.chars().count(),
        NodeData::Element(_) => doc.children(node).len(),
    };
    if offset > limit {
        return Err(AnchorError::OffsetOutOfBounds {
            path: path.clone(),
            offset,
        });
    }
    Ok(Boundary { node, offset })
}
