//! Highlight entity types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::anchor::Anchor;
use crate::dom::NodeId;

/// A tracked highlight
///
/// The anchor is read-only once captured; `annotation` is the only field
/// that mutates after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlight {
    /// Unique identifier (`highlight-<uuid>`)
    pub id: String,
    /// The selected text, trimmed of surrounding whitespace
    pub text: String,
    /// Structural location of the highlighted span
    #[serde(rename = "range")]
    pub anchor: Anchor,
    /// Optional note attached after creation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
    /// Creation timestamp
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Marker element in the live document. `None` for entries restored from
    /// storage whose markers could not be re-inserted.
    #[serde(skip)]
    pub(crate) marker: Option<NodeId>,
}

impl Highlight {
    pub(crate) fn new(text: impl Into<String>, anchor: Anchor) -> Self {
        Self {
            id: format!("highlight-{}", Uuid::new_v4()),
            text: text.into(),
            anchor,
            annotation: None,
            created_at: Utc::now(),
            marker: None,
        }
    }

    /// The marker element currently representing this highlight, if any
    pub fn marker(&self) -> Option<NodeId> {
        self.marker
    }
}

/// Outcome of restoring persisted highlights into a document
#[derive(Debug, Default)]
pub struct RestoreReport {
    /// Number of markers successfully re-inserted
    pub restored: usize,
    /// Ids of entries whose anchors no longer resolve in the document
    pub skipped: Vec<String>,
}
