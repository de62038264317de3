//! Highlight lifecycle management
//!
//! [`Highlighter`] owns the style configuration, the highlight registry, and
//! the persistence store. It is constructed explicitly and passed to whatever
//! controller needs it; there is no process-wide instance. Style and store
//! are fixed at construction.
//!
//! Expected conditions (no selection, cross-container selection, whitespace
//! selection, unknown ids) are silent no-ops with a diagnostic. Only storage
//! and serialization failures surface as errors.

mod types;

pub use types::{Highlight, RestoreReport};

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::anchor::Anchor;
use crate::config::HighlightStyle;
use crate::dom::{Document, NodeId};
use crate::error::Result;
use crate::storage::{KeyValueStore, MemoryStore};

/// Fixed key the registry is persisted under
pub const STORAGE_KEY: &str = "highlights";

const MARKER_TAG: &str = "span";

/// Element tags treated as interactive content
const INTERACTIVE_TAGS: [&str; 4] = ["input", "textarea", "select", "button"];

/// Manager for the full highlight lifecycle
pub struct Highlighter {
    style: HighlightStyle,
    highlights: HashMap<String, Highlight>,
    listeners: HashMap<String, NodeId>,
    store: Box<dyn KeyValueStore>,
}

impl Highlighter {
    /// Create a highlighter backed by an in-memory store
    pub fn new(style: HighlightStyle) -> Self {
        Self::with_store(style, Box::new(MemoryStore::new()))
    }

    /// Create a highlighter with a custom persistence store
    pub fn with_store(style: HighlightStyle, store: Box<dyn KeyValueStore>) -> Self {
        Self {
            style,
            highlights: HashMap::new(),
            listeners: HashMap::new(),
            store,
        }
    }

    /// The style configuration fixed at construction
    pub fn style(&self) -> &HighlightStyle {
        &self.style
    }

    /// Wrap the document's current selection in a styled marker
    ///
    /// No-op when there is no selection, the trimmed selection is empty, or
    /// the selection spans more than one containing element. On success the
    /// new highlight is registered and the selection is cleared.
    pub fn highlight_selection(&mut self, doc: &mut Document) {
        let Some(range) = doc.selection().copied() else {
            debug!("no selection, nothing to highlight");
            return;
        };

        let start_container = doc.parent_element(range.start.node);
        let end_container = doc.parent_element(range.end.node);
        if start_container.is_none() || start_container != end_container {
            warn!("selection spans multiple containers, highlight aborted");
            return;
        }

        let trimmed = doc.range_text(&range).trim().to_string();
        if trimmed.is_empty() {
            debug!("selection is empty after trimming, nothing to highlight");
            return;
        }

        let Some(anchor) = Anchor::from_range(doc, &range) else {
            debug!("selection boundaries are detached, nothing to highlight");
            return;
        };

        // Only the common ancestor's immediate children are inspected;
        // interactive elements nested deeper do not trigger the
        // markup-preserving path.
        let interactive = doc
            .range_common_ancestor(&range)
            .map(|ancestor| contains_interactive(doc, ancestor))
            .unwrap_or(false);

        let content: Vec<NodeId> = if interactive {
            doc.clone_range_contents(&range)
        } else {
            vec![doc.create_text(trimmed.clone())]
        };

        let Some((parent, index)) = doc.delete_range_contents(&range) else {
            warn!("selection range has an unsupported shape, highlight aborted");
            return;
        };

        let marker = self.build_marker(doc);
        for node in content {
            doc.append_child(marker, node);
        }
        doc.insert_child(parent, index, marker);

        let mut highlight = Highlight::new(trimmed, anchor);
        highlight.marker = Some(marker);
        debug!(id = %highlight.id, text = %highlight.text, "highlight created");
        self.highlights.insert(highlight.id.clone(), highlight);

        doc.clear_selection();
    }

    /// Flatten every marker back to plain text and clear the registry
    ///
    /// Markers that are already gone from the document are skipped.
    pub fn remove_highlights(&mut self, doc: &mut Document) {
        for (id, highlight) in self.highlights.drain() {
            match highlight.marker {
                Some(marker) if doc.is_attached(marker) => {
                    doc.replace_with_text(marker);
                }
                _ => debug!(id = %id, "marker already gone, skipping"),
            }
        }
    }

    /// Attach a note to a highlight; unknown ids are a no-op
    pub fn add_annotation(&mut self, id: &str, annotation: impl Into<String>) {
        match self.highlights.get_mut(id) {
            Some(highlight) => highlight.annotation = Some(annotation.into()),
            None => debug!(id = %id, "unknown highlight id, annotation dropped"),
        }
    }

    /// Subscribe highlight-on-pointer-release for the element with this id
    ///
    /// One stable subscription is kept per element id; re-attaching replaces
    /// it, and [`remove_selection_listener`](Self::remove_selection_listener)
    /// removes exactly that subscription. A missing element id is a no-op.
    pub fn add_selection_listener(&mut self, doc: &Document, element_id: &str) {
        match doc.element_by_id(element_id) {
            Some(element) => {
                self.listeners.insert(element_id.to_string(), element);
            }
            None => debug!(element_id, "no such element, listener not attached"),
        }
    }

    /// Drop the subscription for this element id, if any
    pub fn remove_selection_listener(&mut self, element_id: &str) {
        if self.listeners.remove(element_id).is_none() {
            debug!(element_id, "no listener attached");
        }
    }

    /// Deliver a pointer-release event from the host
    ///
    /// Runs [`highlight_selection`](Self::highlight_selection) iff a
    /// subscription exists for the element id.
    pub fn notify_pointer_release(&mut self, doc: &mut Document, element_id: &str) {
        if self.listeners.contains_key(element_id) {
            self.highlight_selection(doc);
        }
    }

    /// Snapshot of all registered highlights; order is not guaranteed stable
    pub fn highlights(&self) -> Vec<&Highlight> {
        self.highlights.values().collect()
    }

    /// Look up a highlight by id
    pub fn highlight(&self, id: &str) -> Option<&Highlight> {
        self.highlights.get(id)
    }

    /// Number of registered highlights
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// Persist the registry as a JSON array under [`STORAGE_KEY`]
    ///
    /// Overwrites any prior value. Store failures are surfaced, not
    /// swallowed.
    pub fn save_highlights(&mut self) -> Result<()> {
        let records: Vec<&Highlight> = self.highlights.values().collect();
        let json = serde_json::to_string(&records)?;
        self.store.set(STORAGE_KEY, &json)?;
        debug!(count = records.len(), "highlights saved");
        Ok(())
    }

    /// Restore persisted highlights into the document
    ///
    /// Every record is registered. A record whose anchor still resolves gets
    /// a freshly styled marker re-inserted at the anchored range; one whose
    /// anchor no longer resolves is kept without a marker and reported in
    /// [`RestoreReport::skipped`]. An absent storage key yields an empty
    /// report.
    pub fn load_highlights(&mut self, doc: &mut Document) -> Result<RestoreReport> {
        let Some(raw) = self.store.get(STORAGE_KEY)? else {
            debug!("no persisted highlights");
            return Ok(RestoreReport::default());
        };
        let records: Vec<Highlight> = serde_json::from_str(&raw)?;

        let mut report = RestoreReport::default();
        for mut highlight in records {
            match highlight.anchor.resolve(doc) {
                Ok(range) => match doc.delete_range_contents(&range) {
                    Some((parent, index)) => {
                        let marker = self.build_marker(doc);
                        let text = doc.create_text(highlight.text.clone());
                        doc.append_child(marker, text);
                        doc.insert_child(parent, index, marker);
                        highlight.marker = Some(marker);
                        report.restored += 1;
                    }
                    None => {
                        warn!(id = %highlight.id, "anchored range has an unsupported shape, marker not restored");
                        report.skipped.push(highlight.id.clone());
                    }
                },
                Err(err) => {
                    warn!(id = %highlight.id, error = %err, "anchor no longer resolves, marker not restored");
                    report.skipped.push(highlight.id.clone());
                }
            }
            self.highlights.insert(highlight.id.clone(), highlight);
        }
        debug!(
            restored = report.restored,
            skipped = report.skipped.len(),
            "highlights loaded"
        );
        Ok(report)
    }

    fn build_marker(&self, doc: &mut Document) -> NodeId {
        let marker = doc.create_element(MARKER_TAG);
        doc.set_attribute(marker, "style", self.style.to_inline_css());
        if !self.style.custom_class_name.is_empty() {
            doc.set_attribute(marker, "class", self.style.custom_class_name.clone());
        }
        marker
    }
}

fn contains_interactive(doc: &Document, ancestor: NodeId) -> bool {
    doc.children(ancestor).iter().any(|&child| {
        doc.tag(child)
            .map(|tag| INTERACTIVE_TAGS.contains(&tag))
            .unwrap_or(false)
    })
}
