//! Marginalia
//!
//! Text highlighting and annotation over an in-memory document tree.
//!
//! A [`Highlighter`] wraps the current selection of a [`dom::Document`] in a
//! styled marker element, tracks the marker in a registry, and can later
//! remove, annotate, persist, and restore those markers. Persistence goes
//! through the pluggable [`KeyValueStore`] trait; positions are persisted as
//! structural [`anchor::Anchor`] paths so they survive across documents with
//! the same node structure.
//!
//! # Modules
//!
//! - `dom`: arena-backed document tree with selection and range operations
//! - `anchor`: structural paths into the tree, with a parseable string form
//! - `config`: marker style configuration
//! - `highlight`: the highlight registry and lifecycle manager
//! - `storage`: key-value persistence trait and in-memory default
//! - `error`: crate-wide error types

pub mod anchor;
pub mod config;
pub mod dom;
pub mod error;
pub mod highlight;
pub mod storage;

pub use config::HighlightStyle;
pub use error::{HighlightError, Result, StoreError};
pub use highlight::{Highlight, Highlighter, RestoreReport};
pub use storage::{KeyValueStore, MemoryStore};
