//! Document-access boundary.
//!
//! The core never touches a document container directly. Everything it
//! needs, opening a template, enumerating placeholder fields, applying
//! text writes and persisting the result, goes through the traits in this
//! module. `json` provides the bundled reference backend.

pub mod json;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::index::FieldLocation;

/// 2D origin of a placeholder field on its page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// One named, positioned placeholder slot as reported by the template.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderField {
    pub name: String,
    pub origin: Point,
}

/// A single resolved text write: which field, where it sits, what to put
/// in it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldWrite {
    pub name: String,
    pub location: FieldLocation,
    pub value: String,
}

/// Errors surfaced by a document backend.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to open template: {0}")]
    Open(#[source] std::io::Error),
    #[error("template is not a valid document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("template has no pages")]
    EmptyTemplate,
    #[error("page {0} is out of range")]
    PageOutOfRange(usize),
    #[error("no field at page {page} origin ({x}, {y})")]
    FieldMissing { page: usize, x: f64, y: f64 },
    #[error("failed to encode filled document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("i/o failure while persisting document: {0}")]
    Io(#[source] std::io::Error),
}

/// Opens template documents. One backend serves many fill operations; each
/// call hands out an independent document instance, so concurrent fills
/// never share a writer.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    async fn open_template(&self, path: &Path) -> Result<Box<dyn FormDocument>, DocumentError>;
}

/// One open document instance.
///
/// `apply_write` is idempotent: reapplying a write with the same value is
/// an observable no-op. `persist` must stage to a temporary location and
/// only replace the destination on full success, so a failed save leaves
/// any previous artifact intact.
#[async_trait]
pub trait FormDocument: Send {
    fn page_count(&self) -> usize;

    /// Ordered placeholder fields on one page.
    fn fields_on_page(&self, page: usize) -> Result<Vec<PlaceholderField>, DocumentError>;

    fn apply_write(&mut self, write: &FieldWrite) -> Result<(), DocumentError>;

    /// Write the filled document as `<stem>.<ext>` under `output_dir` and
    /// return the final location.
    async fn persist(&mut self, output_dir: &Path, stem: &str) -> Result<PathBuf, DocumentError>;
}
