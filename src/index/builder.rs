//! One-time index build over a template's placeholder fields.
//!
//! The only way a document backend can address a field directly is by its
//! origin coordinate, so without an index every write would re-scan all
//! fields on the form (the front page alone carries a few hundred). One
//! pass here turns that into an O(1) map lookup per write. The scan runs
//! on its own task so callers stay responsive; the result is published
//! through the `FieldIndex` watch handle.
//!
//! Template precondition: field names are unique per page and field
//! geometry does not overlap. Overlapping fields have historically made
//! one field's text land in another; the scan cannot detect that, it
//! belongs to template linting.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use super::{FieldIndex, FieldLocation, IndexState, IndexTable};
use crate::document::{DocumentBackend, DocumentError};

/// Scan the template once and build the merged lookup table.
pub async fn build(
    backend: &dyn DocumentBackend,
    template_path: &Path,
) -> Result<IndexTable, DocumentError> {
    let started = Instant::now();
    let document = backend.open_template(template_path).await?;

    let page_count = document.page_count();
    if page_count == 0 {
        return Err(DocumentError::EmptyTemplate);
    }

    let mut entries = HashMap::new();
    for page in 0..page_count {
        // page-scoped table first, then merge into the global one
        let mut page_table: HashMap<String, FieldLocation> = HashMap::new();
        for field in document.fields_on_page(page)? {
            let location = FieldLocation {
                page,
                origin: field.origin,
            };
            if page_table.insert(field.name.clone(), location).is_some() {
                log::warn!("duplicate field `{}` on page {page}, keeping the last one", field.name);
            }
        }
        log::debug!("indexed page {page}: {} fields", page_table.len());

        for (name, location) in page_table {
            if let Some(previous) = entries.insert(name.clone(), location) {
                // Undefined template behavior; the later page wins.
                log::warn!(
                    "field `{name}` appears on pages {} and {}, keeping page {}",
                    previous.page,
                    location.page,
                    location.page
                );
            }
        }
    }

    log::info!(
        "field index ready: {} fields across {page_count} pages in {:?}",
        entries.len(),
        started.elapsed()
    );
    Ok(IndexTable {
        entries,
        page_count,
    })
}

/// Spawn the build off the caller's path and return a handle that turns
/// ready once the scan completes. Open failures and empty templates leave
/// the handle permanently unavailable.
///
/// Must be called from within a tokio runtime.
pub fn spawn(backend: Arc<dyn DocumentBackend>, template_path: PathBuf) -> FieldIndex {
    let (tx, rx) = watch::channel(IndexState::Building);
    tokio::spawn(async move {
        match build(backend.as_ref(), &template_path).await {
            Ok(table) => {
                tx.send_replace(IndexState::Ready(Arc::new(table)));
            }
            Err(err) => {
                log::error!("field index build failed for {}: {err}", template_path.display());
                tx.send_replace(IndexState::Unavailable(err.to_string()));
            }
        }
    });
    FieldIndex::new(rx)
}
