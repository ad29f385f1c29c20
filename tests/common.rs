//! Shared test helpers: an in-memory document backend.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use form781_filler::document::json::TemplateSpec;
use form781_filler::document::{
    DocumentBackend, DocumentError, FieldWrite, FormDocument, PlaceholderField, Point,
};

/// In-memory implementation of the document traits. Records every applied
/// write and persist call so tests can assert on the exact sequence the
/// filler produced.
pub struct MockDocumentStore {
    template: TemplateSpec,
    pub applied: Arc<Mutex<Vec<FieldWrite>>>,
    pub persisted: Arc<Mutex<Vec<PathBuf>>>,
    open_delay: Option<Duration>,
    fail_persist: bool,
}

impl MockDocumentStore {
    pub fn new(template: TemplateSpec) -> Self {
        Self {
            template,
            applied: Arc::new(Mutex::new(Vec::new())),
            persisted: Arc::new(Mutex::new(Vec::new())),
            open_delay: None,
            fail_persist: false,
        }
    }

    /// A store backed by the complete blank two-page form.
    pub fn blank() -> Self {
        Self::new(TemplateSpec::form781_blank())
    }

    /// Delay every `open_template`, keeping the index in its building
    /// state for at least this long.
    pub fn with_open_delay(mut self, delay: Duration) -> Self {
        self.open_delay = Some(delay);
        self
    }

    /// Make every persist call fail with an I/O error.
    pub fn with_failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }
}

#[async_trait]
impl DocumentBackend for MockDocumentStore {
    async fn open_template(&self, _path: &Path) -> Result<Box<dyn FormDocument>, DocumentError> {
        if let Some(delay) = self.open_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(Box::new(MockDocument {
            template: self.template.clone(),
            applied: self.applied.clone(),
            persisted: self.persisted.clone(),
            fail_persist: self.fail_persist,
        }))
    }
}

struct MockDocument {
    template: TemplateSpec,
    applied: Arc<Mutex<Vec<FieldWrite>>>,
    persisted: Arc<Mutex<Vec<PathBuf>>>,
    fail_persist: bool,
}

#[async_trait]
impl FormDocument for MockDocument {
    fn page_count(&self) -> usize {
        self.template.pages.len()
    }

    fn fields_on_page(&self, page: usize) -> Result<Vec<PlaceholderField>, DocumentError> {
        let page_spec = self
            .template
            .pages
            .get(page)
            .ok_or(DocumentError::PageOutOfRange(page))?;
        Ok(page_spec
            .fields
            .iter()
            .map(|field| PlaceholderField {
                name: field.name.clone(),
                origin: Point {
                    x: field.x,
                    y: field.y,
                },
            })
            .collect())
    }

    fn apply_write(&mut self, write: &FieldWrite) -> Result<(), DocumentError> {
        let location = write.location;
        let page = self
            .template
            .pages
            .get(location.page)
            .ok_or(DocumentError::PageOutOfRange(location.page))?;
        if !page
            .fields
            .iter()
            .any(|field| field.x == location.origin.x && field.y == location.origin.y)
        {
            return Err(DocumentError::FieldMissing {
                page: location.page,
                x: location.origin.x,
                y: location.origin.y,
            });
        }
        self.applied.lock().unwrap().push(write.clone());
        Ok(())
    }

    async fn persist(&mut self, output_dir: &Path, stem: &str) -> Result<PathBuf, DocumentError> {
        if self.fail_persist {
            return Err(DocumentError::Io(std::io::Error::other(
                "simulated disk failure",
            )));
        }
        let location = output_dir.join(format!("{stem}.json"));
        self.persisted.lock().unwrap().push(location.clone());
        Ok(location)
    }
}

/// Snapshot of the writes applied so far, in application order.
#[allow(dead_code)]
pub fn applied_writes(applied: &Arc<Mutex<Vec<FieldWrite>>>) -> Vec<FieldWrite> {
    applied.lock().unwrap().clone()
}
