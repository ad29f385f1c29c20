//! Fill orchestration: index readiness gate, projection, write application
//! and persistence, with a status state machine observable by callers.

pub mod fields;
pub mod projector;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

use crate::document::{DocumentBackend, DocumentError};
use crate::index::{builder, FieldIndex, LookupError};
use crate::record::FormRecord;

/// Status of the most recent fill operation, as shown to a UI or caller.
///
/// `Idle -> Filling -> Saving -> Saved` on success; `Failed` is the
/// terminal state when persistence fails. A fill issued before the index
/// is ready is refused outright and leaves the status untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatus {
    Idle,
    Filling,
    Saving,
    Saved,
    Failed,
}

impl fmt::Display for FillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            FillStatus::Idle => "Waiting",
            FillStatus::Filling => "Filling",
            FillStatus::Saving => "Saving",
            FillStatus::Saved => "Saved",
            FillStatus::Failed => "Failed",
        };
        f.write_str(message)
    }
}

/// Errors terminating a fill operation.
#[derive(Debug, Error)]
pub enum FillError {
    /// The template failed to open or has no pages. Fatal for this filler.
    #[error("template unavailable: {0}")]
    TemplateUnavailable(String),
    /// The field index is still building. Transient; retry once ready.
    #[error("field index is still building")]
    IndexNotReady,
    #[error("failed to apply write for field `{name}`: {source}")]
    Write {
        name: String,
        #[source]
        source: DocumentError,
    },
    /// The filled document could not be persisted. Any previously saved
    /// artifact is left intact; the filler stays usable.
    #[error("failed to persist filled form: {0}")]
    Persist(#[source] DocumentError),
}

impl From<LookupError> for FillError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotReady => FillError::IndexNotReady,
            LookupError::Unavailable(reason) => FillError::TemplateUnavailable(reason),
            LookupError::NotFound(name) => FillError::TemplateUnavailable(format!(
                "field `{name}` missing from template"
            )),
        }
    }
}

/// Result of a completed fill.
#[derive(Debug, Clone, PartialEq)]
pub struct FillOutcome {
    /// Where the filled document was persisted.
    pub location: PathBuf,
    /// Field names within capacity that the template does not carry.
    /// Non-empty means the save succeeded but the fill was partial.
    pub missing_fields: Vec<String>,
}

/// Fills form templates with record data.
///
/// Construction spawns the one-time field-index build; fills are refused
/// with [`FillError::IndexNotReady`] until it completes. One filler serves
/// many records; each fill opens its own document instance.
pub struct FormFiller {
    backend: Arc<dyn DocumentBackend>,
    template_path: PathBuf,
    output_dir: PathBuf,
    index: FieldIndex,
    status: watch::Sender<FillStatus>,
    // single-writer discipline: one in-flight fill per filler
    fill_gate: Mutex<()>,
}

impl FormFiller {
    pub fn new(
        backend: Arc<dyn DocumentBackend>,
        template_path: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        let index = builder::spawn(backend.clone(), template_path.clone());
        let (status, _) = watch::channel(FillStatus::Idle);
        Self {
            backend,
            template_path,
            output_dir,
            index,
            status,
            fill_gate: Mutex::new(()),
        }
    }

    /// Handle to the template's field index.
    pub fn index(&self) -> &FieldIndex {
        &self.index
    }

    /// Current status of the fill state machine.
    pub fn status(&self) -> FillStatus {
        *self.status.borrow()
    }

    /// Observe status transitions as they happen.
    pub fn subscribe(&self) -> watch::Receiver<FillStatus> {
        self.status.subscribe()
    }

    /// Wait until the index build reaches a terminal state.
    pub async fn wait_until_ready(&self) -> Result<(), FillError> {
        let mut index = self.index.clone();
        index.ready().await.map_err(FillError::from)?;
        Ok(())
    }

    /// Fill one record into a fresh copy of the template and persist it.
    ///
    /// Refused before index readiness with no side effects and no status
    /// transition. Unresolvable field names are aggregated into
    /// [`FillOutcome::missing_fields`] rather than aborting the fill.
    pub async fn fill(&self, record: &FormRecord) -> Result<FillOutcome, FillError> {
        // Refusal path first: no status transition, no writes.
        let table = match self.index.table() {
            Ok(table) => table,
            Err(LookupError::NotReady) => return Err(FillError::IndexNotReady),
            Err(LookupError::Unavailable(reason)) => {
                return Err(FillError::TemplateUnavailable(reason))
            }
            Err(LookupError::NotFound(name)) => {
                return Err(FillError::TemplateUnavailable(format!(
                    "field `{name}` missing from template"
                )))
            }
        };

        let _guard = self.fill_gate.lock().await;
        let op = Uuid::new_v4();
        log::info!(
            "fill {op}: starting for serial `{}` ({} flights, {} crew)",
            record.serial_number,
            record.flights.len(),
            record.crew_members.len()
        );
        self.status.send_replace(FillStatus::Filling);

        let mut document = match self.backend.open_template(&self.template_path).await {
            Ok(document) => document,
            Err(err) => {
                self.status.send_replace(FillStatus::Failed);
                return Err(FillError::TemplateUnavailable(err.to_string()));
            }
        };

        let projection = projector::project(record, &table);
        for name in &projection.missing {
            log::warn!("fill {op}: template has no field `{name}`, skipping");
        }

        for write in &projection.writes {
            if let Err(source) = document.apply_write(write) {
                self.status.send_replace(FillStatus::Failed);
                return Err(FillError::Write {
                    name: write.name.clone(),
                    source,
                });
            }
        }

        self.status.send_replace(FillStatus::Saving);
        let stem = output_stem(&record.serial_number);
        let location = match document.persist(&self.output_dir, &stem).await {
            Ok(location) => location,
            Err(err) => {
                log::error!("fill {op}: persist failed: {err}");
                self.status.send_replace(FillStatus::Failed);
                return Err(FillError::Persist(err));
            }
        };

        self.status.send_replace(FillStatus::Saved);
        log::info!(
            "fill {op}: saved {} writes to {} ({} missing fields)",
            projection.writes.len(),
            location.display(),
            projection.missing.len()
        );
        Ok(FillOutcome {
            location,
            missing_fields: projection.missing,
        })
    }
}

/// File stem for a persisted form, derived from the aircraft serial.
fn output_stem(serial_number: &str) -> String {
    let safe = sanitize_filename::sanitize(serial_number.trim());
    if safe.is_empty() {
        "form781-filled".to_string()
    } else {
        format!("form781-{safe}")
    }
}
