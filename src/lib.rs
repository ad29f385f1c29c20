//! Fills AFTO Form 781 style templates with structured flight-record data.
//!
//! The pipeline: a one-time asynchronous scan of the template builds a
//! name to location index over its placeholder fields; a projector turns a
//! [`record::FormRecord`] plus that index into an ordered list of field
//! writes; a document backend applies the writes and persists the result.
//! [`fill::FormFiller`] ties the stages together and publishes
//! `Idle -> Filling -> Saving -> Saved | Failed` status transitions.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

pub mod document;
pub mod fill;
pub mod index;
pub mod record;

pub use document::json::JsonTemplateStore;
pub use document::{DocumentBackend, DocumentError, FieldWrite, FormDocument};
pub use fill::{FillError, FillOutcome, FillStatus, FormFiller};
pub use index::{FieldIndex, FieldLocation, LookupError};
pub use record::FormRecord;

/// Run one fill against the JSON reference backend, configured from the
/// environment:
///
/// * `FORM781_TEMPLATE` - template path (default `form781-template.json`;
///   a blank template is generated there if the file is missing)
/// * `FORM781_OUTPUT_DIR` - where the filled form is persisted (default `.`)
/// * `FORM781_RECORD` - JSON record to fill; falls back to the bundled
///   full sample record
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let template_path = PathBuf::from(
        env::var("FORM781_TEMPLATE").unwrap_or_else(|_| "form781-template.json".to_string()),
    );
    let output_dir =
        PathBuf::from(env::var("FORM781_OUTPUT_DIR").unwrap_or_else(|_| ".".to_string()));

    if !template_path.exists() {
        log::info!(
            "template {} not found, generating a blank form 781",
            template_path.display()
        );
        let blank = document::json::TemplateSpec::form781_blank();
        let bytes = serde_json::to_vec_pretty(&blank).context("failed to encode blank template")?;
        tokio::fs::write(&template_path, bytes)
            .await
            .with_context(|| format!("failed to write {}", template_path.display()))?;
    }

    let record = match env::var("FORM781_RECORD") {
        Ok(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read record file {path}"))?;
            serde_json::from_slice(&bytes)
                .with_context(|| format!("record file {path} is not a valid form record"))?
        }
        Err(_) => {
            log::info!("FORM781_RECORD not set, using the bundled full sample record");
            record::samples::full_record()
        }
    };

    let filler = FormFiller::new(Arc::new(JsonTemplateStore), template_path, output_dir);

    let mut transitions = WatchStream::new(filler.subscribe());
    tokio::spawn(async move {
        while let Some(status) = transitions.next().await {
            log::info!("fill status: {status}");
        }
    });

    filler.wait_until_ready().await?;
    let outcome = filler.fill(&record).await?;
    log::info!("filled form written to {}", outcome.location.display());
    Ok(())
}
