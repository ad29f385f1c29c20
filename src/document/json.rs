//! JSON-backed reference document backend.
//!
//! Stores a template as a JSON file: pages of named fields, each with an
//! origin coordinate and its current text. A native PDF backend would sit
//! behind the same traits; this one keeps the pipeline runnable and
//! testable end to end without a PDF toolkit.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{DocumentBackend, DocumentError, FieldWrite, FormDocument, PlaceholderField, Point};
use crate::fill::fields::{
    crew_page, indexed, CREW_BASES, CREW_ROW_CAPACITY, FLIGHT_BASES, FLIGHT_ROW_CAPACITY,
    FRONT_PAGE_CREW_ROWS, HEADER_FIELDS,
};

/// On-disk template shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateSpec {
    pub pages: Vec<PageSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub value: String,
}

impl TemplateSpec {
    /// Text currently held by the named field, searching all pages.
    pub fn field_text(&self, name: &str) -> Option<&str> {
        self.pages
            .iter()
            .flat_map(|page| page.fields.iter())
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// Drop the named field everywhere. Handy for building deliberately
    /// broken templates in tests.
    pub fn remove_field(&mut self, name: &str) {
        for page in &mut self.pages {
            page.fields.retain(|field| field.name != name);
        }
    }

    /// A blank two-page Form 781 layout carrying every field the filler
    /// knows how to address: header block, six flight rows and fifteen
    /// crew rows up front, twenty crew overflow rows on the back page.
    pub fn form781_blank() -> Self {
        let mut front = PageSpec::default();
        let mut back = PageSpec::default();

        for (col, name) in HEADER_FIELDS.into_iter().enumerate() {
            front.fields.push(FieldSpec {
                name: name.to_string(),
                x: 40.0 + col as f64 * 90.0,
                y: 40.0,
                value: String::new(),
            });
        }

        for row in 0..FLIGHT_ROW_CAPACITY {
            for (col, base) in FLIGHT_BASES.into_iter().enumerate() {
                front.fields.push(FieldSpec {
                    name: indexed(base, row),
                    x: 40.0 + col as f64 * 60.0,
                    y: 120.0 + row as f64 * 24.0,
                    value: String::new(),
                });
            }
        }

        for row in 0..CREW_ROW_CAPACITY {
            let page_row = if crew_page(row) == 0 {
                row
            } else {
                row - FRONT_PAGE_CREW_ROWS
            };
            let target = if crew_page(row) == 0 { &mut front } else { &mut back };
            for (col, base) in CREW_BASES.into_iter().enumerate() {
                target.fields.push(FieldSpec {
                    name: indexed(base, row),
                    x: 40.0 + col as f64 * 40.0,
                    y: 320.0 + page_row as f64 * 24.0,
                    value: String::new(),
                });
            }
        }

        Self {
            pages: vec![front, back],
        }
    }
}

/// Backend that opens JSON templates from disk.
#[derive(Debug, Default, Clone)]
pub struct JsonTemplateStore;

#[async_trait]
impl DocumentBackend for JsonTemplateStore {
    async fn open_template(&self, path: &Path) -> Result<Box<dyn FormDocument>, DocumentError> {
        let bytes = tokio::fs::read(path).await.map_err(DocumentError::Open)?;
        let spec: TemplateSpec = serde_json::from_slice(&bytes).map_err(DocumentError::Parse)?;
        Ok(Box::new(JsonDocument { spec }))
    }
}

/// One open JSON document instance.
#[derive(Debug)]
pub struct JsonDocument {
    spec: TemplateSpec,
}

impl JsonDocument {
    pub fn new(spec: TemplateSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &TemplateSpec {
        &self.spec
    }
}

#[async_trait]
impl FormDocument for JsonDocument {
    fn page_count(&self) -> usize {
        self.spec.pages.len()
    }

    fn fields_on_page(&self, page: usize) -> Result<Vec<PlaceholderField>, DocumentError> {
        let page_spec = self
            .spec
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
            .spec
            .pages
            .get_mut(location.page)
            .ok_or(DocumentError::PageOutOfRange(location.page))?;
        // Fields are addressed by origin; the coordinates come from this
        // same document via the index, so equality is exact.
        let field = page
            .fields
            .iter_mut()
            .find(|field| field.x == location.origin.x && field.y == location.origin.y)
            .ok_or(DocumentError::FieldMissing {
                page: location.page,
                x: location.origin.x,
                y: location.origin.y,
            })?;
        field.value.clone_from(&write.value);
        Ok(())
    }

    async fn persist(&mut self, output_dir: &Path, stem: &str) -> Result<PathBuf, DocumentError> {
        let bytes = serde_json::to_vec_pretty(&self.spec).map_err(DocumentError::Encode)?;
        let dir = output_dir.to_path_buf();
        let destination = dir.join(format!("{stem}.json"));
        let target = destination.clone();
        // Stage to a temp file in the same directory and rename over the
        // destination, so an interrupted save never clobbers a prior one.
        tokio::task::spawn_blocking(move || -> std::io::Result<()> {
            let mut staged = NamedTempFile::new_in(&dir)?;
            staged.write_all(&bytes)?;
            staged.as_file().sync_all()?;
            staged.persist(&target).map_err(|err| err.error)?;
            Ok(())
        })
        .await
        .map_err(|err| DocumentError::Io(std::io::Error::other(err)))?
        .map_err(DocumentError::Io)?;
        Ok(destination)
    }
}
