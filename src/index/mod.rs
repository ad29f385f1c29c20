//! Field index: precomputed name to location lookup over a template.
//!
//! The index is built exactly once per template by `builder` and frozen
//! afterwards, amortizing every later field lookup to O(1). Readiness is
//! published through a watch channel; nothing can observe a partially
//! built table.

pub mod builder;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

use crate::document::Point;

/// Where one placeholder field sits: page index plus origin coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldLocation {
    pub page: usize,
    pub origin: Point,
}

/// Why a lookup produced no location.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The index is still building; retry once ready.
    #[error("field index is not ready yet")]
    NotReady,
    /// The template could not be opened or has no pages. Permanent.
    #[error("template unavailable: {0}")]
    Unavailable(String),
    /// The index is ready but the template has no field with this name.
    /// This is a template/schema mismatch, not a transient condition.
    #[error("no field named `{0}` in the template")]
    NotFound(String),
}

/// The frozen name to location table. Built per page, merged, then never
/// mutated again.
#[derive(Debug, Default)]
pub struct IndexTable {
    entries: HashMap<String, FieldLocation>,
    page_count: usize,
}

impl IndexTable {
    pub fn get(&self, name: &str) -> Option<FieldLocation> {
        self.entries.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }
}

#[derive(Debug, Clone)]
enum IndexState {
    Building,
    Ready(Arc<IndexTable>),
    Unavailable(String),
}

/// Cloneable handle to an index that may still be building.
///
/// The watch transition from `Building` to a terminal state is the only
/// synchronization point: once `table` returns a snapshot, that snapshot
/// is immutable and may be shared freely across fill operations.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    state: watch::Receiver<IndexState>,
}

impl FieldIndex {
    fn new(state: watch::Receiver<IndexState>) -> Self {
        Self { state }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.state.borrow(), IndexState::Ready(_))
    }

    /// Snapshot of the built table, or the reason there is none yet.
    pub fn table(&self) -> Result<Arc<IndexTable>, LookupError> {
        match &*self.state.borrow() {
            IndexState::Building => Err(LookupError::NotReady),
            IndexState::Ready(table) => Ok(table.clone()),
            IndexState::Unavailable(reason) => Err(LookupError::Unavailable(reason.clone())),
        }
    }

    /// Look one field up by name.
    pub fn lookup(&self, name: &str) -> Result<FieldLocation, LookupError> {
        let table = self.table()?;
        table
            .get(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))
    }

    /// Wait for the build to reach a terminal state and return the table.
    pub async fn ready(&mut self) -> Result<Arc<IndexTable>, LookupError> {
        let state = self
            .state
            .wait_for(|state| !matches!(state, IndexState::Building))
            .await
            .map_err(|_| LookupError::Unavailable("index build task dropped".to_string()))?;
        match &*state {
            IndexState::Ready(table) => Ok(table.clone()),
            IndexState::Unavailable(reason) => Err(LookupError::Unavailable(reason.clone())),
            IndexState::Building => Err(LookupError::NotReady),
        }
    }
}
