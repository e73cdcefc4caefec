//! Shared application state for HTTP handlers

use std::sync::Arc;

use crate::event_store::{EventLog, InMemoryEventLog};
use crate::types::EventRecord;

use super::rest::ApiError;

/// Shared application state
pub struct AppState {
    /// The event log every handler reads from and appends to
    pub log: Arc<dyn EventLog>,
}

impl AppState {
    /// Create state around an existing log
    pub fn new(log: Arc<dyn EventLog>) -> Self {
        Self { log }
    }

    /// Create state around a fresh in-memory log
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryEventLog::new()))
    }

    /// Run an aggregation over a snapshot of the log
    ///
    /// The fold runs on the blocking pool so a long scan does not stall the
    /// runtime; a panic inside it surfaces as a single internal error.
    pub async fn aggregate<T, F>(&self, name: &'static str, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&[EventRecord]) -> T + Send + 'static,
    {
        let entries = self.log.snapshot();
        tokio::task::spawn_blocking(move || f(entries.as_slice()))
            .await
            .map_err(|e| ApiError::Internal(format!("Aggregation '{}' failed: {}", name, e)))
    }
}
