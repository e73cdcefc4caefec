//! Event Log - append-only store of player events
//!
//! The log is the only shared mutable resource in the collector. All writers
//! go through a single write lock; readers take an `Arc` snapshot that stays
//! consistent no matter what is appended or cleared afterwards.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::EventRecord;

/// Contract every event log backend satisfies
///
/// Aggregations only ever see the result of `snapshot()`, so a backend never
/// has to worry about queries observing a half-written batch.
pub trait EventLog: Send + Sync {
    /// Append a single event
    fn append(&self, record: EventRecord);

    /// Append a batch as one atomic step
    fn append_all(&self, records: Vec<EventRecord>);

    /// Consistent, immutable view of every event currently in the log
    fn snapshot(&self) -> Arc<Vec<EventRecord>>;

    /// Drop all events
    fn clear(&self);

    /// Number of events in the log
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw event scan for debugging: filter, then keep the newest `limit`
    /// (a limit of 0 keeps nothing)
    fn query(&self, query: &EventQuery) -> Vec<EventRecord> {
        let entries = self.snapshot();
        let filtered: Vec<&EventRecord> = entries.iter().filter(|e| query.matches(e)).collect();
        let skip = filtered.len().saturating_sub(query.limit);
        filtered.into_iter().skip(skip).cloned().collect()
    }
}

/// Filters for the raw event scan
#[derive(Debug, Clone)]
pub struct EventQuery {
    /// Maximum number of (most recent) events to return
    pub limit: usize,
    /// Exact event type to keep
    pub event_type: Option<String>,
    /// Exact session id to keep
    pub session_id: Option<String>,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            limit: 100,
            event_type: None,
            session_id: None,
        }
    }
}

impl EventQuery {
    fn matches(&self, record: &EventRecord) -> bool {
        let type_ok = match self.event_type.as_deref() {
            Some(t) => record.event_type.as_deref() == Some(t),
            None => true,
        };
        let session_ok = match self.session_id.as_deref() {
            Some(s) => record.session_id.as_deref() == Some(s),
            None => true,
        };
        type_ok && session_ok
    }
}

/// In-memory event log
///
/// Holds the events behind an `Arc` so snapshots are a refcount bump. An append
/// while a snapshot is still alive copies the vector once (copy-on-write).
#[derive(Default)]
pub struct InMemoryEventLog {
    entries: RwLock<Arc<Vec<EventRecord>>>,
}

impl InMemoryEventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with events
    pub fn with_entries(entries: Vec<EventRecord>) -> Self {
        Self {
            entries: RwLock::new(Arc::new(entries)),
        }
    }
}

impl EventLog for InMemoryEventLog {
    fn append(&self, record: EventRecord) {
        let mut guard = self.entries.write();
        Arc::make_mut(&mut *guard).push(record);
    }

    fn append_all(&self, records: Vec<EventRecord>) {
        if records.is_empty() {
            return;
        }
        let mut guard = self.entries.write();
        Arc::make_mut(&mut *guard).extend(records);
    }

    fn snapshot(&self) -> Arc<Vec<EventRecord>> {
        let guard = self.entries.read();
        Arc::clone(&*guard)
    }

    fn clear(&self) {
        // Replace rather than truncate so outstanding snapshots keep their view
        *self.entries.write() = Arc::new(Vec::new());
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }
}
