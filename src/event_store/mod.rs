//! Event Store Module
//!
//! Owns the append-only log of player events that every aggregation reads from:
//! - `EventLog`: backend contract (append, snapshot, clear)
//! - `InMemoryEventLog`: the default, process-lifetime backend
//!
//! # Architecture
//!
//! ```text
//! Write Path:
//! ┌──────────────┐    ┌─────────────┐    ┌───────────────────┐
//! │ POST /events │───►│ write lock  │───►│ Arc<Vec<Event>>   │
//! │ POST /batch  │    │ (one batch) │    │ copy-on-write     │
//! └──────────────┘    └─────────────┘    └───────────────────┘
//!
//! Read Path:
//! ┌───────────────┐    ┌──────────────────┐
//! │ snapshot()    │───►│ analytics::*     │───► JSON response
//! │ (Arc clone)   │    │ pure folds       │
//! └───────────────┘    └──────────────────┘
//! ```

mod store;

pub use store::{EventLog, EventQuery, InMemoryEventLog};
