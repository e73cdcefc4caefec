//! Choice Analytics Collector
//!
//! Collects player interaction events from branching-narrative games and
//! answers aggregate questions about them: which paths are popular, how each
//! session went, and what share of players picked each option at a knot.
//!
//! # Modules
//!
//! - `types`: Event records and aggregation result shapes
//! - `event_store`: Append-only event log with consistent snapshots
//! - `analytics`: Aggregation engine (pure folds over a log snapshot)
//! - `api`: HTTP ingestion and query gateway (Axum)
//! - `config`: Server configuration from the environment
//!
//! # Example
//!
//! ```
//! use choice_analytics::analytics::{choice_statistics, path_statistics};
//! use choice_analytics::event_store::{EventLog, InMemoryEventLog};
//! use choice_analytics::types::EventRecord;
//!
//! let log = InMemoryEventLog::new();
//! log.append(EventRecord::choice("s1", 100, "intro", 0, "Go left"));
//! log.append(EventRecord::choice("s2", 150, "intro", 1, "Go right"));
//!
//! let entries = log.snapshot();
//! assert_eq!(path_statistics(&entries).total_choices, 2);
//! assert_eq!(choice_statistics(&entries, &["intro:0"]).choices["intro:0"].percentage, 50);
//! ```

pub mod analytics;
pub mod api;
pub mod config;
pub mod event_store;
pub mod types;

// Re-export commonly used items at crate root
pub use api::{create_router, AppState};
pub use config::ServerConfig;
pub use event_store::{EventLog, InMemoryEventLog};
pub use types::{EventRecord, PathStats, SessionSummary};

/// Result type for the collector binary
pub type CollectorResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
