//! Aggregation engine
//!
//! Read-only folds over a snapshot of the event log. None of these functions
//! keep state between calls or touch the entries they are given, so calling
//! one twice on the same snapshot yields the same result.
//!
//! Knot attribution differs between the queries: path statistics and top paths
//! only read `payload.knotPath`, while choice statistics fall back to
//! `context.knot` before giving up.

mod choice_stats;
mod path_stats;
mod sessions;
mod top_paths;

pub use choice_stats::{choice_id, choice_statistics};
pub use path_stats::path_statistics;
pub use sessions::session_summaries;
pub use top_paths::{top_paths, DEFAULT_TOP_PATHS_LIMIT};
