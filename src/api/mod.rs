//! Ingestion and query gateway
//!
//! Accepts events over HTTP, appends them to the event log and answers
//! aggregation queries over a snapshot of it.

pub mod http;
pub mod rest;
pub mod state;

pub use http::{create_router, serve};
pub use state::AppState;
