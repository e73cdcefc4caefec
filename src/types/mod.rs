//! Data types for the analytics collector
//!
//! Event records as submitted by game clients, and the result shapes
//! returned by the aggregation engine.

mod event;
mod stats;

pub use event::{
    ChoicePayload, EventContext, EventRecord, Timestamp, CHOICE_EVENT, NO_CHOICE_INDEX,
    UNKNOWN_KNOT,
};
pub use stats::{
    ChoiceBucket, ChoiceDistribution, ChoiceStat, ChoiceStats, PathCount, PathStats,
    SessionSummary,
};
