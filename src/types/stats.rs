//! Result shapes produced by the aggregation engine

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Selection count for one choice index at one knot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceBucket {
    pub count: usize,
    /// Label of the first event seen for this index
    pub text: String,
}

/// Choice index → bucket; integer keys serialize as strings ("0", "1", ...)
pub type ChoiceDistribution = IndexMap<i64, ChoiceBucket>;

/// Overall choice statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathStats {
    #[serde(rename = "totalChoices")]
    pub total_choices: usize,
    #[serde(rename = "uniqueSessions")]
    pub unique_sessions: usize,
    /// knotPath → choiceIndex → bucket
    #[serde(rename = "pathDistribution")]
    pub path_distribution: IndexMap<String, ChoiceDistribution>,
}

/// Per-session summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "startTime")]
    pub start_time: i64,
    #[serde(rename = "endTime")]
    pub end_time: i64,
    #[serde(rename = "choiceCount")]
    pub choice_count: usize,
    /// Distinct knot paths chosen in, first-seen order
    pub paths: Vec<String>,
    #[serde(rename = "durationMs")]
    pub duration_ms: i64,
}

/// Choice count for a single knot path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathCount {
    pub path: String,
    pub count: usize,
}

/// Selection share of one choice identifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStat {
    pub total: usize,
    /// Whole-number share of the knot's choices, 0..=100
    pub percentage: u32,
}

/// Statistics for a requested set of choice identifiers, in request order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceStats {
    pub choices: IndexMap<String, ChoiceStat>,
}
