//! Aggregation endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use super::{parse_limit, query_values, ApiError, QueryPairs};
use crate::analytics::{
    choice_statistics, path_statistics, session_summaries, top_paths, DEFAULT_TOP_PATHS_LIMIT,
};
use crate::api::state::AppState;
use crate::types::{ChoiceStats, PathCount, PathStats, SessionSummary};

/// GET /stats - Choice counts per knot path and index
pub async fn get_path_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PathStats>, ApiError> {
    let stats = state.aggregate("path_statistics", path_statistics).await?;
    Ok(Json(stats))
}

/// GET /stats/choices?choice=knot:0&choice=knot:1 - Per-choice percentages
pub async fn get_choice_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<ChoiceStats>, ApiError> {
    let ids: Vec<String> = query_values(&params, "choice").map(str::to_string).collect();
    if ids.is_empty() {
        return Err(ApiError::BadRequest(
            "No choice IDs provided. Use ?choice=knot:0".to_string(),
        ));
    }

    let stats = state
        .aggregate("choice_statistics", move |entries| {
            choice_statistics(entries, &ids)
        })
        .await?;
    Ok(Json(stats))
}

/// GET /sessions - One summary per session
pub async fn get_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SessionSummary>>, ApiError> {
    let sessions = state.aggregate("session_summaries", session_summaries).await?;
    Ok(Json(sessions))
}

/// GET /top-paths?limit=N - Knot paths ranked by choice count
pub async fn get_top_paths(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<PathCount>>, ApiError> {
    let limit = parse_limit(&params, DEFAULT_TOP_PATHS_LIMIT)?;
    let ranked = state
        .aggregate("top_paths", move |entries| top_paths(entries, limit))
        .await?;
    Ok(Json(ranked))
}
