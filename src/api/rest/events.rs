//! Event ingestion and raw event endpoints

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::{parse_limit, query_value, ApiError, QueryPairs};
use crate::api::state::AppState;
use crate::event_store::EventQuery;
use crate::types::EventRecord;

/// Default number of events returned by `GET /events`
const DEFAULT_EVENTS_LIMIT: usize = 100;

const INVALID_EVENT: &str = "Invalid event: requires type and sessionId";
const INVALID_BATCH: &str = "Invalid batch: requires entries array";

/// Parse a request body as JSON; an empty body yields `None`
fn read_body(body: &Bytes) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(body)?))
}

/// Convert one submitted object into a record; anything else is rejected
fn to_record(value: Value) -> Option<EventRecord> {
    match value {
        Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

fn non_empty(field: Option<&str>) -> bool {
    field.is_some_and(|v| !v.is_empty())
}

/// POST /events - Ingest a single event
///
/// The event must carry a non-empty `type` and `sessionId`; everything else
/// is optional.
pub async fn ingest_event(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let record = read_body(&body)?
        .and_then(to_record)
        .filter(|r| non_empty(r.event_type.as_deref()) && non_empty(r.session_id.as_deref()))
        .ok_or_else(|| ApiError::BadRequest(INVALID_EVENT.to_string()))?;

    tracing::info!(
        event_type = record.event_type.as_deref().unwrap_or_default(),
        session_id = record.session_id_or_default(),
        "Event received"
    );
    state.log.append(record);

    Ok(StatusCode::OK)
}

/// POST /batch - Ingest a batch of events from one upload
///
/// Body: `{"sessionId": "...", "entries": [...]}`. The batch is appended as a
/// whole or not at all.
pub async fn ingest_batch(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let mut body = read_body(&body)?.unwrap_or(Value::Null);
    let session_id = body
        .get("sessionId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let entries = match body.get_mut("entries").map(Value::take) {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => return Err(ApiError::BadRequest(INVALID_BATCH.to_string())),
    };

    let records = entries
        .into_iter()
        .map(to_record)
        .collect::<Option<Vec<EventRecord>>>()
        .ok_or_else(|| {
            ApiError::BadRequest("Invalid batch: every entry must be an object".to_string())
        })?;

    tracing::info!(count = records.len(), session_id = %session_id, "Batch received");
    state.log.append_all(records);

    Ok(StatusCode::OK)
}

/// GET /events - Raw events for debugging
///
/// Optional `type` and `sessionId` filters, then the last `limit` (default 100)
/// matching events in log order. `limit=0` returns no events.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryPairs>,
) -> Result<Json<Vec<EventRecord>>, ApiError> {
    let query = EventQuery {
        limit: parse_limit(&params, DEFAULT_EVENTS_LIMIT)?,
        event_type: query_value(&params, "type").map(str::to_string),
        session_id: query_value(&params, "sessionId").map(str::to_string),
    };

    Ok(Json(state.log.query(&query)))
}

/// DELETE /events - Clear all events
pub async fn clear_events(State(state): State<Arc<AppState>>) -> StatusCode {
    let cleared = state.log.len();
    state.log.clear();
    tracing::info!(cleared, "Events cleared");
    StatusCode::OK
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_read_body() {
        assert!(read_body(&Bytes::from_static(b"")).unwrap().is_none());
        assert!(read_body(&Bytes::from_static(b"  \n")).unwrap().is_none());
        assert_eq!(
            read_body(&Bytes::from_static(b"{\"a\":1}")).unwrap(),
            Some(json!({"a": 1}))
        );
        assert!(matches!(
            read_body(&Bytes::from_static(b"{not json")),
            Err(ApiError::BadRequest(msg)) if msg == "Invalid JSON"
        ));
    }

    #[test]
    fn test_to_record_rejects_non_objects() {
        assert!(to_record(json!([1, 2])).is_none());
        assert!(to_record(json!("choice")).is_none());
        assert!(to_record(Value::Null).is_none());
        assert!(to_record(json!({})).is_some());
    }
}
