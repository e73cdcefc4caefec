//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, Method},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::rest::{events, stats, ApiError};
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Game clients post from arbitrary origins (browser builds, editors)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Ingestion
        .route(
            "/events",
            get(events::list_events)
                .post(events::ingest_event)
                .delete(events::clear_events),
        )
        .route("/batch", post(events::ingest_batch))
        // Aggregations
        .route("/stats", get(stats::get_path_stats))
        .route("/stats/choices", get(stats::get_choice_stats))
        .route("/sessions", get(stats::get_sessions))
        .route("/top-paths", get(stats::get_top_paths))
        // Health check
        .route("/health", get(health_check))
        // Known path, wrong method: same JSON 404 as an unknown path
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Response for GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(rename = "eventCount")]
    pub event_count: usize,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        event_count: state.log.len(),
    })
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".to_string())
}

/// Bind the listener and serve until Ctrl+C
pub async fn serve(config: &ServerConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(addr = %local_addr, "Analytics collector running");
    for (method, path, about) in ENDPOINTS {
        tracing::info!("  {:<6} {:<14} - {}", method, path, about);
    }

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down");
    Ok(())
}

const ENDPOINTS: &[(&str, &str, &str)] = &[
    ("POST", "/events", "Ingest single event"),
    ("POST", "/batch", "Ingest batch of events"),
    ("GET", "/stats", "Choice statistics (full)"),
    ("GET", "/stats/choices", "Choice statistics by ID"),
    ("GET", "/sessions", "Session summaries"),
    ("GET", "/top-paths", "Most visited paths"),
    ("GET", "/events", "Raw events (debug)"),
    ("DELETE", "/events", "Clear all events"),
    ("GET", "/health", "Liveness and event count"),
];

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn test_health_check() {
        let state = Arc::new(AppState::in_memory());
        let app = create_router(state);

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = create_router(Arc::new(AppState::in_memory()));

        let response = app
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_json_404() {
        let app = create_router(Arc::new(AppState::in_memory()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri("/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let app = create_router(Arc::new(AppState::in_memory()));

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/events")
                    .header(header::ORIGIN, "http://localhost:8080")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }
}
