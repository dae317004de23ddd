// Web server — Axum-based moderation API.
//
// Thin by intent: handlers validate the request boundary, call into the
// pipeline or the guideline store, and shape JSON. Everything with
// decision logic lives below this layer.

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::guidelines::GuidelineStore;
use crate::pipeline::ModerationPipeline;

pub mod handlers;

// Uploads above this are refused before any engine runs. Multipart bodies
// would otherwise be capped at axum's 2 MB default, which no video survives.
const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ModerationPipeline>,
    pub guidelines: Arc<GuidelineStore>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    pipeline: Arc<ModerationPipeline>,
    guidelines: Arc<GuidelineStore>,
    port: u16,
    bind: &str,
) -> Result<()> {
    let state = AppState {
        pipeline,
        guidelines,
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Pumice moderation API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build the API router. Kept separate from `run_server` so tests can
/// drive the routes without binding a socket.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/upload", post(handlers::moderate::upload))
        .route(
            "/update-guidelines",
            post(handlers::guidelines::update_guidelines),
        )
        .route("/guidelines", get(handlers::guidelines::get_guidelines))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Deployment health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
