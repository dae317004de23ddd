// Guideline administration — read the active set, or replace it wholesale.
//
// There is deliberately no partial-update route: moderation behavior should
// only ever change in one observable step.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, info};

use crate::guidelines::GuidelineSet;
use crate::web::{api_error, AppState};

/// POST /update-guidelines — replace the entire guideline set.
pub async fn update_guidelines(
    State(state): State<AppState>,
    Json(set): Json<GuidelineSet>,
) -> Response {
    info!(
        text = set.text.len(),
        image = set.image.len(),
        video = set.video.len(),
        "replacing community guidelines"
    );

    match state.guidelines.replace(set).await {
        Ok(()) => Json(serde_json::json!({
            "message": "Community guidelines updated successfully"
        }))
        .into_response(),
        Err(e) => {
            error!(error = %e, "failed to persist guidelines");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to update guidelines: {e}"),
            )
        }
    }
}

/// GET /guidelines — the currently active set.
pub async fn get_guidelines(State(state): State<AppState>) -> impl IntoResponse {
    let set = state.guidelines.snapshot().await;
    Json(set.as_ref().clone())
}
