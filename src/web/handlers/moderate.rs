// POST /upload — submit one piece of content for moderation.
//
// Multipart form with two parts: `content_type` (text/image/video) and
// `file` (the payload). Returns 400 before any engine runs when either
// part is missing or the type is unknown — those submissions are never
// moderated and never logged.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::verdict::ContentKind;
use crate::web::{api_error, AppState};

const INVALID_INPUT: &str = "Invalid content type or file missing";

/// POST /upload — moderate an uploaded payload.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut kind_tag: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content_type" => match field.text().await {
                Ok(text) => kind_tag = Some(text),
                Err(_) => return api_error(StatusCode::BAD_REQUEST, INVALID_INPUT),
            },
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                match field.bytes().await {
                    Ok(bytes) => file = Some((filename, bytes.to_vec())),
                    Err(_) => return api_error(StatusCode::BAD_REQUEST, INVALID_INPUT),
                }
            }
            _ => {}
        }
    }

    let kind = kind_tag.as_deref().and_then(ContentKind::parse);
    let (kind, (identifier, payload)) = match (kind, file) {
        (Some(kind), Some(file)) => (kind, file),
        _ => return api_error(StatusCode::BAD_REQUEST, INVALID_INPUT),
    };

    match state.pipeline.moderate(kind, &identifier, &payload).await {
        Ok(verdict) => Json(serde_json::json!({ "status": verdict.action() })).into_response(),
        Err(fault) => api_error(StatusCode::BAD_GATEWAY, &fault.to_string()),
    }
}
