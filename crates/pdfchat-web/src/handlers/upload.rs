use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use pdfchat_core::SessionDocument;

use crate::models::{ErrorResponse, UploadResponse};
use crate::state::AppState;
use crate::upload;

/// Handle a PDF upload: extract its text and cache it as the session's
/// active document, replacing any previous one.
pub async fn upload(State(state): State<Arc<AppState>>, multipart: Multipart) -> Response {
    let form = match upload::parse_multipart(multipart).await {
        Ok(form) => form,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: e })).into_response();
        }
    };

    let session_id = state.resolve_session(form.session_id);

    match pdfchat_pdf::extract_document(&form.data) {
        Ok(doc) => {
            let text = doc.text();
            tracing::info!(
                filename = %form.filename,
                pages = doc.page_count(),
                characters = text.len(),
                "document extracted"
            );
            let response = UploadResponse {
                session_id,
                filename: form.filename.clone(),
                page_count: doc.page_count(),
                characters: text.chars().count(),
                empty_text: doc.is_empty(),
            };
            state.set_document(
                session_id,
                Some(SessionDocument {
                    filename: form.filename,
                    page_count: doc.page_count(),
                    text,
                }),
            );
            Json(response).into_response()
        }
        Err(e) => {
            tracing::warn!(filename = %form.filename, error = %e, "extraction failed");
            // A failed upload must not leave a stale document behind:
            // subsequent chats are treated as "no document uploaded".
            state.set_document(session_id, None);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: format!("Could not read that PDF: {e}"),
                }),
            )
                .into_response()
        }
    }
}
