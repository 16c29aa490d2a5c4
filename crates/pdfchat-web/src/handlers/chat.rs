use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use pdfchat_core::orchestrator;

use crate::models::{ChatRequest, ChatResponse, TurnJson};
use crate::state::AppState;

/// Handle one chat submit. Per-request failures (no document, agent
/// errors) surface as transcript content, never as HTTP errors.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = state.resolve_session(request.session_id);
    let (document, transcript) = state.snapshot(session_id);

    let updated = orchestrator::answer(
        &request.message,
        transcript,
        document.as_ref(),
        state.agent.as_ref(),
        &state.client,
        state.config.timeout,
    )
    .await;

    state.store_transcript(session_id, updated.clone());

    Json(ChatResponse {
        session_id,
        turns: updated.turns().iter().map(TurnJson::from).collect(),
    })
}
