use pdfchat_core::{Role, Turn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ── Upload DTOs ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub filename: String,
    pub page_count: usize,
    pub characters: usize,
    /// True when the PDF parsed fine but carried no extractable text
    /// (e.g. a pure scan). Distinct from an extraction failure.
    pub empty_text: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ── Chat DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    /// The full transcript after this turn, ready for direct rendering.
    pub turns: Vec<TurnJson>,
}

#[derive(Debug, Serialize)]
pub struct TurnJson {
    pub role: String,
    pub text: String,
}

impl From<&Turn> for TurnJson {
    fn from(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        TurnJson {
            role: role.to_string(),
            text: turn.text.clone(),
        }
    }
}
