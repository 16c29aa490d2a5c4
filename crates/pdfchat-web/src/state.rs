use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use pdfchat_core::agent::AgentBackend;
use pdfchat_core::{AgentConfig, SessionDocument, Transcript};
use uuid::Uuid;

/// One browser session's state: the cached document (if any upload has
/// succeeded) and the rolling transcript. Nothing is persisted; a page
/// reload on the client starts a fresh session.
#[derive(Default, Clone)]
pub struct Session {
    pub document: Option<SessionDocument>,
    pub transcript: Transcript,
}

/// Shared application state accessible from all handlers.
///
/// Sessions are keyed by id; two sessions never observe each other's
/// document or transcript. Within a session, requests are sequential at the
/// UI layer (one human, submits blocked until the previous one returns), so
/// snapshot-then-store on the transcript is sufficient.
pub struct AppState {
    pub config: AgentConfig,
    pub client: reqwest::Client,
    pub agent: Arc<dyn AgentBackend>,
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl AppState {
    pub fn new(config: AgentConfig, agent: Arc<dyn AgentBackend>) -> Arc<Self> {
        Arc::new(Self {
            config,
            client: reqwest::Client::new(),
            agent,
            sessions: Mutex::new(HashMap::new()),
        })
    }

    /// Map a client-supplied session id to a live session, minting a fresh
    /// one when the id is absent. An unknown id (e.g. after a server
    /// restart) gets an empty session under that id.
    pub fn resolve_session(&self, id: Option<Uuid>) -> Uuid {
        let id = id.unwrap_or_else(Uuid::new_v4);
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(id).or_default();
        id
    }

    /// Replace the session's cached document wholesale. `None` clears it,
    /// which makes subsequent chats behave as "no document uploaded".
    pub fn set_document(&self, id: Uuid, document: Option<SessionDocument>) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(id).or_default().document = document;
    }

    /// Clone out the session's document and transcript. The lock is never
    /// held across an agent call.
    pub fn snapshot(&self, id: Uuid) -> (Option<SessionDocument>, Transcript) {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.entry(id).or_default();
        (session.document.clone(), session.transcript.clone())
    }

    /// Store the updated transcript after a completed turn.
    pub fn store_transcript(&self, id: Uuid, transcript: Transcript) {
        let mut sessions = self.sessions.lock().unwrap();
        sessions.entry(id).or_default().transcript = transcript;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfchat_core::MockAgent;
    use pdfchat_core::agent::MockReply;
    use std::time::Duration;

    fn test_state() -> Arc<AppState> {
        let config = AgentConfig {
            api_key: "test-key".into(),
            model: "test-model".into(),
            endpoint: "https://example.invalid/models".into(),
            timeout: Duration::from_secs(5),
        };
        AppState::new(config, Arc::new(MockAgent::new(MockReply::Text("ok".into()))))
    }

    fn document(text: &str) -> SessionDocument {
        SessionDocument {
            filename: "a.pdf".into(),
            page_count: 1,
            text: text.into(),
        }
    }

    #[test]
    fn sessions_are_isolated() {
        let state = test_state();
        let a = state.resolve_session(None);
        let b = state.resolve_session(None);
        assert_ne!(a, b);

        state.set_document(a, Some(document("doc for a")));
        state.set_document(b, Some(document("doc for b")));

        let mut transcript_a = Transcript::new();
        transcript_a.push_user("only in a");
        state.store_transcript(a, transcript_a);

        let (doc_a, trans_a) = state.snapshot(a);
        let (doc_b, trans_b) = state.snapshot(b);

        assert_eq!(doc_a.unwrap().text, "doc for a");
        assert_eq!(doc_b.unwrap().text, "doc for b");
        assert_eq!(trans_a.len(), 1);
        assert!(trans_b.is_empty());
    }

    #[test]
    fn new_upload_replaces_document() {
        let state = test_state();
        let id = state.resolve_session(None);

        state.set_document(id, Some(document("first")));
        state.set_document(id, Some(document("second")));

        let (doc, _) = state.snapshot(id);
        assert_eq!(doc.unwrap().text, "second");
    }

    #[test]
    fn clearing_document_leaves_session_without_context() {
        let state = test_state();
        let id = state.resolve_session(None);

        state.set_document(id, Some(document("something")));
        state.set_document(id, None);

        let (doc, _) = state.snapshot(id);
        assert!(doc.is_none());
    }

    #[test]
    fn known_id_is_reused() {
        let state = test_state();
        let id = state.resolve_session(None);
        state.set_document(id, Some(document("kept")));

        let again = state.resolve_session(Some(id));
        assert_eq!(again, id);
        let (doc, _) = state.snapshot(again);
        assert!(doc.is_some());
    }
}
