use serde::{Deserialize, Serialize};

pub mod agent;
pub mod config;
pub mod orchestrator;

// Re-export for convenience
pub use agent::{AgentBackend, AgentError, GeminiAgent, MockAgent};
pub use config::{AgentConfig, ConfigError};
pub use orchestrator::{NO_DOCUMENT_REPLY, answer, build_prompt};

/// Who authored a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One role-tagged message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

/// The ordered, append-only record of chat turns for one session.
///
/// Turns are never edited or removed; the transcript only grows. A session
/// reset (page reload on the client side) starts from a fresh value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::User,
            text: text.into(),
        });
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.turns.push(Turn {
            role: Role::Assistant,
            text: text.into(),
        });
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// The cached extraction result for one session's active document.
///
/// A new upload replaces the whole value; there is no multi-document
/// support and no partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    pub filename: String,
    pub page_count: usize,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_appends_in_order() {
        let mut t = Transcript::new();
        t.push_user("hello");
        t.push_assistant("hi there");

        assert_eq!(t.len(), 2);
        assert_eq!(t.turns()[0].role, Role::User);
        assert_eq!(t.turns()[0].text, "hello");
        assert_eq!(t.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let turn = Turn {
            role: Role::Assistant,
            text: "ok".into(),
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
