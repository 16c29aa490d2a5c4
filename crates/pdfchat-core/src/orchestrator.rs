//! Conversation orchestrator: one submit in, one updated transcript out.
//!
//! Each submit is an independent request/response step. The full document
//! text is embedded verbatim in every prompt; there is no summarization,
//! truncation, or incremental context reuse. That is a deliberate
//! simplicity/cost tradeoff, not an optimization.

use std::time::Duration;

use crate::agent::AgentBackend;
use crate::{SessionDocument, Transcript};

/// Fixed reply for a submit that arrives before any successful upload.
/// The agent is never called in that case.
pub const NO_DOCUMENT_REPLY: &str = "Please upload a PDF first.";

/// Build the single prompt string for one question: the whole document,
/// the conversation so far, then the question.
pub fn build_prompt(document_text: &str, question: &str, history: &Transcript) -> String {
    let mut prompt = String::with_capacity(document_text.len() + question.len() + 256);
    prompt.push_str(
        "You are answering questions about an uploaded PDF document. \
         Answer using only the document content below.\n\n",
    );
    prompt.push_str("Document:\n");
    prompt.push_str(document_text);
    prompt.push_str("\n\n");

    if !history.is_empty() {
        prompt.push_str("Conversation so far:\n");
        for turn in history.turns() {
            prompt.push_str(turn.role.as_str());
            prompt.push_str(": ");
            prompt.push_str(&turn.text);
            prompt.push('\n');
        }
        prompt.push('\n');
    }

    prompt.push_str("Question: ");
    prompt.push_str(question);
    prompt
}

/// Handle one chat submit and return the updated transcript.
///
/// Behavior:
/// - An empty (or whitespace-only) message is a no-op: the transcript is
///   returned unchanged and no agent call is made.
/// - With no cached document (or a document whose text is empty), the reply
///   is the fixed [`NO_DOCUMENT_REPLY`], again without an agent call.
/// - Otherwise exactly one agent call is made. On success the `user` turn
///   and the `assistant` reply are appended; on any agent failure the
///   `assistant` turn carries the error message instead. Failures never
///   propagate: the session stays usable after a failed turn.
pub async fn answer(
    message: &str,
    mut transcript: Transcript,
    document: Option<&SessionDocument>,
    agent: &dyn AgentBackend,
    client: &reqwest::Client,
    timeout: Duration,
) -> Transcript {
    let message = message.trim();
    if message.is_empty() {
        return transcript;
    }

    let document = match document {
        Some(doc) if !doc.text.trim().is_empty() => doc,
        _ => {
            tracing::debug!("chat submit with no document cached, short-circuiting");
            transcript.push_user(message);
            transcript.push_assistant(NO_DOCUMENT_REPLY);
            return transcript;
        }
    };

    let prompt = build_prompt(&document.text, message, &transcript);
    tracing::debug!(
        agent = agent.name(),
        prompt_chars = prompt.len(),
        document = %document.filename,
        "sending prompt"
    );

    match agent.complete(&prompt, client, timeout).await {
        Ok(reply) => {
            transcript.push_user(message);
            transcript.push_assistant(reply);
        }
        Err(e) => {
            tracing::warn!(agent = agent.name(), error = %e, "agent call failed");
            transcript.push_user(message);
            transcript.push_assistant(format!("Sorry, I could not get an answer: {e}"));
        }
    }

    transcript
}
