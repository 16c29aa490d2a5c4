//! The agent boundary: one opaque remote LLM capability.
//!
//! The model is treated strictly as a function from a prompt string to a
//! reply string (or an error). Whatever reasoning the hosted runtime does
//! internally is not part of this contract.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiAgent;
pub use mock::{MockAgent, MockReply};

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// Failures from one agent call. Every variant renders a human-readable
/// message suitable for placing directly into a transcript turn.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("the model did not answer within {}s", .0.as_secs())]
    Timeout(Duration),
    #[error("the model is rate limited: {0}")]
    RateLimited(String),
    #[error("authentication with the model provider failed: {0}")]
    Auth(String),
    #[error("could not reach the model provider: {0}")]
    Http(String),
    #[error("model provider returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("model response contained no text")]
    MalformedResponse,
}

/// A hosted LLM that can answer a single prompt.
pub trait AgentBackend: Send + Sync {
    /// The display name of this agent (e.g., "Gemini").
    fn name(&self) -> &str;

    /// Send one prompt and return the generated reply text.
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;
}
