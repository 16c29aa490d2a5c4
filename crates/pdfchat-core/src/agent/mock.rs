//! Mock agent backend for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{AgentBackend, AgentError};

/// A configurable mock reply for [`MockAgent`].
#[derive(Clone, Debug)]
pub enum MockReply {
    /// Simulate a successful generation.
    Text(String),
    /// Simulate a call that exceeds the configured timeout.
    Timeout,
    /// Simulate a provider-side error with the given message.
    Error(String),
}

/// A hand-rolled mock implementing [`AgentBackend`] for tests.
///
/// Supports:
/// - A fixed reply (used for every call), **or**
/// - A sequence of replies (one per call, repeating the last if exhausted).
/// - Optional per-call latency.
/// - Call counting via [`call_count()`](MockAgent::call_count) and prompt
///   capture via [`last_prompt()`](MockAgent::last_prompt).
pub struct MockAgent {
    /// If non-empty, each call pops the next reply.
    replies: Mutex<Vec<MockReply>>,
    /// Fallback when the sequence is exhausted (or single-reply mode).
    fallback: MockReply,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockAgent {
    /// Create a mock that always returns `reply`.
    pub fn new(reply: MockReply) -> Self {
        Self {
            replies: Mutex::new(Vec::new()),
            fallback: reply,
            delay: None,
            call_count: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Create a mock that returns replies in order, repeating the last one.
    pub fn with_sequence(mut replies: Vec<MockReply>) -> Self {
        assert!(!replies.is_empty(), "sequence must have at least one reply");
        // Reverse so we can pop() from the front cheaply.
        replies.reverse();
        let fallback = replies.first().cloned().unwrap();
        Self {
            replies: Mutex::new(replies),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Set simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `complete()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The prompt passed to the most recent `complete()` call.
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }

    fn next_reply(&self) -> MockReply {
        let mut seq = self.replies.lock().unwrap();
        if let Some(reply) = seq.pop() {
            reply
        } else {
            self.fallback.clone()
        }
    }
}

impl AgentBackend for MockAgent {
    fn name(&self) -> &str {
        "mock"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        _client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        let reply = self.next_reply();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match reply {
                MockReply::Text(text) => Ok(text),
                MockReply::Timeout => Err(AgentError::Timeout(timeout)),
                MockReply::Error(message) => Err(AgentError::Api {
                    status: 500,
                    message,
                }),
            }
        })
    }
}
