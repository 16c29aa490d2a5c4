//! Gemini REST API agent.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::{AgentBackend, AgentError};
use crate::config::AgentConfig;

/// Agent backed by the Google Gemini `generateContent` HTTP endpoint.
pub struct GeminiAgent {
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiAgent {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(&config.api_key, &config.model, &config.endpoint)
    }

    fn url(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

impl AgentBackend for GeminiAgent {
    fn name(&self) -> &str {
        "Gemini"
    }

    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        client: &'a reqwest::Client,
        timeout: Duration,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
        Box::pin(async move {
            let body = GenerateContentRequest {
                contents: vec![Content {
                    role: "user".to_string(),
                    parts: vec![Part {
                        text: prompt.to_string(),
                    }],
                }],
            };

            let resp = client
                .post(self.url())
                .json(&body)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        AgentError::Timeout(timeout)
                    } else {
                        AgentError::Http(e.to_string())
                    }
                })?;

            let status = resp.status();
            if !status.is_success() {
                let message = read_error_message(resp).await;
                return Err(match status {
                    StatusCode::TOO_MANY_REQUESTS => AgentError::RateLimited(message),
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        AgentError::Auth(message)
                    }
                    _ => AgentError::Api {
                        status: status.as_u16(),
                        message,
                    },
                });
            }

            let parsed: GenerateContentResponse = resp
                .json()
                .await
                .map_err(|_| AgentError::MalformedResponse)?;
            extract_text(parsed)
        })
    }
}

// ── Wire types ──────────────────────────────────────────────────────────

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, AgentError> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(AgentError::MalformedResponse)
}

/// Pull the human-readable message out of a Gemini error body
/// (`{"error": {"message": ...}}`), falling back to the raw body.
async fn read_error_message(resp: reqwest::Response) -> String {
    let body = resp.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorWrapper>(&body)
        .ok()
        .and_then(|w| w.error.message)
        .unwrap_or(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_comes_from_first_candidate() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"first"}]}},
                              {"content":{"parts":[{"text":"second"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(parsed).unwrap(), "first");
    }

    #[test]
    fn response_without_text_is_malformed() {
        let parsed: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(matches!(
            extract_text(parsed),
            Err(AgentError::MalformedResponse)
        ));
    }

    #[test]
    fn url_embeds_model_and_key() {
        let agent = GeminiAgent::new("k123", "gemini-2.5-flash", "https://example.test/models");
        assert_eq!(
            agent.url(),
            "https://example.test/models/gemini-2.5-flash:generateContent?key=k123"
        );
    }
}
