//! LLM Client — the single point of entry for all completion calls in OnRamp.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! All LLM interactions MUST go through `CompletionClient`.
//!
//! Wire format: OpenAI-compatible chat completions. Calls are made once;
//! failures are returned to the caller as a typed `LlmError`, never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Deterministic sampling for recommendations.
pub const TEMPERATURE: f32 = 0.0;
pub const MAX_TOKENS: u32 = 500;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("authentication failed (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LlmError {
    /// Stable machine-readable code for error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            LlmError::Network(_) => "LLM_NETWORK_ERROR",
            LlmError::Auth { .. } => "LLM_AUTH_ERROR",
            LlmError::RateLimited { .. } => "LLM_RATE_LIMITED",
            LlmError::Api { .. } => "LLM_API_ERROR",
            LlmError::MalformedResponse(_) | LlmError::EmptyContent => "LLM_MALFORMED_RESPONSE",
            LlmError::Encode(_) => "LLM_ENCODE_ERROR",
        }
    }
}

/// One completion call: a system instruction plus a single user message.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: system.into(),
            user: user.into(),
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: String,
}

/// The completion seam. `AppState` carries an `Arc<dyn CompletionClient>`
/// so handlers and tests never depend on the HTTP implementation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for OpenAI and API-compatible hosts.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        let body = ChatRequest {
            model: &request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            warn!("Completion API returned {}: {}", status, raw);
            return Err(classify_failure(status, &raw));
        }

        let parsed: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::MalformedResponse(format!("undecodable body: {e}")))?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        let model = parsed.model.unwrap_or_else(|| request.model.clone());
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::MalformedResponse("response contained no choices".to_string()))?;

        let text = choice
            .message
            .content
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        Ok(Completion { text, model })
    }
}

/// Maps a non-success status and its body to a typed failure.
fn classify_failure(status: StatusCode, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited { message },
        _ => LlmError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
