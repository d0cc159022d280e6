//! LLM Client — the single point of entry for all text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Everything goes through the `TextGenerator` trait, which `LlmClient`
//! implements and `AppState` carries as `Arc<dyn TextGenerator>`.
//!
//! Model: claude-sonnet-4-5 (hardcoded — do not make configurable to prevent drift)

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::{ChatMessage, Role};

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const BASE_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("No user message to send")]
    EmptyPrompt,
}

impl LlmError {
    /// Transient failures worth another attempt: network errors, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => !e.is_decode() && !e.is_builder(),
            LlmError::Api { status, .. } => *status == 429 || *status >= 500,
            LlmError::RateLimited { .. } => true,
            LlmError::Parse(_) | LlmError::EmptyContent | LlmError::EmptyPrompt => false,
        }
    }
}

/// Anything that can turn a system prompt plus a transcript into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the model's raw text. An empty string means the model produced nothing.
    async fn generate(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Wraps the Anthropic Messages API with bounded, jittered retry.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    max_attempts: u32,
}

impl LlmClient {
    /// `timeout: None` leaves reqwest's default (no overall request timeout).
    pub fn new(
        api_key: String,
        timeout: Option<Duration>,
        max_attempts: u32,
    ) -> Result<Self, LlmError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_key,
            max_attempts: max_attempts.max(1),
        })
    }

    /// Makes a raw call to the Claude API, returning the full response object.
    /// Retries transient failures (network, 429, 5xx) with exponential backoff plus jitter;
    /// other 4xx responses and undecodable bodies fail immediately.
    pub async fn call(&self, system: &str, messages: &[ChatMessage]) -> Result<LlmResponse, LlmError> {
        let transcript = normalize_transcript(messages);
        if transcript.is_empty() {
            return Err(LlmError::EmptyPrompt);
        }

        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: transcript
                .iter()
                .map(|m| AnthropicMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.send_once(&request_body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() => {
                    warn!("LLM call failed with retryable error: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: self.max_attempts,
        }))
    }

    async fn send_once(&self, request_body: &AnthropicRequest<'_>) -> Result<LlmResponse, LlmError> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, system: &str, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let response = self.call(system, messages).await?;
        Ok(response.text().unwrap_or_default().to_string())
    }
}

/// Calls the generator with a single user prompt and deserializes the reply as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    system: &str,
    prompt: &str,
) -> Result<T, LlmError> {
    let text = generator
        .generate(system, &[ChatMessage::user(prompt)])
        .await?;

    if text.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    serde_json::from_str(strip_json_fences(&text)).map_err(LlmError::Parse)
}

/// Exponential backoff (1s, 2s, 4s, ...) plus up to 50% random jitter.
fn backoff_delay(attempt: u32) -> Duration {
    let base = BASE_BACKOFF_MS.saturating_mul(1u64 << (attempt - 1).min(6));
    let jitter = rand::thread_rng().gen_range(0..=base / 2);
    Duration::from_millis(base + jitter)
}

/// Reshapes a conversation into what the Messages API accepts: no system turns,
/// starting with a user turn, strictly alternating roles.
///
/// Blank history turns are dropped; the final user turn is always kept, even when
/// it is whitespace only, so every validated message reaches the API.
fn normalize_transcript(messages: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut out: Vec<ChatMessage> = Vec::with_capacity(messages.len());
    let last = messages.len().saturating_sub(1);

    for (i, msg) in messages.iter().enumerate() {
        if msg.role == Role::System {
            continue;
        }
        let is_final_user_turn = i == last && msg.role == Role::User;
        if msg.content.trim().is_empty() && !is_final_user_turn {
            continue;
        }
        if out.is_empty() && msg.role != Role::User {
            continue;
        }
        match out.last_mut() {
            Some(prev) if prev.role == msg.role => {
                prev.content.push_str("\n\n");
                prev.content.push_str(&msg.content);
            }
            _ => out.push(msg.clone()),
        }
    }

    out
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
