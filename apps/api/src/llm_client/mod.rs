//! LLM Client: the single point of entry for counselling-model calls.
//!
//! Talks to the OpenRouter chat-completions API. No other module may call
//! the model directly; they go through `LlmClient` or the `TextGenerator`
//! seam in `recommendation::advisor`.
//!
//! Model: deepseek/deepseek-chat (hardcoded, not configurable)

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// The model used for every counselling call.
pub const MODEL: &str = "deepseek/deepseek-chat";
const MAX_ATTEMPTS: u32 = 3;
const BASE_BACKOFF_MS: u64 = 1000;
/// Wait after a transport failure (connect error, timeout).
const TRANSPORT_RETRY_DELAY: Duration = Duration::from_secs(1);
const APP_REFERER: &str = "https://orientation.bj";
const APP_TITLE: &str = "Système Orientation Bénin";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Sampling parameters sent with a completion request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl SamplingOptions {
    /// Full profile analysis.
    pub const ANALYSIS: SamplingOptions = SamplingOptions {
        temperature: 0.7,
        max_tokens: 2000,
        top_p: 0.9,
    };

    /// Short domain advice.
    pub const DOMAIN_ADVICE: SamplingOptions = SamplingOptions {
        temperature: 0.8,
        max_tokens: 150,
        top_p: 0.9,
    };

    /// Connectivity check: a few deterministic tokens.
    pub const CONNECTION_CHECK: SamplingOptions = SamplingOptions {
        temperature: 0.0,
        max_tokens: 20,
        top_p: 0.9,
    };
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Trimmed content of the first choice, if it has any text.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Delay before the attempt following a rate-limited or 5xx `attempt`
/// (zero-based): 1s, 2s, 4s...
pub fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_millis(BASE_BACKOFF_MS << attempt)
}

/// Wraps the OpenRouter chat-completions API with retry logic.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint: OPENROUTER_API_URL.to_string(),
        })
    }

    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// One completion. Retries 429 and 5xx with exponential backoff and
    /// transport failures after a fixed delay; other statuses fail at once.
    pub async fn complete(
        &self,
        system: &str,
        prompt: &str,
        options: SamplingOptions,
    ) -> Result<String, LlmError> {
        let request_body = ChatRequest {
            model: MODEL,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
            top_p: options.top_p,
        };

        let mut last_error: Option<LlmError> = None;
        let mut pending_delay: Option<Duration> = None;

        for attempt in 0..MAX_ATTEMPTS {
            if let Some(delay) = pending_delay.take() {
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header("HTTP-Referer", APP_REFERER)
                .header("X-Title", APP_TITLE)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    warn!("LLM transport error: {e}");
                    last_error = Some(LlmError::Http(e));
                    pending_delay = Some(TRANSPORT_RETRY_DELAY);
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(if status.as_u16() == 429 {
                    LlmError::RateLimited {
                        attempts: attempt + 1,
                    }
                } else {
                    LlmError::Api {
                        status: status.as_u16(),
                        message: body,
                    }
                });
                pending_delay = Some(backoff_delay(attempt));
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;

            if let Some(usage) = &chat.usage {
                debug!(
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens, usage.completion_tokens
                );
            }

            return chat.text().map(str::to_string).ok_or(LlmError::EmptyContent);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            attempts: MAX_ATTEMPTS,
        }))
    }
}
