//! LLM Client: the single point of entry for all model calls in the service.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! All model interactions MUST go through this module.
//!
//! Model, reasoning effort and output cap are hardcoded; do not make them configurable.
//! There is no retry loop: any failure here is terminal for the request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all follow-up generation calls.
pub const MODEL: &str = "gpt-5-mini";
pub const REASONING_EFFORT: ReasoningEffort = ReasoningEffort::Low;
pub const MAX_OUTPUT_TOKENS: u32 = 2000;
/// Upper bound on upstream error text carried into `LlmError::Api`.
const MAX_ERROR_MESSAGE_CHARS: usize = 300;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not decode model response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub effort: ReasoningEffort,
    pub max_output_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            effort: REASONING_EFFORT,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// One model call: fixed instructions, per-request input, bounded generation.
/// Built fresh for every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInvocation {
    pub model: &'static str,
    pub instructions: String,
    pub input: String,
    pub params: GenerationParams,
}

/// What the follow-up pipeline needs to know about a finished model call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelOutput {
    pub status: Option<String>,
    pub incomplete_reason: Option<String>,
    pub output_text: Option<String>,
}

impl ModelOutput {
    pub fn is_incomplete(&self) -> bool {
        self.status.as_deref() == Some("incomplete")
    }
}

/// The model backend seam. Implement this to swap the upstream service
/// without touching handlers or the validation chain.
///
/// Carried in `AppState` as `Arc<dyn ModelBackend>`.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn invoke(&self, invocation: &ModelInvocation) -> Result<ModelOutput, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// OpenAI Responses API wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
    reasoning: Reasoning,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Reasoning {
    effort: ReasoningEffort,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesApiResponse {
    pub status: Option<String>,
    pub incomplete_details: Option<IncompleteDetails>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct IncompleteDetails {
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type")]
    pub part_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl ResponsesApiResponse {
    /// Concatenates every `output_text` part of every `message` item.
    /// Returns `None` when the response carries no text parts at all.
    pub fn output_text(&self) -> Option<String> {
        let mut parts = self
            .output
            .iter()
            .filter(|item| item.item_type == "message")
            .flat_map(|item| item.content.iter())
            .filter(|part| part.part_type == "output_text")
            .filter_map(|part| part.text.as_deref())
            .peekable();

        parts.peek()?;
        Some(parts.collect())
    }
}

impl From<ResponsesApiResponse> for ModelOutput {
    fn from(response: ResponsesApiResponse) -> Self {
        ModelOutput {
            output_text: response.output_text(),
            incomplete_reason: response.incomplete_details.and_then(|d| d.reason),
            status: response.status,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The single LLM client used by the service.
/// Wraps the OpenAI Responses API with an explicit total timeout.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn responses_url(&self) -> String {
        format!("{}/responses", self.base_url)
    }

    /// Makes a single call to the Responses API, returning the decoded response.
    pub async fn call(&self, invocation: &ModelInvocation) -> Result<ResponsesApiResponse, LlmError> {
        let request_body = ResponsesRequest {
            model: invocation.model,
            instructions: &invocation.instructions,
            input: &invocation.input,
            reasoning: Reasoning {
                effort: invocation.params.effort,
            },
            max_output_tokens: invocation.params.max_output_tokens,
        };

        let response = self
            .client
            .post(self.responses_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Try to parse error message
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            let message = truncate_chars(&message, MAX_ERROR_MESSAGE_CHARS);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ResponsesApiResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "LLM call finished: status={:?}, input_tokens={}, output_tokens={}",
                parsed.status, usage.input_tokens, usage.output_tokens
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl ModelBackend for LlmClient {
    async fn invoke(&self, invocation: &ModelInvocation) -> Result<ModelOutput, LlmError> {
        self.call(invocation).await.map(ModelOutput::from)
    }
}

/// Keeps at most `max` characters, marking the cut with an ellipsis.
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
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
