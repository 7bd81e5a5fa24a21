//! Follow-up Generation: builds the model call and classifies its outcome.
//!
//! Flow: normalize request → build invocation → invoke model →
//!       check complete → check non-empty → check schema → check non-empty list.
//!
//! Each check is a terminal exit with its own `FollowupError` variant.
//! Nothing is retried.

use serde_json::{json, Value};
use tracing::info;

use crate::interview::models::{FollowupRequest, FollowupResponse};
use crate::interview::prompts::{build_followup_input, followup_instructions};
use crate::llm_client::{
    strip_json_fences, GenerationParams, ModelBackend, ModelInvocation, ModelOutput, MODEL,
};

/// Every way follow-up generation can fail, in chain order.
///
/// `Display` is the fixed user-visible message; `diagnostic()` carries the detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FollowupError {
    /// The model call itself failed (transport, timeout, non-2xx, undecodable body).
    #[error("OpenAI client failed.")]
    Upstream(String),

    /// The model flagged its output as cut off. Carries the declared reason.
    #[error("Model output incomplete.")]
    Incomplete(Option<String>),

    #[error("Model returned empty output.")]
    EmptyOutput,

    /// Output is not JSON or does not match `FollowupResponse`. Carries the raw text.
    #[error("Failed to parse output text.")]
    Parse(String),

    #[error("Model returned empty follow-ups list.")]
    EmptyList,
}

impl FollowupError {
    /// Short machine-readable tag for logs.
    pub fn category(&self) -> &'static str {
        match self {
            FollowupError::Upstream(_) => "upstream_error",
            FollowupError::Incomplete(_) => "incomplete",
            FollowupError::EmptyOutput => "empty_output",
            FollowupError::Parse(_) => "parse_error",
            FollowupError::EmptyList => "empty_list",
        }
    }

    /// Detail safe to hand back to the caller in the envelope's `data`.
    pub fn diagnostic(&self) -> Option<Value> {
        match self {
            FollowupError::Upstream(cause) => Some(json!(cause)),
            FollowupError::Incomplete(reason) => reason.as_ref().map(|r| json!(r)),
            FollowupError::Parse(raw) => Some(json!(raw)),
            FollowupError::EmptyOutput | FollowupError::EmptyList => None,
        }
    }
}

/// Builds the single model call for a request. Pure: same request, same invocation.
pub fn build_invocation(request: &FollowupRequest) -> ModelInvocation {
    let normalized = request.normalize();
    ModelInvocation {
        model: MODEL,
        instructions: followup_instructions(),
        input: build_followup_input(&normalized),
        params: GenerationParams::default(),
    }
}

/// Runs the full pipeline for one request against the given backend.
pub async fn generate_followups(
    llm: &dyn ModelBackend,
    request: &FollowupRequest,
) -> Result<FollowupResponse, FollowupError> {
    let invocation = build_invocation(request);

    let output = llm
        .invoke(&invocation)
        .await
        .map_err(|e| FollowupError::Upstream(e.to_string()))?;

    let response = validate_model_output(output)?;
    info!("Generated {} follow-up question(s)", response.followups.len());
    Ok(response)
}

/// Classifies a finished model call. Checks run in a fixed order and the
/// first failing check decides the outcome.
pub fn validate_model_output(output: ModelOutput) -> Result<FollowupResponse, FollowupError> {
    if output.is_incomplete() {
        return Err(FollowupError::Incomplete(output.incomplete_reason));
    }

    let raw = match output.output_text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(FollowupError::EmptyOutput),
    };

    let parsed = match parse_followups(&raw) {
        Some(parsed) => parsed,
        None => return Err(FollowupError::Parse(raw)),
    };

    if parsed.followups.is_empty() {
        return Err(FollowupError::EmptyList);
    }

    Ok(parsed)
}

/// Parses and schema-checks model text. Items with a blank question or
/// rationale do not match the shape.
fn parse_followups(raw: &str) -> Option<FollowupResponse> {
    let parsed: FollowupResponse = serde_json::from_str(strip_json_fences(raw)).ok()?;
    parsed
        .followups
        .iter()
        .all(|item| item.is_complete())
        .then_some(parsed)
}
