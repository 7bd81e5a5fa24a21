//! Axum route handlers for the Interview API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extract::ValidatedJson;
use crate::interview::generator::generate_followups;
use crate::interview::models::{FollowupRequest, FollowupResponse};
use crate::models::envelope::ApiEnvelope;
use crate::state::AppState;

pub const FOLLOWUPS_GENERATED_MESSAGE: &str = "Follow-up question generated.";

/// POST /interview/generate-followups
///
/// Validates the payload, asks the model for 1–3 follow-up questions and
/// returns them unchanged inside a success envelope.
pub async fn handle_generate_followups(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<FollowupRequest>,
) -> Result<Json<ApiEnvelope<FollowupResponse>>, AppError> {
    if let Err(issues) = request.validate() {
        return Err(AppError::Validation(issues.join(", ")));
    }

    let followups = generate_followups(state.llm.as_ref(), &request).await?;

    Ok(Json(ApiEnvelope::success(FOLLOWUPS_GENERATED_MESSAGE, followups)))
}

/// Any non-POST method on the follow-ups path.
pub async fn handle_method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
