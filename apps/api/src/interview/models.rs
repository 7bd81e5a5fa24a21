use serde::{Deserialize, Serialize};

/// Placeholder used in the model input for any optional field the caller left out.
pub const NOT_AVAILABLE: &str = "n/a";

/// Inbound body of `POST /interview/generate-followups`.
///
/// `role` and `interview_type` accept JSON `null` as absent. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FollowupRequest {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub interview_type: Option<Vec<String>>,
}

impl FollowupRequest {
    /// Rejects blank required fields. Shape and types are already enforced by serde.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();
        if self.question.trim().is_empty() {
            issues.push("question is empty".to_string());
        }
        if self.answer.trim().is_empty() {
            issues.push("answer is empty".to_string());
        }
        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }

    /// Fills optional fields with their defaults so prompt building never sees an `Option`.
    pub fn normalize(&self) -> NormalizedRequest<'_> {
        NormalizedRequest {
            question: &self.question,
            answer: &self.answer,
            role: self.role.as_deref().unwrap_or(NOT_AVAILABLE).to_string(),
            interview_type: self
                .interview_type
                .as_ref()
                .map(|types| types.join(", "))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// A request with every field populated, ready for prompt construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRequest<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub role: String,
    pub interview_type: String,
}

/// A single follow-up question produced by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupItem {
    pub question: String,
    pub rationale: String,
}

impl FollowupItem {
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && !self.rationale.trim().is_empty()
    }
}

/// The model's structured output, returned to the caller unchanged on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupResponse {
    pub followups: Vec<FollowupItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(role: Option<&str>, interview_type: Option<Vec<&str>>) -> FollowupRequest {
        FollowupRequest {
            question: "Describe a project.".to_string(),
            answer: "I built a chatbot.".to_string(),
            role: role.map(str::to_string),
            interview_type: interview_type
                .map(|types| types.into_iter().map(str::to_string).collect()),
        }
    }

    #[test]
    fn test_minimal_request_deserializes() {
        let req: FollowupRequest =
            serde_json::from_value(json!({"question": "Q", "answer": "A"})).unwrap();
        assert_eq!(req.role, None);
        assert_eq!(req.interview_type, None);
    }

    #[test]
    fn test_null_optionals_are_absent() {
        let req: FollowupRequest = serde_json::from_value(json!({
            "question": "Q", "answer": "A", "role": null, "interview_type": null
        }))
        .unwrap();
        assert_eq!(req.normalize().role, NOT_AVAILABLE);
        assert_eq!(req.normalize().interview_type, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_answer_is_rejected() {
        let result: Result<FollowupRequest, _> = serde_json::from_value(json!({"question": "Q"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_interview_type_must_be_a_list() {
        let result: Result<FollowupRequest, _> = serde_json::from_value(json!({
            "question": "Q", "answer": "A", "interview_type": "Technical"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_interview_type_entries_must_be_text() {
        let result: Result<FollowupRequest, _> = serde_json::from_value(json!({
            "question": "Q", "answer": "A", "interview_type": ["Technical", 3]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_flags_blank_required_fields() {
        let mut req = request(None, None);
        req.question = "   ".to_string();
        req.answer = String::new();
        let issues = req.validate().unwrap_err();
        assert_eq!(issues, vec!["question is empty", "answer is empty"]);
        assert!(request(None, None).validate().is_ok());
    }

    #[test]
    fn test_normalize_defaults_to_not_available() {
        let req = request(None, None);
        let normalized = req.normalize();
        assert_eq!(normalized.role, "n/a");
        assert_eq!(normalized.interview_type, "n/a");
    }

    #[test]
    fn test_normalize_joins_interview_types_in_order() {
        let req = request(Some("AI Engineer"), Some(vec!["Technical", "Screening"]));
        let normalized = req.normalize();
        assert_eq!(normalized.role, "AI Engineer");
        assert_eq!(normalized.interview_type, "Technical, Screening");
    }

    #[test]
    fn test_followup_item_requires_question_field_name() {
        let result: Result<FollowupItem, _> = serde_json::from_value(json!({
            "followup_question": "Why?", "rationale": "Depth."
        }));
        assert!(result.is_err(), "the legacy followup_question name must not be accepted");
    }

    #[test]
    fn test_followup_item_completeness() {
        let item = FollowupItem {
            question: "Why Rust?".to_string(),
            rationale: " ".to_string(),
        };
        assert!(!item.is_complete());
    }
}
