use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome tag carried by every response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTag {
    Success,
    Failure,
}

/// The only externally observable response shape.
///
/// `data` holds the payload on success and an optional diagnostic on failure.
/// It is serialized as `null` when absent so callers always see all three keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub result: ResultTag,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            result: ResultTag::Success,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiEnvelope<Value> {
    pub fn failure(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            result: ResultTag::Failure,
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = ApiEnvelope::success("done", json!({"k": 1}));
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value, json!({"result": "success", "message": "done", "data": {"k": 1}}));
    }

    #[test]
    fn test_failure_envelope_without_diagnostic_keeps_null_data() {
        let envelope = ApiEnvelope::failure("Model returned empty output.", None);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["result"], "failure");
        assert_eq!(value["message"], "Model returned empty output.");
        assert!(value.get("data").unwrap().is_null());
    }
}
