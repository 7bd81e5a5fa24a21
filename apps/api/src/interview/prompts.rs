// All model prompt text for the follow-up feature.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::interview::models::NormalizedRequest;
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, SAFETY_INSTRUCTION};

/// Role framing for follow-up generation.
pub const FOLLOWUP_ROLE: &str = "You are an experienced interviewer. \
    Given an interview question and the candidate's answer, write follow-up questions \
    that probe deeper into what the candidate said.";

/// Output contract. Field names here are the only ones the parser accepts.
pub const FOLLOWUP_RULES: &str = r#"RULES:
1. Produce between 1 and 3 follow-up questions.
2. Each question must be under 50 words.
3. Pair each question with a one-sentence rationale explaining why it is relevant.
4. Build on the candidate's answer; tailor to the role and interview type when given ("n/a" means unknown).

Return a JSON object with this EXACT schema (no extra fields):
{
  "followups": [
    {
      "question": "The follow-up question text",
      "rationale": "One sentence on why this question is relevant"
    }
  ]
}"#;

/// Builds the fixed instruction text sent with every call. Not user-controllable.
pub fn followup_instructions() -> String {
    format!("{FOLLOWUP_ROLE}\n\n{SAFETY_INSTRUCTION}\n\n{FOLLOWUP_RULES}\n\n{JSON_ONLY_INSTRUCTION}")
}

/// Builds the per-call input block: question, answer, role, interview type, in that order.
///
/// Each field is interpolated exactly once, so user text containing braces or
/// label-like lines is never re-substituted.
pub fn build_followup_input(request: &NormalizedRequest<'_>) -> String {
    format!(
        "Original question: {}\nCandidate answer: {}\nRole: {}\nInterview type: {}",
        request.question.trim(),
        request.answer.trim(),
        request.role,
        request.interview_type
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized<'a>(question: &'a str, answer: &'a str) -> NormalizedRequest<'a> {
        NormalizedRequest {
            question,
            answer,
            role: "n/a".to_string(),
            interview_type: "n/a".to_string(),
        }
    }

    #[test]
    fn test_input_embeds_fields_in_fixed_order() {
        let input = build_followup_input(&NormalizedRequest {
            question: "Describe a project.",
            answer: "I built a chatbot.",
            role: "AI Engineer".to_string(),
            interview_type: "Technical, Screening".to_string(),
        });
        assert_eq!(
            input,
            "Original question: Describe a project.\n\
             Candidate answer: I built a chatbot.\n\
             Role: AI Engineer\n\
             Interview type: Technical, Screening"
        );
    }

    #[test]
    fn test_input_does_not_resubstitute_user_text() {
        let input = build_followup_input(&normalized("What is {answer}?", "{role}"));
        assert!(input.contains("Original question: What is {answer}?"));
        assert!(input.contains("Candidate answer: {role}"));
        assert!(input.ends_with("Interview type: n/a"));
    }

    #[test]
    fn test_input_is_deterministic() {
        let first = build_followup_input(&normalized("Q", "A"));
        let second = build_followup_input(&normalized("Q", "A"));
        assert_eq!(first, second);
    }

    #[test]
    fn test_instructions_pin_schema_and_constraints() {
        let instructions = followup_instructions();
        assert!(instructions.contains("\"question\""));
        assert!(instructions.contains("\"rationale\""));
        assert!(!instructions.contains("followup_question"));
        assert!(instructions.contains("between 1 and 3"));
        assert!(instructions.contains("under 50 words"));
        assert!(instructions.contains("sexual orientation"));
        assert!(instructions.contains("valid JSON only"));
    }
}
