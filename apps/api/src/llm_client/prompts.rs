// Shared instruction fragments.
// Each feature that needs model calls defines its own prompts.rs alongside it
// and composes these cross-cutting pieces into its instructions.

/// Enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Keeps generated content neutral and away from protected characteristics.
pub const SAFETY_INSTRUCTION: &str = "Stay neutral, professional and safe. \
    NEVER ask about or reference sensitive personal topics such as race, ethnicity, \
    gender, age, religion, sexual orientation, disability, health, marital or family status, \
    or political affiliation. \
    NEVER give advice, feedback or opinions on the answer.";
