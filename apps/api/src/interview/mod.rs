// Interview follow-ups: request validation, prompt construction, model call,
// and classification of the model output.
// All model calls go through llm_client; no direct OpenAI calls here.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
