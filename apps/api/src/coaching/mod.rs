// Coaching engine: feature templates, prompt dispatch and the weekly schedule.
// All model calls go through llm_client. Nothing here talks HTTP to Gemini directly.

pub mod dispatcher;
pub mod features;
pub mod handlers;
pub mod info;
pub mod prompts;
pub mod registry;
pub mod schedule;
