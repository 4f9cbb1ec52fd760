// Study planning: request schema, prompt construction, provider call,
// and the two output paths (PDF document, normalized line list).
// All provider calls go through llm_client::TextGenerator.

pub mod day_parser;
pub mod generator;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
