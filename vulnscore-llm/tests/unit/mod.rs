//! Unit tests for vulnscore-llm use cases and prompts

#[path = "../common/mod.rs"]
mod common;

mod test_prompts;
