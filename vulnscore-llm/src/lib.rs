//! vulnscore LLM - model-assisted CVSS vector generation
//!
//! - [`domain`] - provider-agnostic messages, errors and the [`LlmProvider`] trait
//! - [`infrastructure`] - OpenAI-compatible provider, resilience wrapper,
//!   prompt loading/rendering and response parsing
//! - [`application`] - the [`GenerateCvssUseCase`]

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::{GenerateCvssUseCase, GenerationError};
pub use domain::*;
pub use infrastructure::prompts;
pub use infrastructure::providers::{OpenAIProvider, ResilienceConfig, ResilientProvider};
pub use infrastructure::{ResponseParser, create_provider};
