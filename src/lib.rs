//! vulnscore - LLM-assisted CVSS 3.1 vector generation and scoring
//!
//! The library half of the binary exposes the command-line layer; the
//! scoring and generation logic lives in `vulnscore-core` and `vulnscore-llm`.

pub mod cli;

pub use vulnscore_core::{Config, safe_cvss_score};
pub use vulnscore_llm::GenerateCvssUseCase;
