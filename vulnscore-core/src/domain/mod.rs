//! Core domain types

pub mod record;
pub mod score;

pub use record::VulnerabilityRecord;
pub use score::{CvssScore, ScoreError, Severity};
