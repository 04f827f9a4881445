//! CVSS base score value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Qualitative severity rating from the CVSS v3 specification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,     // 0.0
    Low,      // 0.1 - 3.9
    Medium,   // 4.0 - 6.9
    High,     // 7.0 - 8.9
    Critical, // 9.0 - 10.0
}

impl Severity {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s <= 0.0 => Severity::None,
            s if s < 4.0 => Severity::Low,
            s if s < 7.0 => Severity::Medium,
            s if s < 9.0 => Severity::High,
            _ => Severity::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully scored CVSS vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvssScore {
    /// The vector as it was parsed (surrounding whitespace removed)
    pub vector: String,
    /// Base score, always within `0.0..=10.0`
    pub base_score: f64,
    pub severity: Severity,
}

impl CvssScore {
    pub fn new(vector: impl Into<String>, base_score: f64) -> Result<Self, ScoreError> {
        if !base_score.is_finite() || !(0.0..=10.0).contains(&base_score) {
            return Err(ScoreError::OutOfRange(base_score));
        }

        Ok(Self {
            vector: vector.into(),
            base_score,
            severity: Severity::from_score(base_score),
        })
    }
}

/// Reasons a candidate vector could not be scored
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoreError {
    #[error("no CVSS vector supplied")]
    Missing,

    #[error("invalid CVSS vector '{vector}': {reason}")]
    Parse { vector: String, reason: String },

    #[error("base score {0} is outside the CVSS range 0.0-10.0")]
    OutOfRange(f64),
}
