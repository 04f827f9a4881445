//! LLM-specific error types
//!
//! Typed errors let the resilience layer decide what is worth retrying.

use std::fmt;
use std::time::Duration;

/// LLM operation error
#[derive(Debug, Clone)]
pub enum LlmError {
    /// Authentication failed (invalid API key, expired token, etc.)
    Authentication(String),

    /// Rate limited by the provider
    RateLimited {
        /// Seconds to wait before retrying (if provided)
        retry_after: Option<u64>,
        message: String,
    },

    /// Request was rejected as malformed
    InvalidRequest(String),

    /// Model or deployment not found
    ModelNotFound(String),

    /// Network/connection error
    Network(String),

    /// Request timed out
    Timeout {
        /// Configured timeout in seconds (0 when unknown)
        seconds: u64,
    },

    /// Service temporarily unavailable
    ServiceUnavailable(String),

    /// Provider returned an unexpected response
    InvalidResponse(String),

    /// Provider is missing required settings
    Configuration(String),

    /// Circuit breaker is open
    CircuitOpen { circuit: String },

    Other(String),
}

impl LlmError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LlmError::RateLimited { .. }
                | LlmError::Network(_)
                | LlmError::Timeout { .. }
                | LlmError::ServiceUnavailable(_)
        )
    }

    /// Get retry-after duration if the provider sent one
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            LlmError::RateLimited { retry_after, .. } => retry_after.map(Duration::from_secs),
            _ => None,
        }
    }

    pub fn rate_limited(message: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimited {
            retry_after,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Authentication(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            LlmError::RateLimited {
                message,
                retry_after: Some(secs),
            } => write!(f, "Rate limited: {} (retry after {}s)", message, secs),
            LlmError::RateLimited { message, .. } => write!(f, "Rate limited: {}", message),
            LlmError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            LlmError::ModelNotFound(model) => write!(f, "Model not found: {}", model),
            LlmError::Network(msg) => write!(f, "Network error: {}", msg),
            LlmError::Timeout { seconds: 0 } => write!(f, "Request timed out"),
            LlmError::Timeout { seconds } => write!(f, "Request timed out after {}s", seconds),
            LlmError::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            LlmError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            LlmError::CircuitOpen { circuit } => {
                write!(f, "Circuit breaker open for: {}", circuit)
            }
            LlmError::Other(msg) => write!(f, "LLM error: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout { seconds: 0 }
        } else if err.is_connect() {
            LlmError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            LlmError::InvalidResponse(format!("Malformed response body: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::InvalidResponse(format!("JSON parse error: {}", err))
    }
}
