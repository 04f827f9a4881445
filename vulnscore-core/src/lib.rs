//! vulnscore Core - shared foundation for the vulnscore workspace
//!
//! # Modules
//!
//! - [`config`] - Layered configuration (files + `VULNSCORE__*` environment variables)
//! - [`domain`] - Vulnerability records and the CVSS score value object
//! - [`infrastructure`] - Adapters over third-party libraries (CVSS parsing)
//! - [`logging`] - Structured logging with tracing
//!
//! # Scoring
//!
//! Model output is untrusted, so scoring is a total function:
//!
//! ```rust
//! use vulnscore_core::safe_cvss_score;
//!
//! let score = safe_cvss_score(Some("CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"));
//! assert_eq!(score, Some(9.8));
//!
//! assert_eq!(safe_cvss_score(Some("INVALID:STRING")), None);
//! assert_eq!(safe_cvss_score(None), None);
//! ```
//!
//! # Logging
//!
//! ```rust,ignore
//! use vulnscore_core::{Config, init_tracing};
//!
//! let config = Config::load()?;
//! init_tracing(&config.logging)?;
//! ```

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use domain::{CvssScore, ScoreError, Severity, VulnerabilityRecord};
pub use infrastructure::cvss::{safe_cvss_score, safe_cvss_severity, try_score};
pub use logging::init_tracing;
