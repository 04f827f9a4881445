//! CVSS vector scoring
//!
//! The arithmetic belongs to the `cvss` crate; this module is the boundary
//! between untrusted vector strings (typically model output) and numeric use.

use std::str::FromStr;

use tracing::debug;

use crate::domain::{CvssScore, ScoreError, Severity};

/// Base metrics every v3 vector must carry
const BASE_METRICS: [&str; 8] = ["AV", "AC", "PR", "UI", "S", "C", "I", "A"];

/// Temporal and environmental metrics with their allowed values.
/// They do not affect the base score but are legal in a full v3 vector.
const NON_BASE_METRICS: [(&str, &[&str]); 14] = [
    ("E", &["X", "U", "P", "F", "H"]),
    ("RL", &["X", "O", "T", "W", "U"]),
    ("RC", &["X", "U", "R", "C"]),
    ("CR", &["X", "L", "M", "H"]),
    ("IR", &["X", "L", "M", "H"]),
    ("AR", &["X", "L", "M", "H"]),
    ("MAV", &["X", "N", "A", "L", "P"]),
    ("MAC", &["X", "L", "H"]),
    ("MPR", &["X", "N", "L", "H"]),
    ("MUI", &["X", "N", "R"]),
    ("MS", &["X", "U", "C"]),
    ("MC", &["X", "N", "L", "H"]),
    ("MI", &["X", "N", "L", "H"]),
    ("MA", &["X", "N", "L", "H"]),
];

/// Parse a CVSS v3 vector and compute its base score.
///
/// Leading and trailing whitespace is ignored. Temporal and environmental
/// metrics are validated and then set aside. Any parse or validation failure
/// (unknown prefix, wrong version, unknown or repeated metric, bad metric
/// values) is reported as [`ScoreError::Parse`], as is a vector that omits
/// any base metric.
pub fn try_score(vector: &str) -> Result<CvssScore, ScoreError> {
    let vector = vector.trim();
    if vector.is_empty() {
        return Err(ScoreError::Missing);
    }

    let parse_error = |reason: String| ScoreError::Parse {
        vector: vector.to_string(),
        reason,
    };

    let base_vector = base_only(vector).map_err(parse_error)?;

    let base = cvss::v3::Base::from_str(&base_vector).map_err(|e| parse_error(e.to_string()))?;

    // The parser leaves absent metrics unset rather than failing
    let missing = missing_base_metrics(&base_vector);
    if !missing.is_empty() {
        return Err(parse_error(format!(
            "missing base metrics: {}",
            missing.join(", ")
        )));
    }

    CvssScore::new(vector, base.score().value())
}

/// Strip temporal and environmental components, keeping the prefix and the
/// base components in their original order.
fn base_only(vector: &str) -> Result<String, String> {
    let mut components = vector.split('/');
    let prefix = components.next().unwrap_or_default();

    let mut seen: Vec<&str> = Vec::new();
    let mut base = vec![prefix];

    for component in components {
        let Some((metric, value)) = component.split_once(':') else {
            return Err(format!("malformed metric component `{}`", component));
        };

        if seen.contains(&metric) {
            return Err(format!("metric `{}` appears more than once", metric));
        }
        seen.push(metric);

        if BASE_METRICS.contains(&metric) {
            base.push(component);
            continue;
        }

        match NON_BASE_METRICS.iter().find(|(name, _)| *name == metric) {
            Some((_, allowed)) if allowed.contains(&value) => {}
            Some(_) => {
                return Err(format!("invalid value `{}` for metric `{}`", value, metric));
            }
            None => return Err(format!("unknown CVSS metric name: `{}`", metric)),
        }
    }

    Ok(base.join("/"))
}

/// Base score of `vector`, or `None` when it is absent or cannot be scored.
pub fn safe_cvss_score(vector: Option<&str>) -> Option<f64> {
    score_or_none(vector).map(|score| score.base_score)
}

/// Severity rating of `vector`, or `None` when it is absent or cannot be scored.
pub fn safe_cvss_severity(vector: Option<&str>) -> Option<Severity> {
    score_or_none(vector).map(|score| score.severity)
}

fn missing_base_metrics(vector: &str) -> Vec<&'static str> {
    let present: Vec<&str> = vector
        .split('/')
        .skip(1)
        .filter_map(|component| component.split_once(':').map(|(metric, _)| metric))
        .collect();

    BASE_METRICS
        .iter()
        .copied()
        .filter(|metric| !present.contains(metric))
        .collect()
}

fn score_or_none(vector: Option<&str>) -> Option<CvssScore> {
    let vector = vector?;
    match try_score(vector) {
        Ok(score) => Some(score),
        Err(e) => {
            debug!(error = %e, "Discarding unscorable CVSS vector");
            None
        }
    }
}
