//! Vulnerability record consumed by CVSS generation

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single vulnerability row as handed to the scorer.
///
/// Only `id` and `title` are required. Any other column that arrives with the
/// record (package name, CWE, affected versions, ...) is kept in `extra` and
/// forwarded to the model as additional context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerabilityRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VulnerabilityRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an extra field; a later value for the same key replaces the earlier one.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Description, with blank strings treated as absent.
    pub fn description(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Extra fields rendered as `(key, text)` pairs, sorted by key.
    ///
    /// Nulls are skipped; strings are emitted without JSON quoting.
    pub fn context_fields(&self) -> Vec<(&str, String)> {
        self.extra
            .iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.as_str(), text)
            })
            .collect()
    }
}
