//! Prompt sources
//!
//! System prompts live outside the binary in production so they can be tuned
//! without a rebuild. The built-in loader serves the compiled-in text.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use vulnscore_core::config::PromptConfig;

use super::templates::CVSS_SYSTEM_PROMPT;

/// Error loading a prompt
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read prompt file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt '{name}' is empty")]
    Empty { name: String },

    #[error("Invalid prompt name '{name}'")]
    InvalidName { name: String },
}

/// Source of named prompt texts
#[async_trait]
pub trait PromptLoader: Send + Sync {
    async fn load(&self, name: &str) -> Result<String, PromptError>;
}

/// Reads prompts from `<directory>/<name>`
#[derive(Debug, Clone)]
pub struct FilePromptLoader {
    directory: PathBuf,
}

impl FilePromptLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, PromptError> {
        let relative = Path::new(name);
        // Plain file names only; no escaping the prompt directory
        let is_plain = relative.components().count() == 1
            && matches!(
                relative.components().next(),
                Some(std::path::Component::Normal(_))
            );
        if !is_plain {
            return Err(PromptError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.directory.join(relative))
    }
}

#[async_trait]
impl PromptLoader for FilePromptLoader {
    async fn load(&self, name: &str) -> Result<String, PromptError> {
        let path = self.resolve(name)?;
        debug!(path = %path.display(), "Loading prompt file");

        let text = tokio::fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                PromptError::NotFound { path: path.clone() }
            } else {
                PromptError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        if text.trim().is_empty() {
            return Err(PromptError::Empty {
                name: name.to_string(),
            });
        }

        Ok(text)
    }
}

/// Serves the compiled-in CVSS system prompt for any name
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinPromptLoader;

#[async_trait]
impl PromptLoader for BuiltinPromptLoader {
    async fn load(&self, _name: &str) -> Result<String, PromptError> {
        Ok(CVSS_SYSTEM_PROMPT.to_string())
    }
}

/// Pick the loader described by the prompt configuration
pub fn prompt_loader_from_config(config: &PromptConfig) -> Arc<dyn PromptLoader> {
    match &config.directory {
        Some(directory) => Arc::new(FilePromptLoader::new(directory)),
        None => Arc::new(BuiltinPromptLoader),
    }
}
