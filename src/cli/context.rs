//! CLI Context - configuration and output shared by all commands

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use vulnscore_core::config::Config;
use vulnscore_core::init_tracing;

use crate::cli::Cli;
use crate::cli::output::OutputWriter;

/// Services every command needs
pub struct CliContext {
    /// Application configuration
    pub config: Arc<Config>,

    /// Output writer configured based on CLI flags
    pub output: OutputWriter,
}

impl CliContext {
    /// Load configuration and install the tracing subscriber
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = Self::load_config(cli.config.as_deref())?;

        if cli.verbose {
            config.logging.level = "debug".to_string();
        }

        init_tracing(&config.logging).context("Failed to initialize logging")?;

        Ok(Self {
            config: Arc::new(config),
            output: OutputWriter::new(cli.format, cli.verbose),
        })
    }

    fn load_config(path: Option<&Path>) -> Result<Config> {
        Config::load_from(path).with_context(|| match path {
            Some(path) => format!("Failed to load configuration from {}", path.display()),
            None => "Failed to load configuration".to_string(),
        })
    }
}
