//! Output formatting for CLI results

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format for CLI results
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable text (default)
    #[default]
    Plain,
    /// JSON output for machine processing
    Json,
}

/// Writes results to stdout and diagnostics to stderr
#[derive(Debug, Clone)]
pub struct OutputWriter {
    format: OutputFormat,
    verbose: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Print a result line
    pub fn print(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Print a diagnostic to stderr
    pub fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }

    /// Print a diagnostic to stderr only in verbose mode
    pub fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{}", message);
        }
    }
}
