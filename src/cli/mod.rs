//! vulnscore CLI - score CVSS vectors and ask a model to produce them
//!
//! `score` is fully offline. `generate` calls the configured
//! OpenAI-compatible endpoint and scores whatever comes back.

mod commands;
mod context;
mod output;

pub use context::CliContext;
pub use output::{OutputFormat, OutputWriter};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// vulnscore - CVSS 3.1 vectors and base scores from the command line
#[derive(Parser, Debug)]
#[command(
    name = "vulnscore",
    version,
    about = "LLM-assisted CVSS 3.1 vector generation and scoring",
    long_about = "vulnscore turns vulnerability descriptions into CVSS 3.1 vectors using an \
                  OpenAI-compatible model, and computes base scores from vectors.\n\n\
                  Scoring never fails loudly: a vector that cannot be scored is reported \
                  and the command exits with status 1."
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain", global = true)]
    pub format: OutputFormat,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(long, global = true, env = "VULNSCORE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the base score of a CVSS vector
    #[command(visible_alias = "s")]
    Score(commands::score::ScoreArgs),

    /// Ask the configured model for a CVSS vector and score it
    #[command(visible_alias = "g")]
    Generate(commands::generate::GenerateArgs),
}

/// CLI application runner
pub struct CliApp {
    cli: Cli,
    context: CliContext,
}

impl CliApp {
    /// Parse arguments, load configuration and install logging
    pub fn new() -> anyhow::Result<Self> {
        let cli = Cli::parse();
        let context = CliContext::new(&cli)?;
        Ok(Self { cli, context })
    }

    /// Run the selected command, returning the process exit code
    pub async fn run(self) -> anyhow::Result<i32> {
        match self.cli.command {
            Commands::Score(ref args) => commands::score::run(&self.context, args).await,
            Commands::Generate(ref args) => commands::generate::run(&self.context, args).await,
        }
    }
}

/// Exit codes for scripting
pub mod exit_codes {
    /// A vector was produced and scored
    pub const SUCCESS: i32 = 0;
    /// No usable vector or score could be produced
    pub const NOT_SCORED: i32 = 1;
    /// Configuration or input error
    pub const CONFIG_ERROR: i32 = 2;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = 99;
}
