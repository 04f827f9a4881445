//! Generate Command - model-assigned CVSS vector for a vulnerability
//!
//! The record comes either from `--id`/`--title` flags or from a JSON file.
//! Whatever the model returns is scored; an unusable reply is reported
//! rather than treated as an error.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use vulnscore_core::{CvssScore, Severity, VulnerabilityRecord, try_score};
use vulnscore_llm::prompts::prompt_loader_from_config;
use vulnscore_llm::{GenerateCvssUseCase, ResponseParser, create_provider};

use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Vulnerability identifier (e.g. CVE-2021-44228)
    #[arg(long, required_unless_present = "record", conflicts_with = "record")]
    pub id: Option<String>,

    /// Short vulnerability title
    #[arg(long, required_unless_present = "record", conflicts_with = "record")]
    pub title: Option<String>,

    /// Longer free-text description
    #[arg(long, conflicts_with = "record")]
    pub description: Option<String>,

    /// Additional context passed to the model (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE", value_parser = parse_field, conflicts_with = "record")]
    pub fields: Vec<(String, String)>,

    /// Read the vulnerability record from a JSON file
    #[arg(long, value_name = "FILE")]
    pub record: Option<PathBuf>,

    /// Pull the vector token out of a reply that wraps it in prose
    #[arg(long)]
    pub extract: bool,
}

/// Generation result for JSON output
#[derive(Debug, Serialize)]
pub struct GenerateResult {
    pub id: String,
    pub vector: Option<String>,
    pub base_score: Option<f64>,
    pub severity: Option<Severity>,
}

impl GenerateResult {
    /// Score the vector once and keep both the number and its rating
    fn new(id: String, vector: Option<String>) -> Self {
        let score: Option<CvssScore> = vector.as_deref().and_then(|v| try_score(v).ok());
        Self {
            id,
            base_score: score.as_ref().map(|s| s.base_score),
            severity: score.as_ref().map(|s| s.severity),
            vector,
        }
    }
}

fn parse_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

impl GenerateArgs {
    async fn load_record(&self) -> Result<VulnerabilityRecord> {
        if let Some(path) = &self.record {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read record file {}", path.display()))?;
            return serde_json::from_str(&text)
                .with_context(|| format!("Invalid vulnerability record in {}", path.display()));
        }

        // clap guarantees both are present when no record file is given
        let (Some(id), Some(title)) = (&self.id, &self.title) else {
            anyhow::bail!("--id and --title are required without --record");
        };

        let mut record = VulnerabilityRecord::new(id, title);
        if let Some(description) = &self.description {
            record = record.with_description(description);
        }
        for (key, value) in &self.fields {
            record = record.with_field(key, value.as_str());
        }
        Ok(record)
    }
}

/// Run the generate command
pub async fn run(ctx: &CliContext, args: &GenerateArgs) -> Result<i32> {
    let record = match args.load_record().await {
        Ok(record) => record,
        Err(e) => {
            ctx.output.error(&format!("{:#}", e));
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    let provider = match create_provider(&ctx.config.llm) {
        Ok(provider) => provider,
        Err(e) => {
            ctx.output.error(&e.to_string());
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    ctx.output.debug(&format!(
        "Using provider {} with model {}",
        ctx.config.llm.provider,
        ctx.config.llm.cvss_model()
    ));

    let prompts = prompt_loader_from_config(&ctx.config.prompts);
    let use_case = GenerateCvssUseCase::new(provider, prompts, ctx.config.llm.clone())
        .with_system_prompt(&ctx.config.prompts.system_prompt_file);

    let mut vector = use_case.execute(&record).await;
    if args.extract {
        vector = vector.and_then(|reply| ResponseParser::extract_cvss_vector(&reply));
    }

    let result = GenerateResult::new(record.id.clone(), vector);

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&result)?,
        OutputFormat::Plain => match (&result.vector, result.base_score, result.severity) {
            (Some(vector), Some(score), Some(severity)) => ctx
                .output
                .print(&format!("{}\t{}\t{:.1} ({})", result.id, vector, score, severity)),
            (Some(vector), _, _) => ctx.output.error(&format!(
                "Model reply for {} is not a scorable CVSS vector: {}",
                result.id, vector
            )),
            (None, _, _) => ctx
                .output
                .error(&format!("Could not generate a CVSS vector for {}", result.id)),
        },
    }

    Ok(if result.base_score.is_some() {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOT_SCORED
    })
}
