//! Score Command - base score of a CVSS vector

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use vulnscore_core::{Severity, try_score};

use crate::cli::context::CliContext;
use crate::cli::exit_codes;
use crate::cli::output::OutputFormat;

/// Arguments for the score command
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// CVSS vector, e.g. CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H
    pub vector: String,
}

/// Score result for JSON output
#[derive(Debug, Serialize)]
pub struct ScoreResult {
    pub vector: String,
    pub base_score: Option<f64>,
    pub severity: Option<Severity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the score command
pub async fn run(ctx: &CliContext, args: &ScoreArgs) -> Result<i32> {
    let result = match try_score(&args.vector) {
        Ok(score) => ScoreResult {
            vector: score.vector,
            base_score: Some(score.base_score),
            severity: Some(score.severity),
            error: None,
        },
        Err(e) => ScoreResult {
            vector: args.vector.clone(),
            base_score: None,
            severity: None,
            error: Some(e.to_string()),
        },
    };

    match ctx.output.format() {
        OutputFormat::Json => ctx.output.json(&result)?,
        OutputFormat::Plain => match (&result.base_score, &result.severity) {
            (Some(score), Some(severity)) => {
                ctx.output.print(&format!("{:.1} ({})", score, severity))
            }
            _ => ctx.output.error(&format!(
                "Could not score vector: {}",
                result.error.as_deref().unwrap_or("unknown error")
            )),
        },
    }

    Ok(if result.base_score.is_some() {
        exit_codes::SUCCESS
    } else {
        exit_codes::NOT_SCORED
    })
}
