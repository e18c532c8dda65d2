//! Full two-phase check of one response.

use std::path::PathBuf;

use anyhow::{Result, bail};
use apicheck_core::{QualityReport, summarize};
use clap::Args;

use super::{build_checker, read_json};
use crate::config::ConfigLoader;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the API response
    #[arg(short, long)]
    pub response: PathBuf,

    /// JSON Schema the response must satisfy
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Override the assessment model
    #[arg(long)]
    pub model: Option<String>,

    /// Override the assessment output token budget
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Exit with an error when the overall score is below this value
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub min_score: Option<u8>,
}

pub async fn run(args: CheckArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let response = read_json(&args.response)?;
    let schema = read_json(&args.schema)?;

    let checker = build_checker(&config, config.assessment_with(args.model, args.max_tokens))?;
    let report = checker.check_response(&response, &schema).await;

    print_report(&report, args.json)?;
    enforce_min_score(&report, args.min_score)
}

pub fn print_report(report: &QualityReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", summarize(report));
    }
    Ok(())
}

fn enforce_min_score(report: &QualityReport, min_score: Option<u8>) -> Result<()> {
    match min_score {
        Some(min) if report.overall_score < min => bail!(
            "overall score {} is below the required minimum of {}",
            report.overall_score,
            min
        ),
        _ => Ok(()),
    }
}
