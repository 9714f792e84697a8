use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use sales_ai::analysis::{analyze_json, AnalysisOptions};
use sales_ai::llm::ollama_llm::OllamaLlm;
use sales_ai::ollama::OllamaClient;
use sales_ai::summarizer::{FallbackSummarizer, Summarizer};
use sales_core::error::AppError;
use sales_core::ingest::dataset_fingerprint;
use sales_core::report::render_report;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "salesreview",
    about = "Summarize a hierarchical sales dataset with traceable numeric sources"
)]
pub struct Cli {
    /// Dataset JSON file, or `-` for stdin
    pub input: PathBuf,

    /// Write the Markdown report here instead of stdout
    #[arg(long, short, env = "SALES_REPORT_OUT")]
    pub output: Option<PathBuf>,

    /// Ollama base URL (must be 127.0.0.1)
    #[arg(long, env = "SALES_OLLAMA_URL", default_value = "http://127.0.0.1:11434")]
    pub ollama_url: String,

    #[arg(long, env = "SALES_MODEL", default_value = "llama3.1:8b")]
    pub model: String,

    /// Model used when the primary model call fails
    #[arg(long, env = "SALES_FALLBACK_MODEL", default_value = "llama3.2:3b")]
    pub fallback_model: String,

    /// Ask the model to tag numbers with product names in the overall summary
    #[arg(long, env = "SALES_STRUCTURED_OUTPUT")]
    pub structured_output: bool,

    #[arg(long)]
    pub skip_health_check: bool,
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let client = OllamaClient::new(&cli.ollama_url)?;
    if !cli.skip_health_check {
        client.health_check()?;
        info!(url = %client.base_url(), "ollama reachable");
    }

    let llm = OllamaLlm::new(client);
    let summarizer =
        FallbackSummarizer::new(&llm, cli.model.as_str()).with_fallback(cli.fallback_model.as_str());

    let report = execute(cli, &summarizer)?;
    write_report(cli, &report)
}

/// Read the dataset, run the analysis and render the report.
pub fn execute(cli: &Cli, summarizer: &dyn Summarizer) -> anyhow::Result<String> {
    let json = read_input(cli)?;
    let sha = dataset_fingerprint(&json);
    info!(input = %cli.input.display(), sha256 = %sha, "dataset loaded");

    let options = AnalysisOptions {
        structured_output: cli.structured_output,
    };
    let outcome = analyze_json(&json, summarizer, options).context("analysis failed")?;

    let generated_at = now_rfc3339_utc()?;
    Ok(render_report(
        &outcome.report_view(&sha, Some(generated_at.as_str())),
    ))
}

fn read_input(cli: &Cli) -> Result<String, AppError> {
    if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map_err(|e| {
            AppError::new("INPUT_READ_FAILED", "Failed to read dataset from stdin")
                .with_details(e.to_string())
        })?;
        return Ok(buf);
    }
    fs::read_to_string(&cli.input).map_err(|e| {
        AppError::new("INPUT_READ_FAILED", "Failed to read dataset file")
            .with_details(format!("path={}; err={e}", cli.input.display()))
    })
}

pub fn write_report(cli: &Cli, report: &str) -> anyhow::Result<()> {
    match &cli.output {
        Some(path) => {
            fs::write(path, report).map_err(|e| {
                AppError::new("REPORT_WRITE_FAILED", "Failed to write report")
                    .with_details(format!("path={}; err={e}", path.display()))
            })?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{report}"),
    }
    Ok(())
}

fn now_rfc3339_utc() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| AppError::new("REPORT_TIME_FAILED", "Failed to format time").with_details(e.to_string()))
}
