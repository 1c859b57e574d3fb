mod logging;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use feederbook_core::DEFAULT_OUTPUT_FILE;
use feederbook_eval::{EvalError, evaluate_workbook, render_report};
use feederbook_generate::{GenerateOptions, GenerationEngine, GenerationError, GenerationResult};
use logging::init_logging;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("logging error: {0}")]
    Logging(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "feederbook",
    version,
    about = "Sample feeder / DT / meter reading workbook generator"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the sample workbook to the working directory (default).
    Generate,
    /// Print the energy balance of a workbook.
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug)]
struct SummarizeArgs {
    /// Workbook to read.
    #[arg(value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    path: PathBuf,
    /// Emit metrics as JSON instead of markdown.
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging()?;

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => run_generate(),
        Command::Summarize(args) => run_summarize(args),
    }
}

fn run_generate() -> Result<(), CliError> {
    let engine = GenerationEngine::new(GenerateOptions::default());
    let result = engine.run()?;

    println!("{}", confirmation(&result));
    Ok(())
}

fn confirmation(result: &GenerationResult) -> String {
    format!(
        "✅ {} created with {} rows",
        result.report.output_path.display(),
        result.records.len()
    )
}

fn run_summarize(args: SummarizeArgs) -> Result<(), CliError> {
    let SummarizeArgs { path, json } = args;

    tracing::info!(event = "summarize_started", path = %path.display());
    let metrics = evaluate_workbook(&path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        println!("{}", render_report(&metrics));
    }
    Ok(())
}
