//! Process command - extract fields from a single document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use loandoc_core::LoanDocumentParser;

use super::input::load_source;
use super::output::{render, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (.txt with one paragraph per line, or .json source document)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include missing fields and warnings in the output
    #[arg(long)]
    report: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let document = load_source(&args.input)?;
    let parser = LoanDocumentParser::from_config(&config.extraction)?;
    let result = parser.parse(&document);

    let output = render(&result, args.format, args.report, &config.output)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if !result.missing_fields.is_empty() {
        debug!(
            "{} fields fell back to defaults: {:?}",
            result.missing_fields.len(),
            result.missing_fields
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
