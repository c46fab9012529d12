//! Batch processing command for multiple documents.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use loandoc_core::models::config::OutputConfig;
use loandoc_core::{ExtractionResult, LoanDocumentParser};

use super::input::{is_supported, load_source};
use super::output::{csv_row, render, OutputFormat, CSV_HEADER};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;
    let parser = Arc::new(LoanDocumentParser::from_config(&config.extraction)?);

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Extraction is CPU-bound and stateless; run it on blocking workers.
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();

    for (index, path) in files.into_iter().enumerate() {
        let permit = semaphore.clone().acquire_owned().await?;
        let parser = parser.clone();

        tasks.spawn_blocking(move || {
            let file_start = Instant::now();
            let outcome = guarded(|| load_source(&path).map(|doc| parser.parse(&doc)));
            drop(permit);
            (index, path, outcome, file_start.elapsed().as_millis() as u64)
        });
    }

    let mut results = Vec::new();

    while let Some(joined) = tasks.join_next().await {
        // Workers catch their own panics; a join error here means cancellation.
        let (index, path, outcome, processing_time_ms) = joined?;

        match outcome {
            Ok(result) => results.push((
                index,
                ProcessResult {
                    path,
                    result: Some(result),
                    error: None,
                    processing_time_ms,
                },
            )),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push((
                        index,
                        ProcessResult {
                            path,
                            result: None,
                            error: Some(error_msg),
                            processing_time_ms,
                        },
                    ));
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    tasks.abort_all();
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        overall_pb.inc(1);
    }

    overall_pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &results, args.format, &config.output)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful = results.iter().filter(|r| r.result.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Run one file's work, turning a panic into an error for that file.
fn guarded<T>(work: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    panic::catch_unwind(AssertUnwindSafe(work))
        .unwrap_or_else(|payload| Err(anyhow::anyhow!("worker panicked: {}", panic_message(&*payload))))
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn write_outputs(
    output_dir: &Path,
    results: &[ProcessResult],
    format: OutputFormat,
    output: &OutputConfig,
) -> anyhow::Result<()> {
    for process_result in results {
        let Some(result) = &process_result.result else {
            continue;
        };

        let output_name = process_result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");

        let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
        let content = render(result, format, false, output)?;

        fs::write(&output_path, content)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let generated_at = Local::now().to_rfc3339();

    let mut header = vec!["filename", "status", "missing_fields"];
    header.extend(CSV_HEADER);
    header.extend(["processing_time_ms", "generated_at", "error"]);
    wtr.write_record(&header)?;

    for process_result in results {
        let filename = process_result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_string();

        let mut record = vec![filename];

        match &process_result.result {
            Some(result) => {
                record.push("success".to_string());
                record.push(result.missing_fields.len().to_string());
                record.extend(csv_row(&result.document));
            }
            None => {
                record.push("error".to_string());
                record.push(String::new());
                record.extend(std::iter::repeat(String::new()).take(CSV_HEADER.len()));
            }
        }

        record.push(process_result.processing_time_ms.to_string());
        record.push(generated_at.clone());
        record.push(process_result.error.clone().unwrap_or_default());

        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_passes_results_through() {
        assert_eq!(guarded(|| Ok(7)).unwrap(), 7);
        assert!(guarded::<()>(|| anyhow::bail!("unreadable")).is_err());
    }

    #[test]
    fn test_guarded_turns_panic_into_error() {
        let err = guarded::<()>(|| panic!("bad document")).unwrap_err();
        assert_eq!(err.to_string(), "worker panicked: bad document");

        let index = 3;
        let err = guarded::<()>(|| panic!("row {} out of range", index)).unwrap_err();
        assert_eq!(err.to_string(), "worker panicked: row 3 out of range");
    }
}
