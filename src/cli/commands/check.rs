//! Check command: read every scan under the given paths and report failures

use super::shared::discover_ang_files;
use crate::ScanStore;
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::config::ReaderConfig;
use anyhow::{Context, Result, bail};
use colored::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of reading one file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Totals across a check run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckSummary {
    pub files_checked: usize,
    pub files_failed: usize,
    pub processing_time_ms: u128,
    pub files: Vec<FileReport>,
}

pub fn run_check(args: CheckArgs) -> Result<()> {
    let start_time = Instant::now();
    let files = discover_ang_files(&args.paths)?;
    if files.is_empty() {
        bail!("No .ang files found under the given paths");
    }
    info!("Checking {} file(s)", files.len());

    let config = args.reader_config();
    let mut summary = check_files(&files, &config);
    summary.processing_time_ms = start_time.elapsed().as_millis();

    match args.format {
        OutputFormat::Text => print_text_report(&summary),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .context("Failed to serialise check report")?;
            println!("{}", json);
        }
    }

    if summary.files_failed > 0 {
        bail!(
            "{} of {} file(s) could not be read",
            summary.files_failed,
            summary.files_checked
        );
    }
    Ok(())
}

/// Read each file in turn, recording success or the error
pub fn check_files(files: &[PathBuf], config: &ReaderConfig) -> CheckSummary {
    let mut summary = CheckSummary::default();
    for path in files {
        let report = check_file(path, config);
        if !report.ok {
            summary.files_failed += 1;
        }
        summary.files_checked += 1;
        summary.files.push(report);
    }
    summary
}

fn check_file(path: &Path, config: &ReaderConfig) -> FileReport {
    let mut scan = ScanStore::new();
    match scan.read_with_config(path, config) {
        Ok(()) => {
            debug!("{}: {} points", path.display(), scan.total_points());
            FileReport {
                path: path.to_path_buf(),
                ok: true,
                points: Some(scan.total_points()),
                phases: Some(scan.phases().len()),
                error: None,
            }
        }
        Err(error) => {
            warn!("{}: {}", path.display(), error);
            FileReport {
                path: path.to_path_buf(),
                ok: false,
                points: None,
                phases: None,
                error: Some(error.to_string()),
            }
        }
    }
}

fn print_text_report(summary: &CheckSummary) {
    for report in &summary.files {
        match (&report.error, report.points, report.phases) {
            (None, Some(points), Some(phases)) => println!(
                "{} {} ({} points, {} phase(s))",
                "OK  ".bright_green().bold(),
                report.path.display(),
                points,
                phases
            ),
            (error, _, _) => println!(
                "{} {}: {}",
                "FAIL".bright_red().bold(),
                report.path.display(),
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    println!();
    let passed = summary.files_checked - summary.files_failed;
    let line = format!(
        "{} of {} file(s) read successfully in {}ms",
        passed, summary.files_checked, summary.processing_time_ms
    );
    if summary.files_failed == 0 {
        println!("{}", line.bright_green());
    } else {
        println!("{}", line.bright_yellow());
    }
}
