//! restcheck
//!
//! Wires the loader, configuration, rule engine and reporter of
//! `restcheck-validate` into a command line tool.

pub mod cli;
pub mod logging;

use anyhow::{Context, Result, bail};
use cli::{Cli, OutputFormat};
use restcheck_validate::{ConfigLoader, DocumentLoader, Report, Reporter, RuleEngine};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Overall result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every report passed
    Passed,
    /// At least one report failed
    Failed,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a Path,
    report: &'a Report,
}

/// Lint every document named by `cli` and write the reports to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<Outcome> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    let config = loader.load().context("failed to load configuration")?;

    let files = collect_files(&cli.paths)?;
    let documents = files
        .iter()
        .map(|path| {
            DocumentLoader::load_path(path)
                .with_context(|| format!("failed to load {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let engine = RuleEngine::new(config);
    let reports = engine.evaluate_many(&documents);

    write_reports(out, cli.format, &files, &reports)?;

    let failed = reports.iter().filter(|r| !r.passed()).count();
    info!(documents = reports.len(), failed, "Run complete");
    Ok(if failed == 0 {
        Outcome::Passed
    } else {
        Outcome::Failed
    })
}

/// Expand directories into the API descriptions they contain
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = DocumentLoader::discover(path)
                .with_context(|| format!("failed to search {}", path.display()))?;
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    if files.is_empty() {
        bail!("no API descriptions found");
    }
    Ok(files)
}

fn write_reports<W: Write>(
    out: &mut W,
    format: OutputFormat,
    files: &[PathBuf],
    reports: &[Report],
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<FileReport<'_>> = files
                .iter()
                .zip(reports)
                .map(|(file, report)| FileReport { file, report })
                .collect();
            serde_json::to_writer_pretty(&mut *out, &entries)?;
            writeln!(out)?;
        }
        OutputFormat::Human => {
            for (file, report) in files.iter().zip(reports) {
                writeln!(out, "{}", file.display())?;
                write!(out, "{}", Reporter::to_human_readable(report))?;
            }
        }
        OutputFormat::Ci => {
            for (file, report) in files.iter().zip(reports) {
                writeln!(out, "<!-- {} -->", file.display())?;
                write!(out, "{}", Reporter::to_ci_summary(report))?;
            }
        }
    }
    Ok(())
}
