//! Command line interface

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command line interface for restcheck
#[derive(Parser, Debug)]
#[command(name = "restcheck")]
#[command(about = "Check OpenAPI descriptions against REST API guidelines")]
#[command(version)]
pub struct Cli {
    /// API description files, or directories to search for them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Log level (overridden by RESTCHECK_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Terminal report
    Human,
    /// Pretty JSON array of `{file, report}`
    Json,
    /// Markdown summary with GitHub Actions annotations
    Ci,
}
