//! Tests for argument parsing

use clap::Parser;
use restcheck::cli::{Cli, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_defaults() {
    let cli = Cli::try_parse_from(["restcheck", "openapi.yaml"]).unwrap();

    assert_eq!(cli.paths, vec![PathBuf::from("openapi.yaml")]);
    assert_eq!(cli.format, OutputFormat::Human);
    assert_eq!(cli.log_level, "warn");
    assert!(cli.config.is_none());
    assert!(!cli.json_logs);
}

#[test]
fn test_all_options() {
    let cli = Cli::try_parse_from([
        "restcheck",
        "--config",
        "lint.toml",
        "--format",
        "ci",
        "--log-level",
        "debug",
        "--json-logs",
        "apis/",
        "extra.json",
    ])
    .unwrap();

    assert_eq!(cli.config, Some(PathBuf::from("lint.toml")));
    assert_eq!(cli.format, OutputFormat::Ci);
    assert_eq!(cli.log_level, "debug");
    assert!(cli.json_logs);
    assert_eq!(cli.paths.len(), 2);
}

#[test]
fn test_paths_required() {
    assert!(Cli::try_parse_from(["restcheck"]).is_err());
}

#[test]
fn test_unknown_format_rejected() {
    assert!(Cli::try_parse_from(["restcheck", "--format", "xml", "a.yaml"]).is_err());
}
