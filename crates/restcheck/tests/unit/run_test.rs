//! Tests for the end-to-end run

use clap::Parser;
use restcheck::cli::Cli;
use restcheck::{Outcome, run};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CLEAN: &str = r#"
openapi: 3.0.3
info:
  title: Teams API
  x-api-id: 6f1c0a3e-2d4b-4c1e-9f0a-7b8c9d0e1f2a
paths:
  /v1/teams:
    get:
      responses:
        200:
          description: ok
"#;

const PREFIXED: &str = r#"
openapi: 3.0.3
info:
  title: Prefixed API
  x-api-id: 6f1c0a3e-2d4b-4c1e-9f0a-7b8c9d0e1f2a
paths:
  /api/v1/teams:
    get:
      responses:
        200:
          description: ok
"#;

const BROKEN: &str = r#"
openapi: 3.0.3
info:
  title: Broken API
  x-api-id: 6f1c0a3e-2d4b-4c1e-9f0a-7b8c9d0e1f2a
paths:
  /v1/Teams/:
    get:
      responses:
        200:
          description: ok
"#;

struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("restcheck.toml"), "").unwrap();
        Self { temp }
    }

    fn write(&self, name: &str, content: &str) -> String {
        let path = self.temp.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    fn config(&self) -> String {
        self.temp.path().join("restcheck.toml").display().to_string()
    }

    fn path(&self) -> &Path {
        self.temp.path()
    }

    fn run(&self, args: &[&str]) -> (anyhow::Result<Outcome>, String) {
        let config = self.config();
        let mut argv = vec!["restcheck", "--config", config.as_str()];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let mut out = Vec::new();
        let outcome = run(&cli, &mut out);
        (outcome, String::from_utf8(out).unwrap())
    }
}

#[test]
fn test_clean_document_passes() {
    let workspace = Workspace::new();
    let file = workspace.write("teams.yaml", CLEAN);

    let (outcome, output) = workspace.run(&[&file]);

    assert_eq!(outcome.unwrap(), Outcome::Passed);
    assert!(output.contains("Status: PASSED"));
    assert!(output.contains("teams.yaml"));
}

#[test]
fn test_error_violation_fails() {
    let workspace = Workspace::new();
    let file = workspace.write("teams.yaml", BROKEN);

    let (outcome, output) = workspace.run(&[&file]);

    assert_eq!(outcome.unwrap(), Outcome::Failed);
    assert!(output.contains("[ERROR] resource-naming /v1/Teams/"));
}

#[test]
fn test_warning_passes_unless_configured() {
    let workspace = Workspace::new();
    let file = workspace.write("prefixed.yaml", PREFIXED);

    let (outcome, _) = workspace.run(&[&file]);
    assert_eq!(outcome.unwrap(), Outcome::Passed);

    fs::write(workspace.config(), "min_severity_to_fail = \"warning\"\n").unwrap();
    let (outcome, _) = workspace.run(&[&file]);
    assert_eq!(outcome.unwrap(), Outcome::Failed);

    fs::write(
        workspace.config(),
        "minSeverityToFail = \"warning\"\napiPrefixAllowed = true\n",
    )
    .unwrap();
    let (outcome, _) = workspace.run(&[&file]);
    assert_eq!(outcome.unwrap(), Outcome::Passed);
}

#[test]
fn test_directory_json_output() {
    let workspace = Workspace::new();
    workspace.write("apis/a.yaml", CLEAN);
    workspace.write("apis/b.yml", BROKEN);
    let dir = workspace.path().join("apis").display().to_string();

    let (outcome, output) = workspace.run(&["--format", "json", &dir]);

    assert_eq!(outcome.unwrap(), Outcome::Failed);
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let entries = parsed.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0]["file"].as_str().unwrap().ends_with("a.yaml"));
    assert_eq!(entries[0]["report"]["summary"]["passed"], true);
    assert_eq!(entries[1]["report"]["summary"]["passed"], false);
    assert_eq!(entries[1]["report"]["violations"][0]["rule_id"], "resource-naming");
}

#[test]
fn test_ci_output() {
    let workspace = Workspace::new();
    let file = workspace.write("teams.yaml", BROKEN);

    let (_, output) = workspace.run(&["--format", "ci", &file]);

    assert!(output.contains("::error title=resource-naming::/v1/Teams/"));
    assert!(output.contains("::error title=no-trailing-slash::/v1/Teams/"));
}

#[test]
fn test_unreadable_document_is_an_error() {
    let workspace = Workspace::new();
    let missing = workspace.path().join("missing.yaml").display().to_string();

    let (outcome, _) = workspace.run(&[&missing]);

    let error = outcome.unwrap_err();
    assert!(format!("{error:#}").contains("failed to load"));
}

#[test]
fn test_empty_directory_is_an_error() {
    let workspace = Workspace::new();
    fs::create_dir_all(workspace.path().join("empty")).unwrap();
    let dir = workspace.path().join("empty").display().to_string();

    let (outcome, _) = workspace.run(&[&dir]);

    assert!(outcome.is_err());
}

#[test]
fn test_invalid_config_is_an_error() {
    let workspace = Workspace::new();
    let file = workspace.write("teams.yaml", CLEAN);
    fs::write(workspace.config(), "min_severity_to_fail = \"info\"\n").unwrap();

    let (outcome, _) = workspace.run(&[&file]);

    let error = outcome.unwrap_err();
    assert!(format!("{error:#}").contains("failed to load configuration"));
}
