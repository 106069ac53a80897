//! Rendering evaluated fixtures

use crate::fixture;
use restcheck_validate::{DocumentLoader, Report, Reporter, RuleEngine};

fn legacy_report() -> Report {
    let raw = DocumentLoader::load_path(&fixture("legacy-employees.yaml")).unwrap();
    RuleEngine::default().evaluate_value(&raw)
}

#[test]
fn test_json_report_round_trips() {
    let report = legacy_report();
    let json = Reporter::to_json(&report);

    let parsed: Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn test_human_report_lists_every_violation() {
    let report = legacy_report();
    let output = Reporter::to_human_readable(&report);

    assert!(output.contains("API: Legacy Employees API"));
    assert!(output.contains("Status: FAILED"));
    assert!(output.contains("[ERROR] unique-api-id info.x-api-id:"));
    assert!(output.contains("[WARNING] no-api-prefix /api/v1/employees/{id}"));
    assert!(output.contains("[ERROR] method-get-no-body GET /v1/employees/{id}:"));
    assert_eq!(output.matches("\n  [").count(), report.violations.len());
}

#[test]
fn test_ci_summary_annotates_errors_and_warnings() {
    let report = legacy_report();
    let output = Reporter::to_ci_summary(&report);

    assert_eq!(output.matches("::error ").count(), Reporter::count_errors(&report));
    assert_eq!(output.matches("::warning ").count(), Reporter::count_warnings(&report));
    assert!(output.contains("| **Total** | **13** |"));
}
