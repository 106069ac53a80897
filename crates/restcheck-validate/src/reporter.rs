//! Report Rendering
//!
//! Renders a [`Report`] in multiple formats:
//! - JSON for CI integration
//! - Human-readable for terminal output
//! - CI summary for GitHub Actions annotations

use crate::Severity;
use crate::report::Report;
use crate::violation::ViolationCategory;
use std::fmt::Write;
use tracing::warn;

const CATEGORIES: [ViolationCategory; 7] = [
    ViolationCategory::Structure,
    ViolationCategory::Naming,
    ViolationCategory::Url,
    ViolationCategory::Http,
    ViolationCategory::Payload,
    ViolationCategory::Headers,
    ViolationCategory::Identity,
];

/// Report generator
pub struct Reporter;

impl Reporter {
    /// Generate JSON report; `{}` if the report cannot be serialized
    pub fn to_json(report: &Report) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to serialize report as JSON");
            "{}".to_string()
        })
    }

    /// Generate human-readable report
    pub fn to_human_readable(report: &Report) -> String {
        let mut output = String::new();

        output.push_str("=== REST API Guideline Report ===\n\n");
        if let Some(title) = &report.api_title {
            let _ = writeln!(output, "API: {title}\n");
        }

        output.push_str("--- Summary ---\n");
        let _ = writeln!(output, "Total Violations: {}", report.summary.total_violations);
        let _ = writeln!(output, "  Errors:   {}", report.summary.error_count);
        let _ = writeln!(output, "  Warnings: {}", report.summary.warning_count);
        let _ = writeln!(output, "  Info:     {}", report.summary.info_count);
        output.push('\n');

        let status = if report.passed() { "PASSED" } else { "FAILED" };
        let _ = writeln!(output, "Status: {status}\n");

        if !report.violations.is_empty() {
            output.push_str("--- Violations ---\n");
            for v in &report.violations {
                let _ = writeln!(output, "  {v}");
                if let Some(suggestion) = &v.suggestion {
                    let _ = writeln!(output, "      hint: {suggestion}");
                }
            }
            output.push('\n');
        }

        output
    }

    /// Generate CI summary (GitHub Actions format)
    pub fn to_ci_summary(report: &Report) -> String {
        let mut output = String::new();

        output.push_str("## REST API Guidelines\n\n");
        if let Some(title) = &report.api_title {
            let _ = writeln!(output, "**API:** {title}\n");
        }

        if report.passed() {
            output.push_str("**Status:** :white_check_mark: PASSED\n\n");
        } else {
            output.push_str("**Status:** :x: FAILED\n\n");
        }

        output.push_str("| Category | Count |\n");
        output.push_str("|----------|-------|\n");
        for category in CATEGORIES {
            let count = report
                .violations
                .iter()
                .filter(|v| v.category == category)
                .count();
            let _ = writeln!(output, "| {category} | {count} |");
        }
        let _ = writeln!(output, "| **Total** | **{}** |", report.summary.total_violations);
        output.push('\n');

        let annotations: Vec<String> = report
            .violations
            .iter()
            .filter(|v| v.severity != Severity::Info)
            .map(|v| {
                let level = if v.severity == Severity::Error {
                    "error"
                } else {
                    "warning"
                };
                format!("::{level} title={}::{}: {}", v.rule_id, v.location, v.message)
            })
            .collect();

        if !annotations.is_empty() {
            output.push_str("\n### Annotations\n\n");
            for annotation in annotations {
                let _ = writeln!(output, "{annotation}");
            }
        }

        output
    }

    /// Count error-level violations
    pub fn count_errors(report: &Report) -> usize {
        report
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    /// Count warning-level violations
    pub fn count_warnings(report: &Report) -> usize {
        report
            .violations
            .iter()
            .filter(|v| v.severity == Severity::Warning)
            .count()
    }
}
