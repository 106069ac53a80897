//! Evaluation Report
//!
//! The ordered result of evaluating one document. Built once at the end of
//! an evaluation and never mutated afterwards.

use crate::Severity;
use crate::violation::Violation;
use serde::{Deserialize, Serialize};

/// Violations for one document, in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// `info.title` of the evaluated document, when it could be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_title: Option<String>,
    /// Summary statistics
    pub summary: ReportSummary,
    /// All violations, ordered by location then rule registration order
    pub violations: Vec<Violation>,
}

/// Summary of evaluation results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total number of violations
    pub total_violations: usize,
    /// Number of error-level violations
    pub error_count: usize,
    /// Number of warning-level violations
    pub warning_count: usize,
    /// Number of info-level violations
    pub info_count: usize,
    /// Lowest severity that fails the report
    pub fail_threshold: Severity,
    /// Whether no violation reaches `fail_threshold`
    pub passed: bool,
}

impl ReportSummary {
    fn from_violations(violations: &[Violation], fail_threshold: Severity) -> Self {
        let count = |severity: Severity| violations.iter().filter(|v| v.severity == severity).count();
        Self {
            total_violations: violations.len(),
            error_count: count(Severity::Error),
            warning_count: count(Severity::Warning),
            info_count: count(Severity::Info),
            fail_threshold,
            passed: !violations
                .iter()
                .any(|v| v.severity.is_at_least(fail_threshold)),
        }
    }
}

impl Report {
    /// Finalize a report from already ordered violations
    pub fn from_violations(
        api_title: Option<String>,
        violations: Vec<Violation>,
        fail_threshold: Severity,
    ) -> Self {
        let summary = ReportSummary::from_violations(&violations, fail_threshold);
        Self {
            api_title,
            summary,
            violations,
        }
    }

    pub fn passed(&self) -> bool {
        self.summary.passed
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violations reported by `rule_id`
    pub fn by_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Violation> + 'a {
        self.violations.iter().filter(move |v| v.rule_id == rule_id)
    }

    /// Whether any violation was reported by `rule_id`
    pub fn has_rule(&self, rule_id: &str) -> bool {
        self.by_rule(rule_id).next().is_some()
    }
}
