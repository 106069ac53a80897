//! Rule Engine
//!
//! Runs every registered rule against one document and assembles the
//! report. Rules are isolated from each other: an error or a panic inside one
//! rule becomes a violation tagged with that rule's id and the remaining rules
//! still run. Inside a rule, a fault finding covers only the part it points at.

use crate::config::LintConfig;
use crate::constants::DOCUMENT_STRUCTURE;
use crate::document::{ApiDocument, StructureError};
use crate::report::Report;
use crate::rules::registry::DOCUMENT_STRUCTURE_RULE;
use crate::rules::{Anchor, ApiRule, Finding, RuleContext, RuleRegistry};
use crate::violation::{Location, Violation};
use crate::Severity;
use rayon::prelude::*;
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// Evaluates API documents against a rule registry
#[derive(Debug)]
pub struct RuleEngine {
    registry: RuleRegistry,
    config: LintConfig,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

impl RuleEngine {
    /// Engine with the standard rule set
    pub fn new(config: LintConfig) -> Self {
        Self::with_registry(RuleRegistry::standard(), config)
    }

    /// Engine with a registry composed at build time by embedding code.
    /// Configuration never changes which rules run.
    pub fn with_registry(registry: RuleRegistry, config: LintConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Evaluate an interpreted document
    pub fn evaluate(&self, document: &ApiDocument) -> Report {
        let context = RuleContext::new(&self.config);
        let mut ordered: Vec<(Anchor, usize, Violation)> = Vec::new();

        for (position, rule) in self.registry.rules().iter().enumerate() {
            let rule = rule.as_ref();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.check(document, &context)));
            match outcome {
                Ok(Ok(findings)) => {
                    let faults = findings.iter().filter(|f| f.fault).count();
                    if faults > 0 {
                        warn!(rule = rule.id(), faults, "Rule skipped unreadable parts of the document");
                    }
                    debug!(rule = rule.id(), findings = findings.len(), "Rule evaluated");
                    ordered.extend(
                        findings
                            .into_iter()
                            .map(|finding| (finding.anchor, position, violation_from(rule, finding))),
                    );
                }
                Ok(Err(error)) => {
                    warn!(rule = rule.id(), error = %error, "Rule could not evaluate document");
                    let finding = Finding::fault(error);
                    ordered.push((finding.anchor, position, violation_from(rule, finding)));
                }
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    warn!(rule = rule.id(), reason = %reason, "Rule panicked");
                    ordered.push((
                        Anchor::Document,
                        position,
                        fault_violation(
                            rule,
                            Location::document("#"),
                            format!("rule panicked: {reason}"),
                        ),
                    ));
                }
            }
        }

        // stable: findings of one rule at one anchor keep their emitted order
        ordered.sort_by_key(|(anchor, position, _)| (*anchor, *position));
        let violations = ordered.into_iter().map(|(_, _, v)| v).collect();

        let report = Report::from_violations(
            document.info.title.clone(),
            violations,
            self.config.min_severity_to_fail,
        );
        info!(
            api = report.api_title.as_deref().unwrap_or("<untitled>"),
            violations = report.summary.total_violations,
            errors = report.summary.error_count,
            warnings = report.summary.warning_count,
            passed = report.passed(),
            "Evaluation complete"
        );
        report
    }

    /// Interpret and evaluate a raw JSON tree. A tree that is not an API
    /// description yields a single `document-structure` violation.
    pub fn evaluate_value(&self, raw: &Value) -> Report {
        match ApiDocument::from_value(raw) {
            Ok(document) => self.evaluate(&document),
            Err(error) => {
                warn!(error = %error, "Document is not an API description");
                Report::from_violations(
                    None,
                    vec![structure_violation(&error)],
                    self.config.min_severity_to_fail,
                )
            }
        }
    }

    /// Evaluate independent documents in parallel; reports keep input order
    pub fn evaluate_many(&self, documents: &[Value]) -> Vec<Report> {
        documents
            .par_iter()
            .map(|raw| self.evaluate_value(raw))
            .collect()
    }
}

fn violation_from(rule: &dyn ApiRule, finding: Finding) -> Violation {
    if finding.fault {
        return fault_violation(rule, finding.location, finding.message);
    }
    let descriptor = rule.descriptor();
    Violation {
        rule_id: descriptor.id.to_string(),
        category: descriptor.category,
        severity: descriptor.default_severity,
        location: finding.location,
        message: finding.message,
        suggestion: finding.suggestion,
    }
}

fn fault_violation(rule: &dyn ApiRule, location: Location, message: String) -> Violation {
    let descriptor = rule.descriptor();
    Violation {
        rule_id: descriptor.id.to_string(),
        category: descriptor.category,
        severity: Severity::Error,
        location,
        message,
        suggestion: None,
    }
}

fn structure_violation(error: &StructureError) -> Violation {
    Violation {
        rule_id: DOCUMENT_STRUCTURE.to_string(),
        category: DOCUMENT_STRUCTURE_RULE.category,
        severity: DOCUMENT_STRUCTURE_RULE.default_severity,
        location: Location::document("#"),
        message: error.to_string(),
        suggestion: Some(
            "provide an OpenAPI/Swagger document with `openapi`, `info` and `paths`".to_string(),
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
