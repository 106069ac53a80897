//! REST API Guideline Conformance
//!
//! This crate checks OpenAPI-compatible API descriptions against the
//! structural conventions of the REST API guidelines:
//! - Resource naming (lowercase, hyphenated, plural collections)
//! - URL shape (no trailing slash, no `/api` prefix, version segment, nesting depth)
//! - HTTP semantics (bodiless GET/DELETE/HEAD, status code and method pairing)
//! - Payloads (pagination envelope, `application/problem+json` errors, camelCase)
//! - API identity (`info.x-api-id` UUID)
//!
//! # Example
//!
//! ```ignore
//! use restcheck_validate::{DocumentLoader, LintConfig, RuleEngine};
//!
//! let raw = DocumentLoader::load_path("openapi.yaml".as_ref())?;
//! let engine = RuleEngine::new(LintConfig::default());
//! let report = engine.evaluate_value(&raw);
//! assert!(report.passed());
//! ```

pub mod config;
pub mod constants;
pub mod document;
pub mod engine;
pub mod loader;
pub mod report;
pub mod reporter;
pub mod rules;
pub mod violation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub use config::{ConfigLoader, LintConfig};
pub use document::{
    ApiDocument, ApiInfo, HeaderSpec, HttpMethod, MediaTypeSpec, Operation, Parameter,
    ParameterLocation, PathItem, PropertySpec, ResponseSpec, SchemaSpec, StatusKey,
    StructureError,
};
pub use engine::RuleEngine;
pub use loader::{DocumentFormat, DocumentLoader};
pub use report::{Report, ReportSummary};
pub use reporter::Reporter;
pub use rules::{Anchor, ApiRule, Finding, RuleContext, RuleDescriptor, RuleError, RuleRegistry};
pub use violation::{Location, Violation, ViolationCategory};

/// Result type for loading and configuration operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised outside rule evaluation (loading files, reading configuration)
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {file}: {message}")]
    Parse { file: PathBuf, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Severity level for violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[serde(alias = "Error", alias = "ERROR")]
    Error,
    #[serde(alias = "Warning", alias = "WARNING", alias = "warn")]
    Warning,
    #[serde(alias = "Info", alias = "INFO")]
    Info,
}

impl Severity {
    fn rank(self) -> u8 {
        match self {
            Self::Error => 2,
            Self::Warning => 1,
            Self::Info => 0,
        }
    }

    /// True if this severity is as severe as `threshold` or more
    pub fn is_at_least(self, threshold: Severity) -> bool {
        self.rank() >= threshold.rank()
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
            Self::Info => write!(f, "INFO"),
        }
    }
}
