//! Engine Configuration
//!
//! [`LintConfig`] is read-only during evaluation. [`ConfigLoader`] builds it
//! from defaults, a TOML file and `RESTCHECK_*` environment variables.

pub mod loader;

pub use loader::ConfigLoader;

use crate::Severity;
use crate::constants::DEFAULT_SINGLETON_RESOURCES;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Settings consumed by the rules and the pass/fail decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Accept paths that begin with `/api`
    #[serde(alias = "apiPrefixAllowed")]
    pub api_prefix_allowed: bool,

    /// Singular top-level resources exempt from `plural-resources`
    #[serde(alias = "singletonResourceAllowList")]
    pub singleton_resource_allow_list: BTreeSet<String>,

    /// Lowest severity that fails a report (`error` or `warning`)
    #[serde(alias = "minSeverityToFail")]
    pub min_severity_to_fail: Severity,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            api_prefix_allowed: false,
            singleton_resource_allow_list: DEFAULT_SINGLETON_RESOURCES
                .iter()
                .map(ToString::to_string)
                .collect(),
            min_severity_to_fail: Severity::Error,
        }
    }
}

impl LintConfig {
    pub fn with_api_prefix_allowed(mut self, allowed: bool) -> Self {
        self.api_prefix_allowed = allowed;
        self
    }

    pub fn with_singleton<S: Into<String>>(mut self, resource: S) -> Self {
        self.singleton_resource_allow_list.insert(resource.into());
        self
    }

    pub fn with_min_severity_to_fail(mut self, severity: Severity) -> Self {
        self.min_severity_to_fail = severity;
        self
    }

    /// Whether `segment` is an allow-listed singleton (case-insensitive)
    pub fn is_singleton(&self, segment: &str) -> bool {
        self.singleton_resource_allow_list
            .iter()
            .any(|s| s.eq_ignore_ascii_case(segment))
    }
}
