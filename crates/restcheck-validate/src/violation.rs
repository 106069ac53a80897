//! Violation Model
//!
//! A violation is one detected non-conformance: which rule fired, how severe
//! it is, where in the document it was found, and a human-readable message.

use crate::Severity;
use crate::document::HttpMethod;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Category of violation for grouping in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationCategory {
    /// Document cannot be interpreted
    Structure,
    /// Path segment and parameter naming
    Naming,
    /// URL shape: prefixes, versions, nesting
    Url,
    /// HTTP method and status code semantics
    Http,
    /// Response payload shape
    Payload,
    /// Response headers
    Headers,
    /// API identification metadata
    Identity,
}

impl Display for ViolationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structure => write!(f, "Structure"),
            Self::Naming => write!(f, "Naming"),
            Self::Url => write!(f, "URL"),
            Self::Http => write!(f, "HTTP"),
            Self::Payload => write!(f, "Payload"),
            Self::Headers => write!(f, "Headers"),
            Self::Identity => write!(f, "Identity"),
        }
    }
}

/// Where a violation was found: a path template (or document pointer such as
/// `info.x-api-id`) plus the operation method when one applies
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<HttpMethod>,
}

impl Location {
    /// Location outside the `paths` tree (e.g. `info.x-api-id`)
    pub fn document(pointer: impl Into<String>) -> Self {
        Self {
            path: pointer.into(),
            method: None,
        }
    }

    /// Location of a whole path item
    pub fn path(template: impl Into<String>) -> Self {
        Self {
            path: template.into(),
            method: None,
        }
    }

    /// Location of one operation under a path item
    pub fn operation(template: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            path: template.into(),
            method: Some(method),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.method {
            Some(method) => write!(f, "{method} {}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}

/// One detected non-conformance. Never mutated after the engine creates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Id of the rule that produced this violation (e.g. "resource-naming")
    pub rule_id: String,
    /// Category for grouping in reports
    pub category: ViolationCategory,
    pub severity: Severity,
    pub location: Location,
    pub message: String,
    /// Suggested fix, when the rule can offer one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {}: {}",
            self.severity, self.rule_id, self.location, self.message
        )
    }
}
