//! Rule Registry System
//!
//! Every guideline check is a stateless [`ApiRule`] with static metadata. The
//! registry fixes the evaluation order, which is also the tie-breaker for
//! report ordering.

pub mod http;
pub mod identity;
pub mod naming;
pub mod patterns;
pub mod payload;
pub mod registry;
pub mod url;

pub use registry::RuleRegistry;

use crate::config::LintConfig;
use crate::document::{ApiDocument, HttpMethod, Operation, PathItem};
use crate::violation::{Location, ViolationCategory};
use crate::Severity;
use thiserror::Error;

/// Declarative rule metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Unique rule identifier (e.g., "resource-naming")
    pub id: &'static str,
    /// Human-readable rule name
    pub name: &'static str,
    /// Category for grouping in reports
    pub category: ViolationCategory,
    /// Severity of every violation the rule reports
    pub default_severity: Severity,
    /// Description of what the rule checks
    pub description: &'static str,
    /// Why this rule matters
    pub rationale: &'static str,
}

/// A stateless predicate over an [`ApiDocument`]
pub trait ApiRule: Send + Sync {
    fn descriptor(&self) -> &'static RuleDescriptor;

    /// Report every place the document breaks this rule.
    ///
    /// A part the rule cannot read is reported with [`Finding::fault`] so the
    /// rest of the document is still checked. `Err` is for failures that leave
    /// nothing to check.
    fn check(
        &self,
        document: &ApiDocument,
        context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError>;

    fn id(&self) -> &'static str {
        self.descriptor().id
    }
}

/// Read-only inputs shared by all rules during one evaluation
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a LintConfig,
}

impl<'a> RuleContext<'a> {
    pub fn new(config: &'a LintConfig) -> Self {
        Self { config }
    }
}

/// Position of a finding in document order: document-level metadata first,
/// then path items in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Anchor {
    Document,
    Path(usize),
}

/// What a rule reports; the engine turns it into a [`crate::Violation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub anchor: Anchor,
    pub location: Location,
    pub message: String,
    pub suggestion: Option<String>,
    /// The rule could not evaluate this part; reported with severity error
    pub fault: bool,
}

impl Finding {
    /// Finding on document metadata outside `paths`
    pub fn document(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            anchor: Anchor::Document,
            location: Location::document(pointer),
            message: message.into(),
            suggestion: None,
            fault: false,
        }
    }

    /// Finding on the path item at `index`
    pub fn path(index: usize, item: &PathItem, message: impl Into<String>) -> Self {
        Self {
            anchor: Anchor::Path(index),
            location: Location::path(&item.template),
            message: message.into(),
            suggestion: None,
            fault: false,
        }
    }

    /// Finding on one operation of the path item at `index`
    pub fn operation(
        index: usize,
        item: &PathItem,
        operation: &Operation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            anchor: Anchor::Path(index),
            location: Location::operation(&item.template, operation.method),
            message: message.into(),
            suggestion: None,
            fault: false,
        }
    }

    /// The part of the document `error` points at could not be evaluated
    pub fn fault(error: RuleError) -> Self {
        Self {
            anchor: error.anchor(),
            location: error.location().clone(),
            message: format!("rule could not evaluate the document: {error}"),
            suggestion: None,
            fault: true,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// A rule could not evaluate part of the document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("unexpected document shape at {location}: {detail}")]
    UnexpectedShape {
        anchor: Anchor,
        location: Location,
        detail: String,
    },

    #[error("unresolved reference `{reference}` at {location}")]
    UnresolvedReference {
        anchor: Anchor,
        location: Location,
        reference: String,
    },
}

impl RuleError {
    pub fn unexpected_shape(
        index: usize,
        item: &PathItem,
        method: HttpMethod,
        detail: impl Into<String>,
    ) -> Self {
        Self::UnexpectedShape {
            anchor: Anchor::Path(index),
            location: Location::operation(&item.template, method),
            detail: detail.into(),
        }
    }

    pub fn unresolved_reference(
        index: usize,
        item: &PathItem,
        method: HttpMethod,
        reference: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            anchor: Anchor::Path(index),
            location: Location::operation(&item.template, method),
            reference: reference.into(),
        }
    }

    pub fn anchor(&self) -> Anchor {
        match self {
            Self::UnexpectedShape { anchor, .. } | Self::UnresolvedReference { anchor, .. } => {
                *anchor
            }
        }
    }

    pub fn location(&self) -> &Location {
        match self {
            Self::UnexpectedShape { location, .. }
            | Self::UnresolvedReference { location, .. } => location,
        }
    }
}
