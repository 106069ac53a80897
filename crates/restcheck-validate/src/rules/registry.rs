//! Rule Registry
//!
//! Holds the rule set in evaluation order. `standard()` is the built-in
//! guideline set and the only one the CLI and configuration can select.
//!
//! The set is fixed at build time: there is no plugin loading and no
//! configuration key that adds rules. `register` is for Rust code that embeds
//! the engine and composes a registry when it is compiled, such as a tool that
//! appends organisation-specific rules or a test that injects a faulting rule.

use super::http::{DeprecationHeaderFormat, MethodGetNoBody, StatusCodeMethodPairing};
use super::identity::UniqueApiId;
use super::naming::{PluralResources, QueryParamCasing, ResourceNaming};
use super::payload::{PaginationEnvelope, ProblemJsonOnError, PropertyCasing};
use super::url::{MaxSubresourceDepth, NoApiPrefix, NoTrailingSlash, VersionInPath};
use super::{ApiRule, RuleDescriptor};
use crate::Severity;
use crate::constants::DOCUMENT_STRUCTURE;
use crate::violation::ViolationCategory;

/// Reported instead of rule output when the document cannot be read as an API description
pub static DOCUMENT_STRUCTURE_RULE: RuleDescriptor = RuleDescriptor {
    id: DOCUMENT_STRUCTURE,
    name: "Document Structure",
    category: ViolationCategory::Structure,
    default_severity: Severity::Error,
    description: "The document has a version marker, an info object and a paths map",
    rationale: "No other rule can say anything about a document it cannot read",
};

/// Registry holding the rules in evaluation order
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn ApiRule>>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.id()))
            .finish()
    }
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule; it runs after every rule already registered
    pub fn register(&mut self, rule: impl ApiRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// All rules, in evaluation order
    pub fn rules(&self) -> &[Box<dyn ApiRule>] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Get a rule by ID
    pub fn get(&self, id: &str) -> Option<&dyn ApiRule> {
        self.rules.iter().find(|r| r.id() == id).map(AsRef::as_ref)
    }

    /// Whether `id` names a registered rule or the structural check
    pub fn contains(&self, id: &str) -> bool {
        id == DOCUMENT_STRUCTURE || self.get(id).is_some()
    }

    /// Get rules by category
    pub fn rules_by_category(&self, category: ViolationCategory) -> Vec<&dyn ApiRule> {
        self.rules
            .iter()
            .filter(|r| r.descriptor().category == category)
            .map(AsRef::as_ref)
            .collect()
    }

    /// Metadata of every registered rule, in evaluation order
    pub fn descriptors(&self) -> Vec<&'static RuleDescriptor> {
        self.rules.iter().map(|r| r.descriptor()).collect()
    }

    /// Create registry with all standard rules
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(ResourceNaming);
        registry.register(PluralResources);
        registry.register(NoTrailingSlash);
        registry.register(NoApiPrefix);
        registry.register(QueryParamCasing);
        registry.register(MethodGetNoBody);
        registry.register(StatusCodeMethodPairing);
        registry.register(VersionInPath);
        registry.register(PaginationEnvelope);
        registry.register(ProblemJsonOnError);
        registry.register(MaxSubresourceDepth);
        registry.register(UniqueApiId);
        registry.register(DeprecationHeaderFormat);
        registry.register(PropertyCasing);
        registry
    }
}
