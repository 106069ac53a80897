//! Naming Convention Rules
//!
//! - Path segments: lowercase, hyphen-separated (`[a-z0-9:._-]+`)
//! - Top-level resources: plural nouns, except allow-listed singletons
//! - Query parameters: camelCase

use super::patterns::{CAMEL_CASE, RESOURCE_SEGMENT, to_camel_case, to_kebab_case};
use super::{ApiRule, Finding, RuleContext, RuleDescriptor, RuleError};
use crate::Severity;
use crate::constants::{PLURAL_RESOURCES, QUERY_PARAM_CASING, RESOURCE_NAMING};
use crate::document::{ApiDocument, is_path_parameter};
use crate::violation::ViolationCategory;
use pluralizer::pluralize;

pub struct ResourceNaming;

static RESOURCE_NAMING_RULE: RuleDescriptor = RuleDescriptor {
    id: RESOURCE_NAMING,
    name: "Resource Naming",
    category: ViolationCategory::Naming,
    default_severity: Severity::Error,
    description: "Path segments are lowercase and hyphen-separated ([a-z0-9:._-]+)",
    rationale: "URLs are case-sensitive; one casing convention keeps them guessable",
};

impl ApiRule for ResourceNaming {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &RESOURCE_NAMING_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            for segment in item.segments() {
                if is_path_parameter(segment) || RESOURCE_SEGMENT.is_match(segment) {
                    continue;
                }
                findings.push(
                    Finding::path(
                        index,
                        item,
                        format!(
                            "path segment '{segment}' must be lowercase and hyphen-separated"
                        ),
                    )
                    .with_suggestion(format!("rename it to '{}'", to_kebab_case(segment))),
                );
            }
        }
        Ok(findings)
    }
}

pub struct PluralResources;

static PLURAL_RESOURCES_RULE: RuleDescriptor = RuleDescriptor {
    id: PLURAL_RESOURCES,
    name: "Plural Resource Names",
    category: ViolationCategory::Naming,
    default_severity: Severity::Warning,
    description: "Top-level resource segments are plural nouns",
    rationale: "A collection URL names the set it contains; singletons are allow-listed",
};

/// The noun a segment names: text before any `:action` suffix, last hyphenated word
fn head_noun(segment: &str) -> &str {
    let resource = segment.split(':').next().unwrap_or(segment);
    resource.rsplit('-').next().unwrap_or(resource)
}

/// True when `word` already reads as a plural (or uncountable) noun
pub fn is_plural_noun(word: &str) -> bool {
    let word = word.to_lowercase();
    pluralize(&word, 2, false) == word || pluralize(&word, 1, false) != word
}

impl ApiRule for PluralResources {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &PLURAL_RESOURCES_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            let Some(resource) = item.resource_segments().first().copied() else {
                continue;
            };
            if context.config.is_singleton(resource) {
                continue;
            }
            let noun = head_noun(resource);
            if noun.is_empty() || noun.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if !is_plural_noun(noun) {
                let plural = pluralize(&noun.to_lowercase(), 2, false);
                findings.push(
                    Finding::path(
                        index,
                        item,
                        format!("top-level resource '{resource}' should be a plural noun"),
                    )
                    .with_suggestion(format!(
                        "use '{plural}', or allow-list '{resource}' as a singleton"
                    )),
                );
            }
        }
        Ok(findings)
    }
}

pub struct QueryParamCasing;

static QUERY_PARAM_CASING_RULE: RuleDescriptor = RuleDescriptor {
    id: QUERY_PARAM_CASING,
    name: "Query Parameter Casing",
    category: ViolationCategory::Naming,
    default_severity: Severity::Error,
    description: "Query parameter names are camelCase",
    rationale: "Query parameters mirror JSON property names, which are camelCase",
};

impl ApiRule for QueryParamCasing {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &QUERY_PARAM_CASING_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            for operation in &item.operations {
                for parameter in operation.query_parameters() {
                    if CAMEL_CASE.is_match(&parameter.name) {
                        continue;
                    }
                    findings.push(
                        Finding::operation(
                            index,
                            item,
                            operation,
                            format!("query parameter '{}' is not camelCase", parameter.name),
                        )
                        .with_suggestion(format!(
                            "rename it to '{}'",
                            to_camel_case(&parameter.name)
                        )),
                    );
                }
            }
        }
        Ok(findings)
    }
}
