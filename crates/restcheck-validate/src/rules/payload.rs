//! Payload Shape Rules
//!
//! - Collection GETs return the `items/total/page/size` envelope
//! - Error responses are `application/problem+json` problem details
//! - JSON property names are camelCase

use super::patterns::{CAMEL_CASE, to_camel_case};
use super::{ApiRule, Finding, RuleContext, RuleDescriptor, RuleError};
use crate::Severity;
use crate::constants::{
    PAGINATION_ENVELOPE, PAGINATION_FIELDS, PROBLEM_FIELDS, PROBLEM_JSON_MEDIA_TYPE,
    PROBLEM_JSON_ON_ERROR, PROPERTY_CASING,
};
use crate::document::{ApiDocument, HttpMethod, PathItem, SchemaSpec, is_path_parameter};
use crate::violation::ViolationCategory;

fn missing_fields(schema: Option<&SchemaSpec>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !schema.is_some_and(|s| s.has_property(field)))
        .collect()
}

pub struct PaginationEnvelope;

static PAGINATION_ENVELOPE_RULE: RuleDescriptor = RuleDescriptor {
    id: PAGINATION_ENVELOPE,
    name: "Pagination Envelope",
    category: ViolationCategory::Payload,
    default_severity: Severity::Warning,
    description: "Collection GET responses declare items, total, page and size",
    rationale: "Clients page through every collection the same way",
};

/// Last segment names a collection rather than an id, action or singleton
fn is_collection_path(item: &PathItem, context: &RuleContext<'_>) -> bool {
    item.unprefixed_segments().last().is_some_and(|last| {
        !is_path_parameter(last) && !last.contains(':') && !context.config.is_singleton(last)
    })
}

impl ApiRule for PaginationEnvelope {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &PAGINATION_ENVELOPE_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            let collection_path = is_collection_path(item, context);
            for operation in item.operations.iter().filter(|o| o.method == HttpMethod::Get) {
                for response in &operation.responses {
                    if !matches!(response.status_code(), Some(200 | 206)) {
                        continue;
                    }
                    if let Some(reference) = &response.unresolved_ref {
                        findings.push(Finding::fault(RuleError::unresolved_reference(
                            index,
                            item,
                            operation.method,
                            reference,
                        )));
                        continue;
                    }
                    for media in response.json_content() {
                        let Some(schema) = &media.schema else {
                            continue;
                        };
                        if schema.unresolved {
                            findings.push(Finding::fault(RuleError::unresolved_reference(
                                index,
                                item,
                                operation.method,
                                schema.reference.clone().unwrap_or_default(),
                            )));
                            continue;
                        }
                        if !(collection_path || schema.is_array() || schema.has_property("items")) {
                            continue;
                        }
                        if schema.is_array() {
                            findings.push(
                                Finding::operation(
                                    index,
                                    item,
                                    operation,
                                    format!(
                                        "collection response {} returns a bare array",
                                        response.status
                                    ),
                                )
                                .with_suggestion(format!(
                                    "wrap the array in an object with fields {}",
                                    PAGINATION_FIELDS.join(", ")
                                )),
                            );
                            continue;
                        }
                        let missing = missing_fields(Some(schema), PAGINATION_FIELDS);
                        if !missing.is_empty() {
                            findings.push(Finding::operation(
                                index,
                                item,
                                operation,
                                format!(
                                    "collection response {} lacks pagination fields: {}",
                                    response.status,
                                    missing.join(", ")
                                ),
                            ));
                        }
                    }
                }
            }
        }
        Ok(findings)
    }
}

pub struct ProblemJsonOnError;

static PROBLEM_JSON_ON_ERROR_RULE: RuleDescriptor = RuleDescriptor {
    id: PROBLEM_JSON_ON_ERROR,
    name: "Problem Details On Errors",
    category: ViolationCategory::Payload,
    default_severity: Severity::Error,
    description: "4xx/5xx responses use application/problem+json with type, title, status, detail, instance",
    rationale: "One machine-readable error format across every API (RFC 7807)",
};

impl ApiRule for ProblemJsonOnError {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &PROBLEM_JSON_ON_ERROR_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            for operation in &item.operations {
                for response in operation.responses.iter().filter(|r| r.is_error()) {
                    if let Some(reference) = &response.unresolved_ref {
                        findings.push(Finding::fault(RuleError::unresolved_reference(
                            index,
                            item,
                            operation.method,
                            reference,
                        )));
                        continue;
                    }
                    if response.content.is_empty() {
                        findings.push(
                            Finding::operation(
                                index,
                                item,
                                operation,
                                format!("error response {} declares no content", response.status),
                            )
                            .with_suggestion(format!("declare {PROBLEM_JSON_MEDIA_TYPE} content")),
                        );
                        continue;
                    }
                    let Some(problem) = response.media(PROBLEM_JSON_MEDIA_TYPE) else {
                        let declared: Vec<&str> = response
                            .content
                            .iter()
                            .map(|m| m.media_type.as_str())
                            .collect();
                        findings.push(
                            Finding::operation(
                                index,
                                item,
                                operation,
                                format!(
                                    "error response {} uses {} instead of {PROBLEM_JSON_MEDIA_TYPE}",
                                    response.status,
                                    declared.join(", ")
                                ),
                            )
                            .with_suggestion(format!("declare {PROBLEM_JSON_MEDIA_TYPE} content")),
                        );
                        continue;
                    };
                    if let Some(schema) = problem.schema.as_ref().filter(|s| s.unresolved) {
                        findings.push(Finding::fault(RuleError::unresolved_reference(
                            index,
                            item,
                            operation.method,
                            schema.reference.clone().unwrap_or_default(),
                        )));
                        continue;
                    }
                    let missing = missing_fields(problem.schema.as_ref(), PROBLEM_FIELDS);
                    if !missing.is_empty() {
                        findings.push(Finding::operation(
                            index,
                            item,
                            operation,
                            format!(
                                "problem schema of error response {} lacks fields: {}",
                                response.status,
                                missing.join(", ")
                            ),
                        ));
                    }
                }
            }
        }
        Ok(findings)
    }
}

pub struct PropertyCasing;

static PROPERTY_CASING_RULE: RuleDescriptor = RuleDescriptor {
    id: PROPERTY_CASING,
    name: "Property Casing",
    category: ViolationCategory::Payload,
    default_severity: Severity::Warning,
    description: "JSON property names in response schemas are camelCase",
    rationale: "Consistent casing lets clients map payloads without per-field rules",
};

fn collect_non_camel(schema: &SchemaSpec, out: &mut Vec<String>) {
    for property in &schema.properties {
        if !CAMEL_CASE.is_match(&property.name) && !out.contains(&property.name) {
            out.push(property.name.clone());
        }
        collect_non_camel(&property.schema, out);
    }
    if let Some(items) = &schema.items {
        collect_non_camel(items, out);
    }
}

impl ApiRule for PropertyCasing {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &PROPERTY_CASING_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            for operation in &item.operations {
                for response in &operation.responses {
                    let mut offenders = Vec::new();
                    for schema in response.json_content().filter_map(|m| m.schema.as_ref()) {
                        collect_non_camel(schema, &mut offenders);
                    }
                    if offenders.is_empty() {
                        continue;
                    }
                    let renames: Vec<String> = offenders
                        .iter()
                        .map(|name| format!("{name} -> {}", to_camel_case(name)))
                        .collect();
                    findings.push(
                        Finding::operation(
                            index,
                            item,
                            operation,
                            format!(
                                "response {} has non-camelCase properties: {}",
                                response.status,
                                offenders.join(", ")
                            ),
                        )
                        .with_suggestion(renames.join(", ")),
                    );
                }
            }
        }
        Ok(findings)
    }
}
