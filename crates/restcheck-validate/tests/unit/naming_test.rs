//! Tests for path segment, resource plurality and query parameter naming

use crate::test_utils::{assert_rule_silent, document_with_paths, evaluate, evaluate_with, violations_of};
use restcheck_validate::constants::{PLURAL_RESOURCES, QUERY_PARAM_CASING, RESOURCE_NAMING};
use restcheck_validate::{LintConfig, Severity};
use serde_json::json;

fn get_ok() -> serde_json::Value {
    json!({"get": {"responses": {"200": {"description": "ok"}}}})
}

#[test]
fn test_uppercase_segment_flagged() {
    let raw = document_with_paths(json!({"/v1/Employees": get_ok()}));
    let report = evaluate(&raw);

    let found = violations_of(&report, RESOURCE_NAMING);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert_eq!(found[0].location.path, "/v1/Employees");
    assert!(found[0].message.contains("'Employees'"));
    assert_eq!(found[0].suggestion.as_deref(), Some("rename it to 'employees'"));
}

#[test]
fn test_camel_segment_flagged_snake_allowed() {
    let raw = document_with_paths(json!({
        "/v1/employeeRecords": get_ok(),
        "/v1/pay_slips": get_ok()
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, RESOURCE_NAMING);
    assert_eq!(found.len(), 1, "underscore is allowed by the segment pattern");
    assert_eq!(found[0].location.path, "/v1/employeeRecords");
    assert_eq!(found[0].suggestion.as_deref(), Some("rename it to 'employee-records'"));
}

#[test]
fn test_path_parameters_and_actions_are_not_segments() {
    let raw = document_with_paths(json!({
        "/v1/employees/{employeeId}": get_ok(),
        "/v1/employees:search": {"post": {"responses": {"200": {"description": "ok"}}}}
    }));
    let report = evaluate(&raw);

    assert_rule_silent(&report, RESOURCE_NAMING);
}

#[test]
fn test_singular_top_level_resource_flagged() {
    let raw = document_with_paths(json!({"/v1/employee/{id}": get_ok()}));
    let report = evaluate(&raw);

    let found = violations_of(&report, PLURAL_RESOURCES);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Warning);
    assert!(found[0].suggestion.as_deref().unwrap().contains("'employees'"));
}

#[test]
fn test_default_singletons_allowed() {
    let raw = document_with_paths(json!({
        "/v1/status": get_ok(),
        "/v1/health": get_ok()
    }));
    let report = evaluate(&raw);

    assert_rule_silent(&report, PLURAL_RESOURCES);
}

#[test]
fn test_configured_singleton_allowed() {
    let raw = document_with_paths(json!({"/v1/profile": get_ok()}));

    let flagged = evaluate(&raw);
    assert_eq!(violations_of(&flagged, PLURAL_RESOURCES).len(), 1);

    let allowed = evaluate_with(&raw, LintConfig::default().with_singleton("profile"));
    assert_rule_silent(&allowed, PLURAL_RESOURCES);
}

#[test]
fn test_only_first_resource_checked_for_plurality() {
    let raw = document_with_paths(json!({"/v1/employees/{id}/manager": get_ok()}));
    let report = evaluate(&raw);

    assert_rule_silent(&report, PLURAL_RESOURCES);
}

#[test]
fn test_snake_case_query_parameter_flagged() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {
                "parameters": [
                    {"name": "page_size", "in": "query"},
                    {"name": "sortBy", "in": "query"},
                    {"name": "X-Request-Id", "in": "header"}
                ],
                "responses": {"200": {"description": "ok"}}
            }
        }
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, QUERY_PARAM_CASING);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.to_string(), "GET /v1/employees");
    assert_eq!(found[0].suggestion.as_deref(), Some("rename it to 'pageSize'"));
}

#[test]
fn test_path_level_query_parameter_applies_to_every_operation() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "parameters": [{"name": "Filter", "in": "query"}],
            "get": {"responses": {"200": {"description": "ok"}}},
            "delete": {"responses": {"200": {"description": "ok"}}}
        }
    }));
    let report = evaluate(&raw);

    assert_eq!(violations_of(&report, QUERY_PARAM_CASING).len(), 2);
}
