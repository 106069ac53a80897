//! Tests for HTTP method, status code and header rules

use crate::test_utils::{assert_rule_silent, document_with_paths, evaluate, violations_of};
use restcheck_validate::constants::{
    DEPRECATION_HEADER_FORMAT, METHOD_GET_NO_BODY, STATUS_CODE_METHOD_PAIRING,
};
use restcheck_validate::{HttpMethod, Severity};
use serde_json::json;

#[test]
fn test_get_with_request_body_flagged() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {
                "requestBody": {"content": {"application/json": {}}},
                "responses": {"200": {"description": "ok"}}
            },
            "post": {
                "requestBody": {"content": {"application/json": {}}},
                "responses": {"201": {"description": "created"}}
            }
        }
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, METHOD_GET_NO_BODY);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.method, Some(HttpMethod::Get));
}

#[test]
fn test_swagger_body_parameter_counts_as_body() {
    let raw = json!({
        "swagger": "2.0",
        "info": {"title": "legacy", "x-api-id": crate::test_utils::VALID_API_ID},
        "paths": {
            "/v1/employees/{id}": {
                "delete": {
                    "parameters": [{"name": "reason", "in": "body", "schema": {"type": "object"}}],
                    "responses": {"204": {"description": "deleted"}}
                }
            }
        }
    });
    let report = evaluate(&raw);

    let found = violations_of(&report, METHOD_GET_NO_BODY);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].location.method, Some(HttpMethod::Delete));
}

#[test]
fn test_created_from_get_flagged() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {"responses": {"201": {"description": "created?"}}},
            "post": {"responses": {"201": {"description": "created"}}}
        }
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, STATUS_CODE_METHOD_PAIRING);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert!(found[0].message.contains("status 201 is not valid for GET"));
}

#[test]
fn test_no_content_from_post_flagged() {
    let raw = document_with_paths(json!({
        "/v1/employees": {"post": {"responses": {"204": {"description": "nothing"}}}}
    }));
    let report = evaluate(&raw);

    assert_eq!(violations_of(&report, STATUS_CODE_METHOD_PAIRING).len(), 1);
}

#[test]
fn test_ranges_and_default_accepted() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {"responses": {
                "2XX": {"description": "ok"},
                "default": {"description": "anything"}
            }}
        }
    }));
    let report = evaluate(&raw);

    assert_rule_silent(&report, STATUS_CODE_METHOD_PAIRING);
}

#[test]
fn test_unparseable_status_is_a_rule_fault() {
    let raw = document_with_paths(json!({
        "/v1/employees": {"get": {"responses": {"ok": {"description": "??"}}}}
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, STATUS_CODE_METHOD_PAIRING);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].severity, Severity::Error);
    assert!(found[0].message.contains("'ok' is not a status code"));
    assert_eq!(found[0].location.to_string(), "GET /v1/employees");
}

#[test]
fn test_unparseable_status_keeps_findings_on_other_paths() {
    let raw = document_with_paths(json!({
        "/v1/employees/{id}": {"get": {"responses": {"201": {"description": "created?"}}}},
        "/v1/teams/{id}": {"get": {"responses": {"ok": {"description": "??"}}}}
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, STATUS_CODE_METHOD_PAIRING);
    assert_eq!(found.len(), 2, "{found:#?}");
    assert_eq!(found[0].location.to_string(), "GET /v1/employees/{id}");
    assert!(found[0].message.contains("status 201 is not valid for GET"));
    assert_eq!(found[1].location.to_string(), "GET /v1/teams/{id}");
    assert!(found[1].message.contains("'ok' is not a status code"));
}

#[test]
fn test_unparseable_status_keeps_later_responses_of_same_operation() {
    let raw = document_with_paths(json!({
        "/v1/teams/{id}": {"get": {"responses": {
            "ok": {"description": "??"},
            "201": {"description": "created?"}
        }}}
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, STATUS_CODE_METHOD_PAIRING);
    assert_eq!(found.len(), 2, "{found:#?}");
    assert!(found[0].message.contains("'ok' is not a status code"));
    assert!(found[1].message.contains("status 201 is not valid for GET"));
}

#[test]
fn test_deprecation_header_examples() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {"responses": {"200": {
                "description": "ok",
                "headers": {
                    "Deprecation": {"schema": {"type": "string"}, "example": "@1688169599"},
                    "Sunset": {"schema": {"type": "string", "example": "tomorrow"}}
                }
            }}}
        },
        "/v1/teams": {
            "get": {"responses": {"200": {
                "description": "ok",
                "headers": {
                    "Deprecation": {"example": "soon"},
                    "Sunset": {"example": "Sun, 11 Nov 2029 23:59:59 GMT"}
                }
            }}}
        }
    }));
    let report = evaluate(&raw);

    let found = violations_of(&report, DEPRECATION_HEADER_FORMAT);
    assert_eq!(found.len(), 2);
    assert!(found[0].message.starts_with("Sunset header example 'tomorrow'"));
    assert_eq!(found[0].location.path, "/v1/employees");
    assert!(found[1].message.starts_with("Deprecation header example 'soon'"));
    assert_eq!(found[1].severity, Severity::Warning);
}

#[test]
fn test_headers_without_examples_ignored() {
    let raw = document_with_paths(json!({
        "/v1/employees": {
            "get": {"responses": {"200": {
                "description": "ok",
                "headers": {"Deprecation": {"schema": {"type": "string"}}}
            }}}
        }
    }));
    let report = evaluate(&raw);

    assert_rule_silent(&report, DEPRECATION_HEADER_FORMAT);
}
