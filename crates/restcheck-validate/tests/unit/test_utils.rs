//! Shared test utilities for restcheck-validate tests
//!
//! Fixtures are built with `json!` so each test shows exactly the shape it
//! exercises.

#![allow(dead_code)] // Test utilities may not all be used in every test file

use restcheck_validate::{LintConfig, Report, RuleEngine, Violation};
use serde_json::{Value, json};

pub const VALID_API_ID: &str = "d0184f38-b98d-11e7-9c56-68f728c1ba70";

/// Problem detail schema declaring every required field
pub fn problem_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "type": {"type": "string"},
            "title": {"type": "string"},
            "status": {"type": "integer"},
            "detail": {"type": "string"},
            "instance": {"type": "string"}
        }
    })
}

/// Error response in the expected problem+json shape
pub fn problem_response() -> Value {
    json!({
        "description": "problem",
        "content": {"application/problem+json": {"schema": {"$ref": "#/components/schemas/Problem"}}}
    })
}

/// Wrap a `paths` object into an otherwise conforming document
pub fn document_with_paths(paths: Value) -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Employees API", "version": "1.0.0", "x-api-id": VALID_API_ID},
        "paths": paths,
        "components": {"schemas": {"Problem": problem_schema()}}
    })
}

/// A document that satisfies every standard rule
pub fn clean_document() -> Value {
    json!({
        "openapi": "3.0.3",
        "info": {"title": "Employees API", "version": "1.0.0", "x-api-id": VALID_API_ID},
        "paths": {
            "/v1/employees": {
                "get": {
                    "parameters": [{"name": "pageSize", "in": "query", "schema": {"type": "integer"}}],
                    "responses": {
                        "200": {
                            "description": "page of employees",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/EmployeePage"}}}
                        },
                        "400": problem_response()
                    }
                },
                "post": {
                    "requestBody": {"content": {"application/json": {"schema": {"$ref": "#/components/schemas/Employee"}}}},
                    "responses": {
                        "201": {
                            "description": "created",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Employee"}}}
                        }
                    }
                }
            },
            "/v1/employees/{employeeId}": {
                "parameters": [{"name": "employeeId", "in": "path", "required": true}],
                "get": {
                    "responses": {
                        "200": {
                            "description": "one employee",
                            "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Employee"}}}
                        },
                        "404": problem_response()
                    }
                },
                "delete": {"responses": {"204": {"description": "deleted"}}}
            },
            "/v1/status": {
                "get": {
                    "responses": {
                        "200": {
                            "description": "service status",
                            "content": {"application/json": {"schema": {
                                "type": "object",
                                "properties": {"healthy": {"type": "boolean"}}
                            }}}
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Employee": {
                    "type": "object",
                    "properties": {"id": {"type": "string"}, "displayName": {"type": "string"}}
                },
                "EmployeePage": {
                    "type": "object",
                    "properties": {
                        "items": {"type": "array", "items": {"$ref": "#/components/schemas/Employee"}},
                        "total": {"type": "integer"},
                        "page": {"type": "integer"},
                        "size": {"type": "integer"}
                    }
                },
                "Problem": problem_schema()
            }
        }
    })
}

/// Evaluate with the standard rules and default configuration
pub fn evaluate(raw: &Value) -> Report {
    RuleEngine::default().evaluate_value(raw)
}

/// Evaluate with the standard rules and `config`
pub fn evaluate_with(raw: &Value, config: LintConfig) -> Report {
    RuleEngine::new(config).evaluate_value(raw)
}

/// Violations reported by one rule
pub fn violations_of<'a>(report: &'a Report, rule_id: &str) -> Vec<&'a Violation> {
    report.violations.iter().filter(|v| v.rule_id == rule_id).collect()
}

/// Assert that `rule_id` reported nothing
pub fn assert_rule_silent(report: &Report, rule_id: &str) {
    let found = violations_of(report, rule_id);
    assert!(found.is_empty(), "{rule_id} unexpectedly reported: {found:#?}");
}
