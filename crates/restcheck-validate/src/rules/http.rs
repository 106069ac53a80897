//! HTTP Semantics Rules
//!
//! Request bodies on safe/idempotent methods, status codes that only make
//! sense for some methods, and the format of lifecycle headers.

use super::patterns::DEPRECATION_TIMESTAMP;
use super::{ApiRule, Finding, RuleContext, RuleDescriptor, RuleError};
use crate::Severity;
use crate::constants::{
    DEPRECATION_HEADER, DEPRECATION_HEADER_FORMAT, METHOD_GET_NO_BODY, STATUS_CODE_METHOD_PAIRING,
    SUNSET_HEADER,
};
use crate::document::{ApiDocument, HttpMethod};
use crate::violation::ViolationCategory;
use chrono::DateTime;

pub struct MethodGetNoBody;

static METHOD_GET_NO_BODY_RULE: RuleDescriptor = RuleDescriptor {
    id: METHOD_GET_NO_BODY,
    name: "No Body On GET/DELETE/HEAD",
    category: ViolationCategory::Http,
    default_severity: Severity::Error,
    description: "GET, DELETE and HEAD operations declare no request body",
    rationale: "Intermediaries may drop bodies on these methods; the semantics are undefined",
};

impl ApiRule for MethodGetNoBody {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &METHOD_GET_NO_BODY_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            for operation in &item.operations {
                let bodiless = matches!(
                    operation.method,
                    HttpMethod::Get | HttpMethod::Delete | HttpMethod::Head
                );
                if bodiless && operation.has_request_body {
                    findings.push(
                        Finding::operation(
                            index,
                            item,
                            operation,
                            format!("{} operation declares a request body", operation.method),
                        )
                        .with_suggestion("move the input to query parameters or use POST"),
                    );
                }
            }
        }
        Ok(findings)
    }
}

pub struct StatusCodeMethodPairing;

static STATUS_CODE_METHOD_PAIRING_RULE: RuleDescriptor = RuleDescriptor {
    id: STATUS_CODE_METHOD_PAIRING,
    name: "Status Code Method Pairing",
    category: ViolationCategory::Http,
    default_severity: Severity::Error,
    description: "Declared status codes are valid for the declaring method",
    rationale: "A 201 from GET or a 204 from POST tells clients something that cannot be true",
};

/// Methods that may return `code`; `None` means any method may
pub fn allowed_methods(code: u16) -> Option<&'static [HttpMethod]> {
    use HttpMethod::{Delete, Get, Head, Patch, Post, Put};
    match code {
        201 => Some(&[Post, Put]),
        202 => Some(&[Post, Put, Patch, Delete]),
        204 => Some(&[Head, Put, Patch, Delete]),
        206 => Some(&[Get]),
        304 => Some(&[Get, Head]),
        _ => None,
    }
}

impl ApiRule for StatusCodeMethodPairing {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &STATUS_CODE_METHOD_PAIRING_RULE
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
                    if response.status_key().is_none() {
                        findings.push(Finding::fault(RuleError::unexpected_shape(
                            index,
                            item,
                            operation.method,
                            format!("'{}' is not a status code", response.status),
                        )));
                        continue;
                    }
                    let Some(code) = response.status_code() else {
                        continue;
                    };
                    let Some(allowed) = allowed_methods(code) else {
                        continue;
                    };
                    if allowed.contains(&operation.method) {
                        continue;
                    }
                    let names: Vec<String> = allowed.iter().map(ToString::to_string).collect();
                    findings.push(
                        Finding::operation(
                            index,
                            item,
                            operation,
                            format!(
                                "status {code} is not valid for {}; only {} may return it",
                                operation.method,
                                names.join("/")
                            ),
                        ),
                    );
                }
            }
        }
        Ok(findings)
    }
}

pub struct DeprecationHeaderFormat;

static DEPRECATION_HEADER_FORMAT_RULE: RuleDescriptor = RuleDescriptor {
    id: DEPRECATION_HEADER_FORMAT,
    name: "Deprecation Header Format",
    category: ViolationCategory::Headers,
    default_severity: Severity::Warning,
    description: "Deprecation examples are '@<unix-seconds>' or an HTTP-date; Sunset examples are an HTTP-date",
    rationale: "Clients parse these headers to schedule migrations",
};

/// RFC 7231 IMF-fixdate (also accepts the wider RFC 2822 grammar)
fn is_http_date(value: &str) -> bool {
    DateTime::parse_from_rfc2822(value.trim()).is_ok()
}

/// `@1688169599`, an HTTP-date, or the legacy boolean `true`
fn is_deprecation_value(value: &str) -> bool {
    let value = value.trim();
    DEPRECATION_TIMESTAMP.is_match(value) || value == "true" || is_http_date(value)
}

impl ApiRule for DeprecationHeaderFormat {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &DEPRECATION_HEADER_FORMAT_RULE
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
                    for header in &response.headers {
                        let Some(example) = header.example.as_deref() else {
                            continue;
                        };
                        let (valid, expected) =
                            if header.name.eq_ignore_ascii_case(DEPRECATION_HEADER) {
                                (
                                    is_deprecation_value(example),
                                    "'@<unix-seconds>' or an HTTP-date",
                                )
                            } else if header.name.eq_ignore_ascii_case(SUNSET_HEADER) {
                                (is_http_date(example), "an HTTP-date")
                            } else {
                                continue;
                            };
                        if !valid {
                            findings.push(
                                Finding::operation(
                                    index,
                                    item,
                                    operation,
                                    format!(
                                        "{} header example '{example}' in response {} is not {expected}",
                                        header.name, response.status
                                    ),
                                )
                                .with_suggestion("e.g. 'Sun, 11 Nov 2029 23:59:59 GMT'"),
                            );
                        }
                    }
                }
            }
        }
        Ok(findings)
    }
}
