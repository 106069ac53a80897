//! API Document Model
//!
//! Typed, read-only view over an OpenAPI-compatible description. Path items,
//! operations and responses keep the order they were declared in, which is the
//! order reports are sorted by.

mod parse;

pub use parse::StructureError;

use crate::constants::API_PREFIX_SEGMENT;
use crate::rules::patterns::VERSION_SEGMENT;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// HTTP operation methods recognised under a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Parse an OpenAPI path item key (`get`, `post`, ...)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "get" => Some(Self::Get),
            "put" => Some(Self::Put),
            "post" => Some(Self::Post),
            "delete" => Some(Self::Delete),
            "options" => Some(Self::Options),
            "head" => Some(Self::Head),
            "patch" => Some(Self::Patch),
            "trace" => Some(Self::Trace),
            _ => None,
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
            Self::Head => "HEAD",
            Self::Patch => "PATCH",
            Self::Trace => "TRACE",
        };
        write!(f, "{name}")
    }
}

/// Parsed API description under test
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    /// Value of `openapi` (or `swagger` for 2.0 documents)
    pub spec_version: String,
    pub info: ApiInfo,
    pub paths: Vec<PathItem>,
}

/// The `info` object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiInfo {
    pub title: Option<String>,
    pub version: Option<String>,
    /// `info.x-api-id`, stringified when declared with a non-string value
    pub api_id: Option<String>,
}

/// One entry of `paths`
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    /// URL path template, e.g. `/v1/employees/{id}`
    pub template: String,
    pub operations: Vec<Operation>,
}

impl PathItem {
    /// Non-empty segments of the template
    pub fn segments(&self) -> Vec<&str> {
        self.template.split('/').filter(|s| !s.is_empty()).collect()
    }

    /// Segments after an optional leading `api` segment and version segment
    pub fn unprefixed_segments(&self) -> Vec<&str> {
        let mut segments = self.segments();
        if segments
            .first()
            .is_some_and(|s| s.eq_ignore_ascii_case(API_PREFIX_SEGMENT))
        {
            segments.remove(0);
        }
        if segments.first().is_some_and(|s| VERSION_SEGMENT.is_match(s)) {
            segments.remove(0);
        }
        segments
    }

    /// Resource (non-parameter) segments after the api/version prefix
    pub fn resource_segments(&self) -> Vec<&str> {
        self.unprefixed_segments()
            .into_iter()
            .filter(|s| !is_path_parameter(s))
            .collect()
    }
}

/// True for a templated segment such as `{id}`
pub fn is_path_parameter(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// One operation (method) under a path item
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub method: HttpMethod,
    pub operation_id: Option<String>,
    /// Path-level parameters merged with operation-level ones
    pub parameters: Vec<Parameter>,
    pub has_request_body: bool,
    pub responses: Vec<ResponseSpec>,
}

impl Operation {
    pub fn query_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(|p| p.location == ParameterLocation::Query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "path" => Some(Self::Path),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
}

/// Response status key as declared under `responses`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKey {
    /// Exact code, e.g. `404`
    Code(u16),
    /// Range such as `4XX`, holding the leading digit
    Range(u8),
    /// `default`
    Default,
}

impl StatusKey {
    pub fn parse(key: &str) -> Option<Self> {
        if key == "default" {
            return Some(Self::Default);
        }
        let bytes = key.as_bytes();
        if bytes.len() != 3 || !(b'1'..=b'5').contains(&bytes[0]) {
            return None;
        }
        if bytes[1..].eq_ignore_ascii_case(b"XX") {
            return Some(Self::Range(bytes[0] - b'0'));
        }
        key.parse().ok().map(Self::Code)
    }

    /// Leading digit of the status class, if any
    pub fn class(self) -> Option<u8> {
        match self {
            Self::Code(code) => u8::try_from(code / 100).ok(),
            Self::Range(class) => Some(class),
            Self::Default => None,
        }
    }
}

/// One entry of an operation's `responses`
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSpec {
    /// Raw status key (`200`, `4XX`, `default`, ...)
    pub status: String,
    pub content: Vec<MediaTypeSpec>,
    pub headers: Vec<HeaderSpec>,
    /// Set when the response itself was a `$ref` that could not be resolved
    pub unresolved_ref: Option<String>,
}

impl ResponseSpec {
    pub fn status_key(&self) -> Option<StatusKey> {
        StatusKey::parse(&self.status)
    }

    /// Exact status code, when one is declared
    pub fn status_code(&self) -> Option<u16> {
        match self.status_key()? {
            StatusKey::Code(code) => Some(code),
            _ => None,
        }
    }

    /// 4xx or 5xx, exact or as a range
    pub fn is_error(&self) -> bool {
        self.status_key()
            .and_then(StatusKey::class)
            .is_some_and(|class| class == 4 || class == 5)
    }

    /// Media entry whose essence (type without parameters) matches
    pub fn media(&self, media_type: &str) -> Option<&MediaTypeSpec> {
        let wanted = media_type.to_ascii_lowercase();
        self.content.iter().find(|m| m.essence() == wanted)
    }

    /// JSON payloads other than problem details
    pub fn json_content(&self) -> impl Iterator<Item = &MediaTypeSpec> {
        self.content.iter().filter(|m| m.is_json() && !m.is_problem())
    }
}

/// Media type entry under a response's `content`
#[derive(Debug, Clone, PartialEq)]
pub struct MediaTypeSpec {
    pub media_type: String,
    pub schema: Option<SchemaSpec>,
}

impl MediaTypeSpec {
    fn essence(&self) -> String {
        self.media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase()
    }

    /// `application/json` or any `+json` structured syntax suffix
    pub fn is_json(&self) -> bool {
        let essence = self.essence();
        essence == crate::constants::JSON_MEDIA_TYPE || essence.ends_with("+json")
    }

    pub fn is_problem(&self) -> bool {
        self.essence() == crate::constants::PROBLEM_JSON_MEDIA_TYPE
    }
}

/// Response header declaration, with its example value when one is given
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderSpec {
    pub name: String,
    pub example: Option<String>,
}

/// Schema with local `$ref`s resolved and `allOf` members merged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaSpec {
    /// Reference this schema was reached through, if any
    pub reference: Option<String>,
    pub schema_type: Option<String>,
    pub properties: Vec<PropertySpec>,
    pub required: Vec<String>,
    pub items: Option<Box<SchemaSpec>>,
    /// A `$ref` (here or in an `allOf` member) could not be resolved
    pub unresolved: bool,
}

impl SchemaSpec {
    pub fn property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    pub fn is_array(&self) -> bool {
        self.schema_type.as_deref() == Some("array") || self.items.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertySpec {
    pub name: String,
    pub schema: SchemaSpec,
}
