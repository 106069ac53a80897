//! Rule identifiers and guideline constants

/// Pseudo-rule reported when a document cannot be interpreted at all
pub const DOCUMENT_STRUCTURE: &str = "document-structure";

pub const RESOURCE_NAMING: &str = "resource-naming";
pub const PLURAL_RESOURCES: &str = "plural-resources";
pub const NO_TRAILING_SLASH: &str = "no-trailing-slash";
pub const NO_API_PREFIX: &str = "no-api-prefix";
pub const QUERY_PARAM_CASING: &str = "query-param-casing";
pub const METHOD_GET_NO_BODY: &str = "method-get-no-body";
pub const STATUS_CODE_METHOD_PAIRING: &str = "status-code-method-pairing";
pub const VERSION_IN_PATH: &str = "version-in-path";
pub const PAGINATION_ENVELOPE: &str = "pagination-envelope";
pub const PROBLEM_JSON_ON_ERROR: &str = "problem-json-on-error";
pub const MAX_SUBRESOURCE_DEPTH: &str = "max-subresource-depth";
pub const UNIQUE_API_ID: &str = "unique-api-id";
pub const DEPRECATION_HEADER_FORMAT: &str = "deprecation-header-format";
pub const PROPERTY_CASING: &str = "property-casing";

/// Leading path segment that `no-api-prefix` rejects
pub const API_PREFIX_SEGMENT: &str = "api";

/// Deepest allowed chain of resource segments (resource+id pairs)
pub const MAX_RESOURCE_NESTING: usize = 3;

/// Singleton resources accepted by `plural-resources` out of the box
pub const DEFAULT_SINGLETON_RESOURCES: &[&str] = &["status", "health"];

/// Fields every paginated collection envelope declares
pub const PAGINATION_FIELDS: &[&str] = &["items", "total", "page", "size"];

/// Fields every problem detail object declares (RFC 7807)
pub const PROBLEM_FIELDS: &[&str] = &["type", "title", "status", "detail", "instance"];

pub const PROBLEM_JSON_MEDIA_TYPE: &str = "application/problem+json";
pub const JSON_MEDIA_TYPE: &str = "application/json";

pub const DEPRECATION_HEADER: &str = "Deprecation";
pub const SUNSET_HEADER: &str = "Sunset";

/// Guard against runaway `$ref` chains while building schemas
pub const MAX_SCHEMA_DEPTH: usize = 32;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "RESTCHECK";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = ".restcheck.toml";

/// Directory (under the user config dir) holding `config.toml`
pub const DEFAULT_CONFIG_DIR: &str = "restcheck";
