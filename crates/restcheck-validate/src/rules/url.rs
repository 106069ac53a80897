//! URL Shape Rules
//!
//! Trailing slashes, the `/api` prefix, the leading version segment and how
//! deeply sub-resources nest.

use super::patterns::VERSION_SEGMENT;
use super::{ApiRule, Finding, RuleContext, RuleDescriptor, RuleError};
use crate::Severity;
use crate::constants::{
    API_PREFIX_SEGMENT, MAX_RESOURCE_NESTING, MAX_SUBRESOURCE_DEPTH, NO_API_PREFIX,
    NO_TRAILING_SLASH, VERSION_IN_PATH,
};
use crate::document::ApiDocument;
use crate::violation::ViolationCategory;

pub struct NoTrailingSlash;

static NO_TRAILING_SLASH_RULE: RuleDescriptor = RuleDescriptor {
    id: NO_TRAILING_SLASH,
    name: "No Trailing Slash",
    category: ViolationCategory::Url,
    default_severity: Severity::Error,
    description: "Paths do not end with '/'",
    rationale: "'/employees' and '/employees/' would otherwise name the same resource twice",
};

impl ApiRule for NoTrailingSlash {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &NO_TRAILING_SLASH_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        Ok(document
            .paths
            .iter()
            .enumerate()
            // the bare root "/" has no trailing slash to remove
            .filter(|(_, item)| item.template.len() > 1 && item.template.ends_with('/'))
            .map(|(index, item)| {
                Finding::path(index, item, "path ends with a trailing slash").with_suggestion(
                    format!("use '{}'", item.template.trim_end_matches('/')),
                )
            })
            .collect())
    }
}

pub struct NoApiPrefix;

static NO_API_PREFIX_RULE: RuleDescriptor = RuleDescriptor {
    id: NO_API_PREFIX,
    name: "No /api Prefix",
    category: ViolationCategory::Url,
    default_severity: Severity::Warning,
    description: "Paths do not begin with '/api' unless the configuration allows it",
    rationale: "The host already identifies the API; the prefix adds nothing",
};

impl ApiRule for NoApiPrefix {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &NO_API_PREFIX_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        if context.config.api_prefix_allowed {
            return Ok(Vec::new());
        }
        Ok(document
            .paths
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                item.segments()
                    .first()
                    .is_some_and(|s| s.eq_ignore_ascii_case(API_PREFIX_SEGMENT))
            })
            .map(|(index, item)| {
                Finding::path(index, item, "path begins with '/api'")
                    .with_suggestion("drop the '/api' segment or set api_prefix_allowed")
            })
            .collect())
    }
}

pub struct VersionInPath;

static VERSION_IN_PATH_RULE: RuleDescriptor = RuleDescriptor {
    id: VERSION_IN_PATH,
    name: "Version In Path",
    category: ViolationCategory::Url,
    default_severity: Severity::Warning,
    description: "Paths begin with a version segment such as 'v1' or 'v1.2'",
    rationale: "Clients pin the major version they were written against",
};

impl ApiRule for VersionInPath {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &VERSION_IN_PATH_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            let segments = item.segments();
            // an '/api' prefix is no-api-prefix's concern, so look past it
            let first = match segments.as_slice() {
                [api, rest @ ..] if api.eq_ignore_ascii_case(API_PREFIX_SEGMENT) => rest.first(),
                all => all.first(),
            };
            if first.is_some_and(|s| VERSION_SEGMENT.is_match(s)) {
                continue;
            }
            findings.push(
                Finding::path(index, item, "path does not begin with a version segment")
                    .with_suggestion(format!(
                        "prefix it with a major version, e.g. '/v1{}'",
                        item.template
                    )),
            );
        }
        Ok(findings)
    }
}

pub struct MaxSubresourceDepth;

static MAX_SUBRESOURCE_DEPTH_RULE: RuleDescriptor = RuleDescriptor {
    id: MAX_SUBRESOURCE_DEPTH,
    name: "Maximum Sub-resource Depth",
    category: ViolationCategory::Url,
    default_severity: Severity::Error,
    description: "Paths nest at most 3 resource levels",
    rationale: "Deep nesting couples clients to the whole ownership chain",
};

impl ApiRule for MaxSubresourceDepth {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &MAX_SUBRESOURCE_DEPTH_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let mut findings = Vec::new();
        for (index, item) in document.paths.iter().enumerate() {
            let depth = item.resource_segments().len();
            if depth > MAX_RESOURCE_NESTING {
                findings.push(
                    Finding::path(
                        index,
                        item,
                        format!(
                            "path nests {depth} resource levels; at most {MAX_RESOURCE_NESTING} are allowed"
                        ),
                    )
                    .with_suggestion("promote the innermost sub-resource to a top-level resource"),
                );
            }
        }
        Ok(findings)
    }
}
