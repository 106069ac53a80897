//! API Identity Rule

use super::{ApiRule, Finding, RuleContext, RuleDescriptor, RuleError};
use crate::Severity;
use crate::constants::UNIQUE_API_ID;
use crate::document::ApiDocument;
use crate::violation::ViolationCategory;
use uuid::Uuid;

const API_ID_POINTER: &str = "info.x-api-id";

/// Length of the hyphenated form, e.g. `d0184f38-b98d-11e7-9c56-68f728c1ba70`
const HYPHENATED_UUID_LEN: usize = 36;

pub struct UniqueApiId;

static UNIQUE_API_ID_RULE: RuleDescriptor = RuleDescriptor {
    id: UNIQUE_API_ID,
    name: "Unique API Id",
    category: ViolationCategory::Identity,
    default_severity: Severity::Error,
    description: "info.x-api-id is present and a valid UUID",
    rationale: "A stable id tracks an API across renames and version bumps",
};

pub fn is_hyphenated_uuid(value: &str) -> bool {
    value.len() == HYPHENATED_UUID_LEN && Uuid::parse_str(value).is_ok()
}

impl ApiRule for UniqueApiId {
    fn descriptor(&self) -> &'static RuleDescriptor {
        &UNIQUE_API_ID_RULE
    }

    fn check(
        &self,
        document: &ApiDocument,
        _context: &RuleContext<'_>,
    ) -> Result<Vec<Finding>, RuleError> {
        let finding = match document.info.api_id.as_deref() {
            None => Finding::document(API_ID_POINTER, "info.x-api-id is missing"),
            Some(id) if !is_hyphenated_uuid(id) => Finding::document(
                API_ID_POINTER,
                format!("info.x-api-id '{id}' is not a valid UUID"),
            ),
            Some(_) => return Ok(Vec::new()),
        };
        Ok(vec![finding.with_suggestion(format!(
            "set info.x-api-id to a generated UUID such as '{}'",
            Uuid::nil().hyphenated()
        ))])
    }
}
