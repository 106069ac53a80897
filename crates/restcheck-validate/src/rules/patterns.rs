//! Compiled naming patterns shared by the rules and the document model.

use regex::Regex;
use std::sync::LazyLock;

/// Allowed characters of a resource path segment
pub static RESOURCE_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9:._-]+$").expect("valid resource segment pattern"));

/// Version segment such as `v1`, `2`, `v1.2.3`
pub static VERSION_SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?\d+(\.\d+){0,2}$").expect("valid version pattern"));

/// lowerCamelCase identifier
pub static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").expect("valid camelCase pattern"));

/// RFC 9745 structured `Deprecation` value (`@` + unix seconds)
pub static DEPRECATION_TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@-?\d+$").expect("valid deprecation pattern"));

/// Split an identifier into lowercase words at `_`, `-`, spaces and case changes
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut previous_lower = false;

    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch == ' ' || ch == '.' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if ch.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `EmployeeRecords` -> `employee-records`
pub fn to_kebab_case(name: &str) -> String {
    words(name).join("-")
}

/// `page_size` -> `pageSize`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::new();
    for (index, word) in words(name).iter().enumerate() {
        if index == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}
