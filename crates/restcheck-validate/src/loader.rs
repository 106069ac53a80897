//! Document Loading
//!
//! Reads API descriptions from disk into an un-interpreted JSON value. YAML
//! is converted to the JSON data model so the engine sees one representation.

use crate::{Result, ValidationError};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Serialization format of an API description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format implied by the file extension, if any
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Loads API description documents
pub struct DocumentLoader;

impl DocumentLoader {
    /// Read and parse one file. Unknown extensions try JSON, then YAML.
    pub fn load_path(path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), bytes = content.len(), "Loading API description");
        Self::load_str(&content, DocumentFormat::from_path(path)).map_err(|e| match e {
            ValidationError::Json(inner) => parse_error(path, &inner),
            ValidationError::Yaml(inner) => parse_error(path, &inner),
            other => other,
        })
    }

    /// Parse in-memory content
    pub fn load_str(content: &str, format: Option<DocumentFormat>) -> Result<Value> {
        match format {
            Some(DocumentFormat::Json) => Ok(serde_json::from_str(content)?),
            Some(DocumentFormat::Yaml) => parse_yaml(content),
            None => serde_json::from_str(content).or_else(|_| parse_yaml(content)),
        }
    }

    /// API description files under `root`, sorted by path
    pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));
        for entry in walker {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() && DocumentFormat::from_path(entry.path()).is_some() {
                files.push(entry.into_path());
            }
        }
        files.sort();
        debug!(root = %root.display(), count = files.len(), "Discovered API descriptions");
        Ok(files)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}

fn parse_error(path: &Path, error: &dyn std::fmt::Display) -> ValidationError {
    ValidationError::Parse {
        file: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn parse_yaml(content: &str) -> Result<Value> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_json(yaml))
}

/// YAML allows non-string keys (`200:` is an integer); JSON object keys are
/// always strings, so scalar keys are stringified.
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;
    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map_or(Value::Null, Value::Number)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                object.insert(yaml_key(&key), yaml_to_json(value));
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;
    match key {
        Yaml::String(s) => s.clone(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Null => "null".to_string(),
        Yaml::Tagged(tagged) => yaml_key(&tagged.value),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
