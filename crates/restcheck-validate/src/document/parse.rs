//! Builds an [`ApiDocument`] from a generic JSON tree.
//!
//! Only the top level is strict (`openapi`/`swagger`, `info`, `paths`).
//! Anything below that is read leniently: unknown keys are ignored and
//! malformed entries are skipped, leaving shape questions to the rules.

use super::{
    ApiDocument, ApiInfo, HeaderSpec, HttpMethod, MediaTypeSpec, Operation, Parameter,
    ParameterLocation, PathItem, PropertySpec, ResponseSpec, SchemaSpec,
};
use crate::constants::{JSON_MEDIA_TYPE, MAX_SCHEMA_DEPTH};
use serde_json::{Map, Value};
use thiserror::Error;

/// The document cannot be interpreted as an API description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("document root must be an object")]
    NotAnObject,

    #[error("missing required top-level field `{0}`")]
    MissingField(&'static str),

    #[error("top-level field `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl ApiDocument {
    /// Interpret a parsed JSON/YAML tree as an API description
    pub fn from_value(root: &Value) -> Result<Self, StructureError> {
        let object = root.as_object().ok_or(StructureError::NotAnObject)?;

        let spec_version = match object.get("openapi").or_else(|| object.get("swagger")) {
            Some(Value::String(version)) => version.clone(),
            // unquoted `swagger: 2.0` in YAML
            Some(Value::Number(version)) => version.to_string(),
            Some(_) => {
                return Err(StructureError::InvalidField {
                    field: "openapi",
                    expected: "a string",
                });
            }
            None => return Err(StructureError::MissingField("openapi")),
        };

        let info = match object.get("info") {
            Some(Value::Object(info)) => parse_info(info),
            Some(_) => {
                return Err(StructureError::InvalidField {
                    field: "info",
                    expected: "an object",
                });
            }
            None => return Err(StructureError::MissingField("info")),
        };

        let paths = match object.get("paths") {
            Some(Value::Object(paths)) => paths,
            Some(_) => {
                return Err(StructureError::InvalidField {
                    field: "paths",
                    expected: "an object",
                });
            }
            None => return Err(StructureError::MissingField("paths")),
        };

        let resolver = Resolver {
            root,
            produces: string_list(object.get("produces")),
        };
        let paths = paths
            .iter()
            .map(|(template, item)| resolver.path_item(template, item))
            .collect();

        Ok(Self {
            spec_version,
            info,
            paths,
        })
    }
}

fn parse_info(info: &Map<String, Value>) -> ApiInfo {
    ApiInfo {
        title: info.get("title").and_then(Value::as_str).map(String::from),
        version: info.get("version").map(stringify),
        api_id: info.get("x-api-id").map(stringify),
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves local `$ref`s against the document root while building the model
struct Resolver<'a> {
    root: &'a Value,
    /// Swagger 2.0 document-level `produces`
    produces: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn lookup(&self, reference: &str) -> Option<&'a Value> {
        reference
            .strip_prefix('#')
            .and_then(|pointer| self.root.pointer(pointer))
    }

    /// Follow a chain of `$ref`s on a non-schema object.
    /// `Err` carries the reference that could not be resolved.
    fn deref(&self, value: &'a Value) -> Result<&'a Value, String> {
        let mut current = value;
        for _ in 0..MAX_SCHEMA_DEPTH {
            let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
                return Ok(current);
            };
            current = self
                .lookup(reference)
                .ok_or_else(|| reference.to_string())?;
        }
        Err(value
            .get("$ref")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string())
    }

    fn path_item(&self, template: &str, item: &'a Value) -> PathItem {
        let mut path_item = PathItem {
            template: template.to_string(),
            operations: Vec::new(),
        };
        let Some(item) = self.deref(item).ok().and_then(Value::as_object) else {
            return path_item;
        };

        let (shared_parameters, _) = self.parameters(item.get("parameters"));
        for (key, operation) in item {
            let Some(method) = HttpMethod::from_key(key) else {
                continue;
            };
            if let Some(operation) = operation.as_object() {
                path_item
                    .operations
                    .push(self.operation(method, operation, &shared_parameters));
            }
        }
        path_item
    }

    fn operation(
        &self,
        method: HttpMethod,
        operation: &'a Map<String, Value>,
        shared_parameters: &[Parameter],
    ) -> Operation {
        let (own_parameters, body_parameter) = self.parameters(operation.get("parameters"));

        let mut parameters: Vec<Parameter> = shared_parameters
            .iter()
            .filter(|shared| {
                !own_parameters
                    .iter()
                    .any(|own| own.name == shared.name && own.location == shared.location)
            })
            .cloned()
            .collect();
        parameters.extend(own_parameters);

        let produces = match string_list(operation.get("produces")) {
            list if !list.is_empty() => list,
            _ => self.produces.clone(),
        };

        let responses = operation
            .get("responses")
            .and_then(Value::as_object)
            .map(|responses| {
                responses
                    .iter()
                    .map(|(status, response)| self.response(status, response, &produces))
                    .collect()
            })
            .unwrap_or_default();

        Operation {
            method,
            operation_id: operation
                .get("operationId")
                .and_then(Value::as_str)
                .map(String::from),
            parameters,
            has_request_body: operation.contains_key("requestBody") || body_parameter,
            responses,
        }
    }

    /// Returns the declared parameters plus whether a Swagger 2.0
    /// `body`/`formData` parameter was present
    fn parameters(&self, list: Option<&'a Value>) -> (Vec<Parameter>, bool) {
        let mut parameters = Vec::new();
        let mut has_body = false;

        for raw in list.and_then(Value::as_array).into_iter().flatten() {
            let Ok(raw) = self.deref(raw) else {
                continue;
            };
            let location = raw.get("in").and_then(Value::as_str).unwrap_or_default();
            if location == "body" || location == "formData" {
                has_body = true;
                continue;
            }
            let (Some(location), Some(name)) = (
                ParameterLocation::from_key(location),
                raw.get("name").and_then(Value::as_str),
            ) else {
                continue;
            };
            parameters.push(Parameter {
                name: name.to_string(),
                location,
            });
        }

        (parameters, has_body)
    }

    fn response(&self, status: &str, response: &'a Value, produces: &[String]) -> ResponseSpec {
        let mut spec = ResponseSpec {
            status: status.to_string(),
            content: Vec::new(),
            headers: Vec::new(),
            unresolved_ref: None,
        };
        let response = match self.deref(response) {
            Ok(response) => response,
            Err(reference) => {
                spec.unresolved_ref = Some(reference);
                return spec;
            }
        };

        if let Some(content) = response.get("content").and_then(Value::as_object) {
            for (media_type, media) in content {
                spec.content.push(MediaTypeSpec {
                    media_type: media_type.clone(),
                    schema: media.get("schema").map(|s| self.schema(s, 0, &mut Vec::new())),
                });
            }
        } else if let Some(schema) = response.get("schema") {
            // Swagger 2.0: one schema shared by every produced media type
            let schema = self.schema(schema, 0, &mut Vec::new());
            if produces.is_empty() {
                spec.content.push(MediaTypeSpec {
                    media_type: JSON_MEDIA_TYPE.to_string(),
                    schema: Some(schema),
                });
            } else {
                for media_type in produces {
                    spec.content.push(MediaTypeSpec {
                        media_type: media_type.clone(),
                        schema: Some(schema.clone()),
                    });
                }
            }
        }

        if let Some(headers) = response.get("headers").and_then(Value::as_object) {
            for (name, header) in headers {
                let example = self.deref(header).ok().and_then(header_example);
                spec.headers.push(HeaderSpec {
                    name: name.clone(),
                    example,
                });
            }
        }

        spec
    }

    fn schema(&self, value: &'a Value, depth: usize, stack: &mut Vec<&'a str>) -> SchemaSpec {
        let Some(object) = value.as_object() else {
            return SchemaSpec::default();
        };

        if let Some(reference) = object.get("$ref").and_then(Value::as_str) {
            // recursive schemas stop at the first repeated reference
            if depth >= MAX_SCHEMA_DEPTH || stack.contains(&reference) {
                return SchemaSpec {
                    reference: Some(reference.to_string()),
                    ..SchemaSpec::default()
                };
            }
            let Some(target) = self.lookup(reference) else {
                return SchemaSpec {
                    reference: Some(reference.to_string()),
                    unresolved: true,
                    ..SchemaSpec::default()
                };
            };
            stack.push(reference);
            let mut resolved = self.schema(target, depth + 1, stack);
            stack.pop();
            resolved.reference = Some(reference.to_string());
            return resolved;
        }

        if depth >= MAX_SCHEMA_DEPTH {
            return SchemaSpec::default();
        }

        let mut spec = SchemaSpec {
            schema_type: schema_type(object.get("type")),
            required: string_list(object.get("required")),
            ..SchemaSpec::default()
        };

        if let Some(properties) = object.get("properties").and_then(Value::as_object) {
            for (name, property) in properties {
                spec.properties.push(PropertySpec {
                    name: name.clone(),
                    schema: self.schema(property, depth + 1, stack),
                });
            }
        }

        if let Some(items) = object.get("items") {
            spec.items = Some(Box::new(self.schema(items, depth + 1, stack)));
        }

        for member in object
            .get("allOf")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let member = self.schema(member, depth + 1, stack);
            merge_schema(&mut spec, member);
        }

        spec
    }
}

/// `type` may be a string or (OpenAPI 3.1) a list including `"null"`
fn schema_type(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(kind) => Some(kind.clone()),
        Value::Array(kinds) => kinds
            .iter()
            .filter_map(Value::as_str)
            .find(|kind| *kind != "null")
            .map(String::from),
        _ => None,
    }
}

fn merge_schema(target: &mut SchemaSpec, member: SchemaSpec) {
    if target.schema_type.is_none() {
        target.schema_type = member.schema_type;
    }
    for property in member.properties {
        if !target.has_property(&property.name) {
            target.properties.push(property);
        }
    }
    for name in member.required {
        if !target.required.contains(&name) {
            target.required.push(name);
        }
    }
    if target.items.is_none() {
        target.items = member.items;
    }
    target.unresolved |= member.unresolved;
}

/// `example`, then `schema.example`, then the first `examples` entry
fn header_example(header: &Value) -> Option<String> {
    header
        .get("example")
        .or_else(|| header.get("schema").and_then(|s| s.get("example")))
        .or_else(|| {
            header
                .get("examples")
                .and_then(Value::as_object)
                .and_then(|examples| examples.values().next())
                .and_then(|example| example.get("value"))
        })
        .map(stringify)
}
