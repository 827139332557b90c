//! OpenAPI document walking: extract operations, parameters, request bodies
//! and response schemas
//!
//! Extraction is best-effort. A missing or malformed piece degrades to its
//! default (empty string, empty list, absent body) and never raises.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::resolve::{SchemaResolver, ref_name};

/// HTTP methods turned into test cases, in the order they are recognised.
pub const METHODS: &[&str] = &["get", "post", "put", "patch", "delete"];

/// Extracted API operation
#[derive(Debug, Clone)]
pub struct Operation {
    /// Upper-case method
    pub method: String,
    pub path: String,
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<ParameterSpec>,
    pub request_body: Option<RequestBodySpec>,
    /// Response key → response descriptor, document order
    pub responses: Vec<(String, Value)>,
}

impl Operation {
    /// Operation label, e.g. "POST /users".
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Parameters declared in one location, declaration order.
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParamLocation,
    pub required: bool,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    Header,
    Path,
    Query,
}

/// JSON request body reduced to its top-level properties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBodySpec {
    pub properties: Vec<(String, BodyProperty)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyProperty {
    /// Declared `type`, empty when absent
    pub prop_type: String,
    pub example: Option<Value>,
    pub required: bool,
}

impl RequestBodySpec {
    /// `{name: {type, example, required}}` in declaration order.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let props: Map<String, Value> = self
            .properties
            .iter()
            .map(|(name, p)| {
                (
                    name.clone(),
                    json!({
                        "type": p.prop_type,
                        "example": p.example.clone().unwrap_or(Value::Null),
                        "required": p.required,
                    }),
                )
            })
            .collect();
        Value::Object(props)
    }
}

/// Walk `paths` and extract every supported operation in document order.
#[must_use]
pub fn extract_operations(document: &Value, resolver: &SchemaResolver<'_>) -> Vec<Operation> {
    let mut ops = Vec::new();

    let Some(paths) = document.get("paths").and_then(|p| p.as_object()) else {
        log::debug!("document has no paths mapping");
        return ops;
    };

    for (path, path_item) in paths {
        let Some(item) = path_item.as_object() else {
            log::debug!("{path}: path item is not a mapping, skipped");
            continue;
        };

        for (key, operation) in item {
            if !METHODS.contains(&key.as_str()) {
                log::debug!("{path}: ignoring key {key:?}");
                continue;
            }
            ops.push(parse_operation(key, path, operation, resolver));
        }
    }

    ops
}

fn parse_operation(
    method: &str,
    path: &str,
    operation: &Value,
    resolver: &SchemaResolver<'_>,
) -> Operation {
    let parameters = operation
        .get("parameters")
        .and_then(|p| p.as_array())
        .map(|params| params.iter().filter_map(parse_parameter).collect())
        .unwrap_or_default();

    let request_body = json_schema(operation.get("requestBody"))
        .and_then(|schema| request_body_spec(schema, resolver));

    let responses = operation
        .get("responses")
        .and_then(|r| r.as_object())
        .map(|r| r.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        .unwrap_or_default();

    Operation {
        method: method.to_uppercase(),
        path: path.to_string(),
        operation_id: str_field(operation, "operationId"),
        summary: str_field(operation, "summary"),
        description: str_field(operation, "description"),
        parameters,
        request_body,
        responses,
    }
}

fn parse_parameter(param: &Value) -> Option<ParameterSpec> {
    let name = param.get("name")?.as_str()?.to_string();
    let location = match param.get("in")?.as_str()? {
        "header" => ParamLocation::Header,
        "path" => ParamLocation::Path,
        "query" => ParamLocation::Query,
        other => {
            log::debug!("parameter {name}: unsupported location {other:?}, dropped");
            return None;
        }
    };
    let schema = param.get("schema");
    let param_type = schema
        .and_then(|s| s.get("type"))
        .and_then(|t| t.as_str())
        .unwrap_or("string")
        .to_string();
    let example = param
        .get("example")
        .or_else(|| schema.and_then(|s| s.get("example")))
        .cloned();
    let required = param
        .get("required")
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    Some(ParameterSpec {
        name,
        location,
        required,
        param_type,
        example,
    })
}

/// `content["application/json"]` of a request body or response.
fn json_media(node: Option<&Value>) -> Option<&Value> {
    node?.get("content")?.get("application/json")
}

fn json_schema(node: Option<&Value>) -> Option<&Value> {
    json_media(node)?.get("schema")
}

/// Inline `properties` are used directly; a root `$ref` is resolved one hop.
/// Anything else, or an unresolvable reference, means no body.
fn request_body_spec(schema: &Value, resolver: &SchemaResolver<'_>) -> Option<RequestBodySpec> {
    if schema.get("properties").is_none() && ref_name(schema).is_none() {
        return None;
    }
    let resolved = resolver.resolve(schema)?;

    let required: Vec<&str> = resolved
        .get("required")
        .and_then(|r| r.as_array())
        .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
        .unwrap_or_default();

    let properties = resolved
        .get("properties")
        .and_then(|p| p.as_object())
        .map(|props| {
            props
                .iter()
                .map(|(name, prop)| {
                    (
                        name.clone(),
                        BodyProperty {
                            prop_type: str_field(prop, "type"),
                            example: prop.get("example").cloned(),
                            required: required.contains(&name.as_str()),
                        },
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    Some(RequestBodySpec { properties })
}

/// Expected response fragment for one response descriptor.
///
/// - no JSON schema → `{}`
/// - inline properties → `{"properties": ...}`
/// - root reference → the resolved schema (`{}` when unresolvable)
///
/// A media-type `example` is merged in under `example`.
#[must_use]
pub fn expected_response(response: &Value, resolver: &SchemaResolver<'_>) -> Value {
    let Some(media) = json_media(Some(response)) else {
        return json!({});
    };
    let Some(schema) = media.get("schema") else {
        return json!({});
    };

    let mut expected = if schema.get("properties").is_some() {
        let resolved = resolver.resolve(schema).unwrap_or_else(|| schema.clone());
        json!({ "properties": resolved["properties"].clone() })
    } else if ref_name(schema).is_some() {
        resolver.resolve(schema).unwrap_or_else(|| json!({}))
    } else {
        json!({})
    };

    if let (Some(example), Value::Object(map)) = (media.get("example"), &mut expected) {
        map.insert("example".to_string(), example.clone());
    }

    expected
}

/// String field or `""`.
pub(crate) fn str_field(node: &Value, key: &str) -> String {
    node.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}
