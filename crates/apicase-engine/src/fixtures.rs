//! Request fixture synthesis (`testData`)
//!
//! Builds example request values per test case. Negative cases get
//! recognisable sentinels: an invalid token for 401, a non-existent id for
//! 404, and a broken required body property for 400.

use rand::Rng;
use serde_json::{Map, Value, json};

use apicase_core::BodyFault;

use crate::spec::{Operation, ParamLocation, ParameterSpec, RequestBodySpec};

/// Header value sent by 401 cases in auth-like headers.
pub const INVALID_TOKEN: &str = "invalid_token_12345";

/// Path value sent by 404 cases in id-like path parameters.
pub const NON_EXISTENT_ID: &str = "non_existent_id_99999";

/// Default for string body properties without an example.
pub const SAMPLE_STRING: &str = "sample_string";

/// Type-appropriate default for a declared schema type.
#[must_use]
pub fn default_value(declared: &str) -> Value {
    match declared {
        "string" => json!(SAMPLE_STRING),
        "integer" => json!(1),
        "number" => json!(1.0),
        "boolean" => json!(true),
        "array" => json!([]),
        "object" => json!({}),
        _ => Value::Null,
    }
}

/// A value that does NOT match the declared schema type.
#[must_use]
pub fn invalid_value(declared: &str) -> Value {
    match declared {
        "string" => json!(12345),
        "integer" | "number" => json!("not_a_number"),
        "boolean" => json!("not_a_boolean"),
        "array" => json!({}),
        "object" => json!([]),
        _ => Value::Null,
    }
}

fn is_auth_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name.contains("auth") || name.contains("api-key")
}

fn is_id_param(name: &str) -> bool {
    name.to_ascii_lowercase().contains("id")
}

/// Declared example, or a `{name}` placeholder.
fn example_or_placeholder(param: &ParameterSpec) -> Value {
    param
        .example
        .clone()
        .unwrap_or_else(|| Value::String(format!("{{{}}}", param.name)))
}

/// Build the request fixture for one operation and target status.
///
/// Sections (`headers`, `pathParams`, `queryParams`, `body`) appear only when
/// the operation declares something for them. Only the body of a 400 case
/// consumes randomness, and only with [`BodyFault::Random`].
pub fn synthesize(op: &Operation, status: &str, fault: BodyFault, rng: &mut impl Rng) -> Value {
    let code = status.trim().parse::<u64>().ok();
    let mut data = Map::new();

    let headers = param_section(op, ParamLocation::Header, |p| {
        (code == Some(401) && is_auth_header(&p.name)).then(|| json!(INVALID_TOKEN))
    });
    if !headers.is_empty() {
        data.insert("headers".into(), Value::Object(headers));
    }

    let path_params = param_section(op, ParamLocation::Path, |p| {
        (code == Some(404) && is_id_param(&p.name)).then(|| json!(NON_EXISTENT_ID))
    });
    if !path_params.is_empty() {
        data.insert("pathParams".into(), Value::Object(path_params));
    }

    let query_params = param_section(op, ParamLocation::Query, |_| None);
    if !query_params.is_empty() {
        data.insert("queryParams".into(), Value::Object(query_params));
    }

    if let Some(body) = &op.request_body {
        data.insert(
            "body".into(),
            Value::Object(body_fixture(body, code == Some(400), fault, rng)),
        );
    }

    Value::Object(data)
}

/// One entry per parameter in `location`; `sentinel` may override the value.
fn param_section(
    op: &Operation,
    location: ParamLocation,
    sentinel: impl Fn(&ParameterSpec) -> Option<Value>,
) -> Map<String, Value> {
    op.params_in(location)
        .map(|p| {
            let value = sentinel(p).unwrap_or_else(|| example_or_placeholder(p));
            (p.name.clone(), value)
        })
        .collect()
}

fn body_fixture(
    body: &RequestBodySpec,
    break_required: bool,
    fault: BodyFault,
    rng: &mut impl Rng,
) -> Map<String, Value> {
    let mut out = Map::new();

    for (name, prop) in &body.properties {
        if prop.required && break_required {
            let omit = match fault {
                BodyFault::Random => rng.gen_bool(0.5),
                BodyFault::Omit => true,
                BodyFault::Corrupt => false,
            };
            if !omit {
                out.insert(name.clone(), invalid_value(&prop.prop_type));
            }
            continue;
        }
        let value = prop
            .example
            .clone()
            .unwrap_or_else(|| default_value(&prop.prop_type));
        out.insert(name.clone(), value);
    }

    out
}
