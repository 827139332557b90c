//! `$ref` resolution against `#/components/schemas`
//!
//! The root reference of a schema is always followed one hop. Nested
//! references are expanded up to `depth` further levels; a reference that is
//! already being expanded on the current path is left as the opaque
//! `{"$ref": ...}` node, so cyclic schemas never recurse.

use serde_json::{Map, Value};

const SCHEMA_PREFIX: &str = "#/components/schemas/";

/// Bounded-depth resolver over a document's component-schema registry.
pub struct SchemaResolver<'a> {
    registry: Option<&'a Map<String, Value>>,
    depth: usize,
}

impl<'a> SchemaResolver<'a> {
    #[must_use]
    pub fn new(document: &'a Value, depth: usize) -> Self {
        let registry = document
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(|s| s.as_object());
        Self { registry, depth }
    }

    /// Look up a `#/components/schemas/<Name>` reference.
    #[must_use]
    pub fn lookup(&self, reference: &str) -> Option<&'a Value> {
        reference
            .strip_prefix(SCHEMA_PREFIX)
            .and_then(|name| self.registry?.get(name))
    }

    /// Resolve a schema root.
    ///
    /// Returns `None` only when the root is a reference with no registry match.
    #[must_use]
    pub fn resolve(&self, schema: &Value) -> Option<Value> {
        match ref_name(schema) {
            Some(reference) => {
                let Some(target) = self.lookup(reference) else {
                    log::debug!("unresolved schema reference {reference}");
                    return None;
                };
                let mut path = vec![reference.to_string()];
                Some(self.expand(target, 0, &mut path))
            }
            None => Some(self.expand(schema, 0, &mut Vec::new())),
        }
    }

    fn expand(&self, schema: &Value, level: usize, path: &mut Vec<String>) -> Value {
        if self.depth == 0 {
            return schema.clone();
        }
        match schema {
            Value::Object(obj) => {
                if let Some(reference) = ref_name(schema) {
                    if level >= self.depth || path.iter().any(|p| p == reference) {
                        return schema.clone();
                    }
                    let Some(target) = self.lookup(reference) else {
                        log::debug!("unresolved nested reference {reference}");
                        return schema.clone();
                    };
                    path.push(reference.to_string());
                    let expanded = self.expand(target, level + 1, path);
                    path.pop();
                    return expanded;
                }
                Value::Object(
                    obj.iter()
                        .map(|(k, v)| (k.clone(), self.expand(v, level, path)))
                        .collect(),
                )
            }
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|v| self.expand(v, level, path))
                    .collect(),
            ),
            _ => schema.clone(),
        }
    }
}

/// The `$ref` string of a schema node, if it is a reference.
#[must_use]
pub fn ref_name(schema: &Value) -> Option<&str> {
    schema.get("$ref").and_then(|v| v.as_str())
}
