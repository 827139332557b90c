//! JSON Schema for the record interchange format
//!
//! The JSONL dump and any downstream tooling exchange [`TestCaseRecord`]s;
//! this schema documents that format.

use crate::record::TestCaseRecord;

/// Generate JSON Schema for [`TestCaseRecord`].
#[must_use]
pub fn generate_schema() -> String {
    let schema = schemars::schema_for!(TestCaseRecord);
    serde_json::to_string_pretty(&schema).expect("schema serialization should not fail")
}
