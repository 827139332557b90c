//! Test case record: the unit of output
//!
//! One record is produced per declared (operation, response status) pair.
//! All request/response fragments are already serialized to text so the
//! record maps 1:1 onto spreadsheet cells.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One test case derived from an operation and one of its declared statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TestCaseRecord {
    /// Path template, e.g. "/users/{id}"
    pub endpoint: String,
    /// Upper-case HTTP method
    pub method: String,
    /// `operationId` as declared (empty when absent)
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    /// Response key exactly as declared ("200", "404", "default", ...)
    pub status_code: String,
    pub response_description: String,
    /// Declared header parameters (JSON)
    pub headers: String,
    /// Declared path parameters (JSON)
    pub path_params: String,
    /// Declared query parameters (JSON)
    pub query_params: String,
    /// Resolved request body properties (JSON)
    pub request_body: String,
    /// Synthesized request fixture (JSON)
    pub test_data: String,
    /// Expected response schema fragment (JSON)
    pub expected_response: String,
    pub scenario: String,
    /// Newline-separated numbered steps
    pub test_steps: String,
    pub test_name: String,
    pub expected_result: String,
}

impl TestCaseRecord {
    /// Operation label, e.g. "POST /users".
    #[must_use]
    pub fn operation_label(&self) -> String {
        format!("{} {}", self.method, self.endpoint)
    }

    /// Spreadsheet identifier, e.g. "TC_createUser_201".
    #[must_use]
    pub fn test_case_id(&self) -> String {
        test_case_id(&self.operation_id, &self.status_code)
    }
}

/// Build `TC_<operationId>_<status>` with every character outside
/// `[A-Za-z0-9_]` replaced by `_`.
#[must_use]
pub fn test_case_id(operation_id: &str, status_code: &str) -> String {
    format!("TC_{operation_id}_{status_code}")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
