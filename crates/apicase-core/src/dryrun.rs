//! Dry run plan types and validation
//!
//! Describes which test cases *would* be written without touching the
//! output workbook. Used for pre-flight checks and CI previews.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::record::test_case_id;
use crate::scenario::StatusClass;

// ── Plan types ──

/// Complete dry run plan: operations, case counts, and validations.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DryRunPlan {
    /// Per-operation plan, in document order
    pub operations: Vec<OperationPlan>,
    /// Total test cases that would be written
    pub total_cases: u64,
    /// Document/config validation results
    pub validations: Vec<Validation>,
}

/// Plan for a single operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OperationPlan {
    /// Operation label, e.g. "POST /api/users"
    pub operation: String,
    pub operation_id: String,
    pub method: String,
    pub path: String,
    /// Declared response keys, one test case each
    pub statuses: Vec<String>,
    /// Parameter names (header, path, query)
    pub parameters: Vec<String>,
    /// Request body property names
    pub body_properties: Vec<String>,
}

/// A validation check result.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Validation {
    pub check: String,
    pub status: ValidationStatus,
    pub message: String,
}

/// Status of a validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Ok,
    Warning,
    Error,
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

// ── Validation ──

/// Check the output path looks like a workbook.
#[must_use]
pub fn validate_output(path: &Path) -> Validation {
    let is_xlsx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if is_xlsx {
        Validation {
            check: "output".into(),
            status: ValidationStatus::Ok,
            message: format!("output: {}", path.display()),
        }
    } else {
        Validation {
            check: "output".into(),
            status: ValidationStatus::Warning,
            message: format!(
                "output: {} (missing .xlsx extension, spreadsheet apps may refuse it)",
                path.display()
            ),
        }
    }
}

/// Warn about test case ids that would collide in the workbook.
///
/// Collisions happen when `operationId`s repeat or are missing.
#[must_use]
pub fn validate_unique_ids(operations: &[OperationPlan]) -> Validation {
    let mut seen: Vec<String> = Vec::new();
    let mut duplicates: Vec<String> = Vec::new();

    for op in operations {
        for status in &op.statuses {
            let id = test_case_id(&op.operation_id, status);
            if seen.contains(&id) {
                if !duplicates.contains(&id) {
                    duplicates.push(id);
                }
            } else {
                seen.push(id);
            }
        }
    }

    if duplicates.is_empty() {
        Validation {
            check: "test_case_ids".into(),
            status: ValidationStatus::Ok,
            message: format!("test case ids: {} unique", seen.len()),
        }
    } else {
        Validation {
            check: "test_case_ids".into(),
            status: ValidationStatus::Warning,
            message: format!(
                "test case ids: {} duplicated ({}) - check operationId values",
                duplicates.len(),
                duplicates.join(", ")
            ),
        }
    }
}

// ── Display helpers ──

impl DryRunPlan {
    /// Format as human-readable terminal output.
    #[must_use]
    pub fn to_terminal(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Dry run: {} operations, {} test cases planned\n",
            self.operations.len(),
            self.total_cases,
        ));

        for op in &self.operations {
            lines.push(format!("{} ({} cases):", op.operation, op.statuses.len()));
            if !op.operation_id.is_empty() {
                lines.push(format!("  Operation ID: {}", op.operation_id));
            }
            let statuses: Vec<String> = op
                .statuses
                .iter()
                .map(|s| format!("{s} ({})", StatusClass::of(s)))
                .collect();
            lines.push(format!("  Statuses: {}", statuses.join(", ")));
            if !op.parameters.is_empty() {
                lines.push(format!("  Parameters: {}", op.parameters.join(", ")));
            }
            if !op.body_properties.is_empty() {
                lines.push(format!(
                    "  Body properties: {}",
                    op.body_properties.join(", ")
                ));
            }
            lines.push(String::new());
        }

        lines.push("Validation:".into());
        for v in &self.validations {
            lines.push(format!("  [{}] {}", v.status, v.message));
        }

        lines.join("\n")
    }

    /// Returns true if any validation has Error status.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.status == ValidationStatus::Error)
    }

    /// Returns true if any validation has Warning status.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.validations
            .iter()
            .any(|v| v.status == ValidationStatus::Warning)
    }
}
