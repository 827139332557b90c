//! apicase-core: Test case records, scenario rules and report writers
//!
//! This crate owns everything downstream of the OpenAPI document: the
//! [`TestCaseRecord`] produced per declared response, the status-code
//! scenario rules, and the workbook/JSONL writers.

pub mod config;
pub mod dryrun;
pub mod dump;
pub mod record;
pub mod report;
pub mod scenario;
pub mod schema;
pub mod workbook;

pub use config::{BodyFault, Config, ConfigError};
pub use dryrun::DryRunPlan;
pub use dump::{DumpError, DumpIndex};
pub use record::{TestCaseRecord, test_case_id};
pub use workbook::{WriteError, write_workbook};
