//! apicase-engine: OpenAPI document loading and test case derivation
//!
//! Loads a YAML/JSON description, walks its operations and derives one
//! [`apicase_core::TestCaseRecord`] per declared response, synthesizing
//! request fixtures along the way.

pub mod cases;
pub mod fixtures;
pub mod loader;
pub mod resolve;
pub mod spec;

pub use cases::{CaseGenerator, derive_records};
pub use loader::{LoadError, load_document, parse_document};
pub use resolve::SchemaResolver;
pub use spec::{Operation, extract_operations};
