//! Test case derivation: operation × declared response → `TestCaseRecord`

use std::path::Path;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::Value;

use apicase_core::dryrun::{
    DryRunPlan, OperationPlan, Validation, ValidationStatus, validate_output, validate_unique_ids,
};
use apicase_core::{BodyFault, Config, TestCaseRecord, scenario};

use crate::fixtures;
use crate::resolve::SchemaResolver;
use crate::spec::{self, Operation, ParamLocation, extract_operations, str_field};

/// Derives test case records from a loaded document.
pub struct CaseGenerator {
    body_fault: BodyFault,
    seed: Option<u64>,
    ref_depth: usize,
}

impl Default for CaseGenerator {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl CaseGenerator {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            body_fault: config.body_fault,
            seed: config.seed,
            ref_depth: config.ref_depth,
        }
    }

    #[must_use]
    pub fn with_body_fault(mut self, fault: BodyFault) -> Self {
        self.body_fault = fault;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_ref_depth(mut self, depth: usize) -> Self {
        self.ref_depth = depth;
        self
    }

    /// All records for the document, in path → method → response order.
    #[must_use]
    pub fn generate(&self, document: &Value) -> Vec<TestCaseRecord> {
        let resolver = SchemaResolver::new(document, self.ref_depth);
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let operations = extract_operations(document, &resolver);
        log::debug!("{} operations extracted", operations.len());

        operations
            .iter()
            .flat_map(|op| derive_records(op, &resolver, self.body_fault, &mut rng))
            .collect()
    }

    /// Describe what [`generate`](Self::generate) would produce, with
    /// validations. Nothing is written.
    #[must_use]
    pub fn plan(&self, document: &Value, output: &Path) -> DryRunPlan {
        let resolver = SchemaResolver::new(document, self.ref_depth);
        let operations = extract_operations(document, &resolver);

        let op_plans: Vec<OperationPlan> = operations
            .iter()
            .map(|op| OperationPlan {
                operation: op.label(),
                operation_id: op.operation_id.clone(),
                method: op.method.clone(),
                path: op.path.clone(),
                statuses: op.responses.iter().map(|(k, _)| k.clone()).collect(),
                parameters: op.parameters.iter().map(|p| p.name.clone()).collect(),
                body_properties: op
                    .request_body
                    .as_ref()
                    .map(|b| b.properties.iter().map(|(n, _)| n.clone()).collect())
                    .unwrap_or_default(),
            })
            .collect();

        let total_cases = op_plans.iter().map(|p| p.statuses.len() as u64).sum();

        let mut validations = Vec::new();

        validations.push(
            if document.get("paths").is_some_and(Value::is_object) {
                Validation {
                    check: "paths".into(),
                    status: ValidationStatus::Ok,
                    message: "document declares paths".into(),
                }
            } else {
                Validation {
                    check: "paths".into(),
                    status: ValidationStatus::Error,
                    message: "document has no paths mapping".into(),
                }
            },
        );

        validations.push(Validation {
            check: "operations".into(),
            status: if operations.is_empty() {
                ValidationStatus::Warning
            } else {
                ValidationStatus::Ok
            },
            message: format!(
                "{} operations found ({})",
                operations.len(),
                spec::METHODS.join(", ")
            ),
        });

        validations.push(validate_output(output));
        validations.push(validate_unique_ids(&op_plans));

        DryRunPlan {
            operations: op_plans,
            total_cases,
            validations,
        }
    }
}

/// One record per declared response of `op`, in declaration order.
pub fn derive_records(
    op: &Operation,
    resolver: &SchemaResolver<'_>,
    fault: BodyFault,
    rng: &mut impl Rng,
) -> Vec<TestCaseRecord> {
    let headers = to_json(&op.params_in(ParamLocation::Header).collect::<Vec<_>>());
    let path_params = to_json(&op.params_in(ParamLocation::Path).collect::<Vec<_>>());
    let query_params = to_json(&op.params_in(ParamLocation::Query).collect::<Vec<_>>());
    let request_body = op
        .request_body
        .as_ref()
        .map_or_else(|| "{}".to_string(), |b| to_json(&b.to_json()));

    op.responses
        .iter()
        .map(|(status, response)| {
            let response_description = str_field(response, "description");
            let test_data = fixtures::synthesize(op, status, fault, &mut *rng);
            let expected = spec::expected_response(response, resolver);
            let steps = scenario::test_steps(&op.method, &op.path, status);

            TestCaseRecord {
                endpoint: op.path.clone(),
                method: op.method.clone(),
                operation_id: op.operation_id.clone(),
                summary: op.summary.clone(),
                description: op.description.clone(),
                status_code: status.clone(),
                scenario: scenario::scenario_label(
                    &op.method,
                    status,
                    &op.summary,
                    &response_description,
                ),
                test_steps: scenario::format_steps(&steps),
                test_name: scenario::test_name(&op.method, &op.path, status),
                expected_result: scenario::expected_result(status, &response_description),
                response_description,
                headers: headers.clone(),
                path_params: path_params.clone(),
                query_params: query_params.clone(),
                request_body: request_body.clone(),
                test_data: to_json(&test_data),
                expected_response: to_json(&expected),
            }
        })
        .collect()
}

/// Pretty JSON for one cell.
///
/// Only `serde_json::Value` trees and parameter specs reach this; both have
/// string keys and no fallible `Serialize` impls, so serialization cannot fail.
fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).expect("cell serialization should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> CaseGenerator {
        CaseGenerator::default().with_seed(Some(1))
    }

    fn minimal() -> Value {
        json!({
            "openapi": "3.0.0",
            "paths": {"/health": {"get": {"responses": {"200": {"description": "OK"}}}}}
        })
    }

    fn users_api() -> Value {
        json!({
            "paths": {
                "/users": {
                    "get": {
                        "operationId": "listUsers",
                        "summary": "List users",
                        "parameters": [
                            {"name": "X-Api-Key", "in": "header", "required": true},
                            {"name": "page", "in": "query", "schema": {"type": "integer"}}
                        ],
                        "responses": {
                            "200": {"description": "OK"},
                            "401": {"description": "Unauthorized"},
                            "500": {"description": "Server error"}
                        }
                    },
                    "post": {
                        "operationId": "createUser",
                        "summary": "Create user",
                        "requestBody": {"content": {"application/json": {
                            "schema": {"$ref": "#/components/schemas/NewUser"}
                        }}},
                        "responses": {
                            "201": {
                                "description": "Created",
                                "content": {"application/json": {
                                    "schema": {"$ref": "#/components/schemas/User"}
                                }}
                            },
                            "400": {"description": "Invalid payload"}
                        }
                    }
                },
                "/users/{id}": {
                    "get": {
                        "operationId": "getUser",
                        "parameters": [{"name": "id", "in": "path", "required": true}],
                        "responses": {"404": {"description": "Not found"}}
                    },
                    "delete": {"operationId": "deleteUser", "responses": {}}
                }
            },
            "components": {"schemas": {
                "NewUser": {
                    "type": "object",
                    "required": ["email"],
                    "properties": {
                        "email": {"type": "string"},
                        "age": {"type": "integer", "example": 30}
                    }
                },
                "User": {
                    "type": "object",
                    "properties": {"id": {"type": "string"}}
                }
            }}
        })
    }

    #[test]
    fn minimal_get_yields_one_record() {
        let records = generator().generate(&minimal());
        assert_eq!(records.len(), 1);

        let r = &records[0];
        assert_eq!(r.status_code, "200");
        assert_eq!(r.method, "GET");
        assert_eq!(r.endpoint, "/health");
        assert_eq!(r.scenario, "Verify successful GET request - ");
        assert_eq!(r.test_steps.lines().count(), 6);
        assert_eq!(r.test_data, "{}");
        assert_eq!(r.expected_response, "{}");
        assert_eq!(r.request_body, "{}");
        assert_eq!(r.headers, "[]");
        assert_eq!(r.test_case_id(), "TC__200");
        assert_eq!(r.expected_result, "The API responds with status 200: OK");
    }

    #[test]
    fn one_record_per_declared_response() {
        let doc = users_api();
        let resolver = SchemaResolver::new(&doc, 0);
        let ops = extract_operations(&doc, &resolver);
        let records = generator().generate(&doc);

        let mut rng = SmallRng::seed_from_u64(0);
        for op in &ops {
            let derived = derive_records(op, &resolver, BodyFault::Omit, &mut rng);
            assert_eq!(derived.len(), op.responses.len(), "{}", op.label());
            for r in &derived {
                assert!(op.responses.iter().any(|(k, _)| *k == r.status_code));
            }
        }

        let ids: Vec<_> = records.iter().map(TestCaseRecord::test_case_id).collect();
        assert_eq!(
            ids,
            vec![
                "TC_listUsers_200",
                "TC_listUsers_401",
                "TC_listUsers_500",
                "TC_createUser_201",
                "TC_createUser_400",
                "TC_getUser_404",
            ]
        );
    }

    #[test]
    fn records_carry_scenarios_and_fixtures() {
        let records = generator()
            .with_body_fault(BodyFault::Corrupt)
            .generate(&users_api());

        let unauthorized = &records[1];
        assert_eq!(unauthorized.scenario, "Verify unauthorized access is rejected");
        let data: Value = serde_json::from_str(&unauthorized.test_data).unwrap();
        assert_eq!(data["headers"]["X-Api-Key"], fixtures::INVALID_TOKEN);
        assert_eq!(data["queryParams"]["page"], "{page}");
        assert_eq!(unauthorized.test_steps.lines().count(), 5);

        let server_error = &records[2];
        assert_eq!(
            server_error.scenario,
            "Verify server error handling - Server error"
        );

        let created = &records[3];
        let expected: Value = serde_json::from_str(&created.expected_response).unwrap();
        assert_eq!(expected["properties"]["id"]["type"], "string");
        let body: Value = serde_json::from_str(&created.request_body).unwrap();
        assert_eq!(body["email"]["required"], true);

        let bad_request = &records[4];
        let data: Value = serde_json::from_str(&bad_request.test_data).unwrap();
        assert_eq!(data["body"], json!({"email": 12345, "age": 30}));

        let not_found = &records[5];
        let data: Value = serde_json::from_str(&not_found.test_data).unwrap();
        assert_eq!(data["pathParams"]["id"], fixtures::NON_EXISTENT_ID);
        assert_eq!(not_found.scenario, "Verify resource not found handling");
        insta::assert_snapshot!(not_found.test_data, @r#"
        {
          "pathParams": {
            "id": "non_existent_id_99999"
          }
        }
        "#);
    }

    #[test]
    fn request_columns_serialize_parameter_specs() {
        let records = generator().generate(&users_api());
        let headers: Value = serde_json::from_str(&records[0].headers).unwrap();
        assert_eq!(
            headers,
            json!([{"name": "X-Api-Key", "in": "header", "required": true, "type": "string"}])
        );
        let query: Value = serde_json::from_str(&records[0].query_params).unwrap();
        assert_eq!(query[0]["type"], "integer");
        assert_eq!(records[0].path_params, "[]");
    }

    #[test]
    fn json_cells_are_never_empty() {
        let records = generator().generate(&users_api());
        for r in &records {
            for cell in [
                &r.headers,
                &r.path_params,
                &r.query_params,
                &r.request_body,
                &r.test_data,
                &r.expected_response,
            ] {
                assert!(serde_json::from_str::<Value>(cell).is_ok(), "{cell:?}");
            }
        }
        assert_eq!(to_json(&json!({"a": [1]})), "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let doc = users_api();
        let a = generator().generate(&doc);
        let b = generator().generate(&doc);
        assert_eq!(a, b);
    }

    #[test]
    fn plan_counts_cases_and_validates() {
        let plan = generator().plan(&users_api(), Path::new("cases.xlsx"));
        assert_eq!(plan.operations.len(), 4);
        assert_eq!(plan.total_cases, 6);
        assert_eq!(plan.operations[1].body_properties, vec!["email", "age"]);
        assert_eq!(plan.operations[0].parameters, vec!["X-Api-Key", "page"]);
        assert!(!plan.has_errors());
        assert!(!plan.has_warnings());
    }

    #[test]
    fn plan_flags_missing_paths_and_duplicate_ids() {
        let plan = generator().plan(&json!({"openapi": "3.0.0"}), Path::new("out.xlsx"));
        assert!(plan.has_errors());

        let doc = json!({"paths": {
            "/a": {"get": {"responses": {"200": {"description": "OK"}}}},
            "/b": {"get": {"responses": {"200": {"description": "OK"}}}}
        }});
        let plan = generator().plan(&doc, Path::new("out.xlsx"));
        assert!(!plan.has_errors());
        assert!(plan.has_warnings());
    }
}
