//! End-to-end: YAML document on disk → records → workbook and dump

use std::path::Path;

use apicase_core::report::{build_sheets, summarize_endpoints};
use apicase_core::{BodyFault, dump, write_workbook};
use apicase_engine::{CaseGenerator, LoadError, load_document};

const PETSTORE: &str = r##"
openapi: 3.0.0
info:
  title: Petstore
  version: "1"
paths:
  /pets:
    parameters:
      - name: traceId
        in: header
    get:
      operationId: listPets
      summary: List pets
      parameters:
        - name: limit
          in: query
          schema:
            type: integer
            example: 20
        - name: Authorization
          in: header
          required: true
      responses:
        200:
          description: A list of pets
          content:
            application/json:
              schema:
                type: object
                properties:
                  items:
                    type: array
        401:
          description: Unauthorized
    post:
      operationId: pets.create
      summary: Create a pet
      requestBody:
        content:
          application/json:
            schema:
              $ref: "#/components/schemas/NewPet"
      responses:
        "201":
          description: Created
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
        "400":
          description: Invalid pet
        "500":
          description: Storage failure
  /pets/{petId}:
    get:
      operationId: showPet
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: string
        - name: session
          in: cookie
      responses:
        "200":
          description: Expected response to a valid request
        "404":
          description: Not found
        "300":
          description: Multiple choices
components:
  schemas:
    NewPet:
      type: object
      required: [name]
      properties:
        name:
          type: string
        tag:
          type: string
          example: dog
    Pet:
      type: object
      properties:
        id:
          type: integer
        owner:
          $ref: "#/components/schemas/Owner"
    Owner:
      type: object
      properties:
        name:
          type: string
"##;

fn write_spec(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("petstore.yaml");
    std::fs::write(&path, PETSTORE).unwrap();
    path
}

#[test]
fn petstore_to_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let document = load_document(&write_spec(dir.path())).unwrap();

    let records = CaseGenerator::default()
        .with_seed(Some(3))
        .generate(&document);

    let ids: Vec<_> = records.iter().map(|r| r.test_case_id()).collect();
    assert_eq!(
        ids,
        vec![
            "TC_listPets_200",
            "TC_listPets_401",
            "TC_pets_create_201",
            "TC_pets_create_400",
            "TC_pets_create_500",
            "TC_showPet_200",
            "TC_showPet_404",
            "TC_showPet_300",
        ]
    );

    assert_eq!(records[7].scenario, "Verify GET request returns status 300");
    assert_eq!(records[0].scenario, "Verify successful GET request - List pets");

    // path-level parameters and cookie parameters are not part of any fixture
    for r in &records {
        assert!(!r.test_data.contains("traceId"));
        assert!(!r.test_data.contains("session"));
    }

    let unauthorized: serde_json::Value = serde_json::from_str(&records[1].test_data).unwrap();
    assert_eq!(unauthorized["headers"]["Authorization"], "invalid_token_12345");
    assert_eq!(unauthorized["queryParams"]["limit"], 20);

    let created: serde_json::Value = serde_json::from_str(&records[2].expected_response).unwrap();
    assert_eq!(
        created["properties"]["owner"],
        serde_json::json!({"$ref": "#/components/schemas/Owner"})
    );

    let summary = summarize_endpoints(&records);
    assert_eq!(summary.len(), 3);
    assert_eq!(summary[2].status_codes, vec!["200", "404", "300"]);

    let sheets = build_sheets(&records);
    assert_eq!(sheets[0].rows.len(), 3);
    assert!(sheets[1..].iter().all(|s| s.rows.len() == records.len()));

    let output = dir.path().join("cases.xlsx");
    write_workbook(&records, &output).unwrap();
    assert!(std::fs::metadata(&output).unwrap().len() > 0);

    let index = dump::write_dump(&records, &dir.path().join("dumps")).unwrap();
    assert_eq!(index.total, records.len() as u64);
    assert_eq!(index.operations.len(), 3);
}

#[test]
fn nested_references_expand_with_depth() {
    let dir = tempfile::tempdir().unwrap();
    let document = load_document(&write_spec(dir.path())).unwrap();

    let records = CaseGenerator::default()
        .with_seed(Some(3))
        .with_ref_depth(1)
        .generate(&document);

    let created: serde_json::Value = serde_json::from_str(&records[2].expected_response).unwrap();
    assert_eq!(
        created["properties"]["owner"]["properties"]["name"]["type"],
        "string"
    );
}

#[test]
fn bad_request_body_strategies() {
    let dir = tempfile::tempdir().unwrap();
    let document = load_document(&write_spec(dir.path())).unwrap();

    let omitted = CaseGenerator::default()
        .with_body_fault(BodyFault::Omit)
        .generate(&document);
    let body: serde_json::Value = serde_json::from_str(&omitted[3].test_data).unwrap();
    assert_eq!(body["body"], serde_json::json!({"tag": "dog"}));

    let corrupted = CaseGenerator::default()
        .with_body_fault(BodyFault::Corrupt)
        .generate(&document);
    let body: serde_json::Value = serde_json::from_str(&corrupted[3].test_data).unwrap();
    assert_eq!(body["body"], serde_json::json!({"name": 12345, "tag": "dog"}));

    // only the 400 case is affected
    let created: serde_json::Value = serde_json::from_str(&corrupted[2].test_data).unwrap();
    assert_eq!(
        created["body"],
        serde_json::json!({"name": "sample_string", "tag": "dog"})
    );
}

#[test]
fn missing_document_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_document(&dir.path().join("nope.yaml")).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn malformed_document_is_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{\"paths\": ").unwrap();
    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}
