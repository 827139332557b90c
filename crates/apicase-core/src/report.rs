//! Tabular projections of test case records
//!
//! Four views are produced from the ordered record list. Only the endpoint
//! summary merges rows; every other view keeps one row per record in
//! derivation order.

use crate::record::TestCaseRecord;

/// A named table: header row plus data rows, all text cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

pub const SUMMARY_SHEET: &str = "Endpoint Summary";
pub const TEST_CASES_SHEET: &str = "Test Cases";
pub const REQUEST_SHEET: &str = "Request Data";
pub const RESPONSE_SHEET: &str = "Response Data";

const SUMMARY_HEADERS: &[&str] = &["Endpoint", "Method", "Operation ID", "Summary", "Status Codes"];

const TEST_CASES_HEADERS: &[&str] = &[
    "Test Case ID",
    "Endpoint",
    "Method",
    "Operation ID",
    "Test Name",
    "Summary",
    "Description",
    "Scenario",
    "Test Steps",
    "Status Code",
    "Response Description",
    "Expected Result",
];

const REQUEST_HEADERS: &[&str] = &[
    "Test Case ID",
    "Endpoint",
    "Method",
    "Headers",
    "Path Parameters",
    "Query Parameters",
    "Request Body",
    "Test Data",
];

const RESPONSE_HEADERS: &[&str] = &[
    "Test Case ID",
    "Endpoint",
    "Method",
    "Status Code",
    "Response Description",
    "Expected Response",
];

/// Endpoint summary row after (method, endpoint) deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSummary {
    pub endpoint: String,
    pub method: String,
    pub operation_id: String,
    pub summary: String,
    pub status_codes: Vec<String>,
}

/// Collapse records sharing (method, endpoint) into one row, first-seen order.
#[must_use]
pub fn summarize_endpoints(records: &[TestCaseRecord]) -> Vec<EndpointSummary> {
    let mut rows: Vec<EndpointSummary> = Vec::new();

    for record in records {
        if let Some(row) = rows
            .iter_mut()
            .find(|r| r.method == record.method && r.endpoint == record.endpoint)
        {
            row.status_codes.push(record.status_code.clone());
            continue;
        }
        rows.push(EndpointSummary {
            endpoint: record.endpoint.clone(),
            method: record.method.clone(),
            operation_id: record.operation_id.clone(),
            summary: record.summary.clone(),
            status_codes: vec![record.status_code.clone()],
        });
    }

    rows
}

#[must_use]
pub fn summary_sheet(records: &[TestCaseRecord]) -> Sheet {
    let rows = summarize_endpoints(records)
        .into_iter()
        .map(|s| {
            vec![
                s.endpoint,
                s.method,
                s.operation_id,
                s.summary,
                s.status_codes.join(", "),
            ]
        })
        .collect();
    Sheet {
        name: SUMMARY_SHEET,
        headers: SUMMARY_HEADERS,
        rows,
    }
}

#[must_use]
pub fn test_cases_sheet(records: &[TestCaseRecord]) -> Sheet {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.test_case_id(),
                r.endpoint.clone(),
                r.method.clone(),
                r.operation_id.clone(),
                r.test_name.clone(),
                r.summary.clone(),
                r.description.clone(),
                r.scenario.clone(),
                r.test_steps.clone(),
                r.status_code.clone(),
                r.response_description.clone(),
                r.expected_result.clone(),
            ]
        })
        .collect();
    Sheet {
        name: TEST_CASES_SHEET,
        headers: TEST_CASES_HEADERS,
        rows,
    }
}

#[must_use]
pub fn request_sheet(records: &[TestCaseRecord]) -> Sheet {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.test_case_id(),
                r.endpoint.clone(),
                r.method.clone(),
                r.headers.clone(),
                r.path_params.clone(),
                r.query_params.clone(),
                r.request_body.clone(),
                r.test_data.clone(),
            ]
        })
        .collect();
    Sheet {
        name: REQUEST_SHEET,
        headers: REQUEST_HEADERS,
        rows,
    }
}

#[must_use]
pub fn response_sheet(records: &[TestCaseRecord]) -> Sheet {
    let rows = records
        .iter()
        .map(|r| {
            vec![
                r.test_case_id(),
                r.endpoint.clone(),
                r.method.clone(),
                r.status_code.clone(),
                r.response_description.clone(),
                r.expected_response.clone(),
            ]
        })
        .collect();
    Sheet {
        name: RESPONSE_SHEET,
        headers: RESPONSE_HEADERS,
        rows,
    }
}

/// All four sheets in workbook order.
#[must_use]
pub fn build_sheets(records: &[TestCaseRecord]) -> Vec<Sheet> {
    vec![
        summary_sheet(records),
        test_cases_sheet(records),
        request_sheet(records),
        response_sheet(records),
    ]
}
