//! Status code classification and scenario text
//!
//! Every piece of prose in a test case (scenario label, steps, test name,
//! expected result) is a pure function of the method, endpoint, declared
//! status key and the operation/response descriptions.

/// Test scenario archetype derived from a declared response status.
///
/// Ranges are checked in declaration order and the first match wins, so
/// 401/403/404 are never reported as [`StatusClass::ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200..300
    Success,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// Remaining 400..500
    ClientError,
    /// 500 and above
    ServerError,
    /// 1xx, 3xx and non-numeric keys such as "default" or "2XX"
    Other,
}

impl StatusClass {
    /// Classify a declared response key.
    #[must_use]
    pub fn of(status: &str) -> Self {
        match status.trim().parse::<u64>() {
            Ok(code) => Self::of_code(code),
            Err(_) => Self::Other,
        }
    }

    #[must_use]
    pub const fn of_code(code: u64) -> Self {
        match code {
            200..300 => Self::Success,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            400..500 => Self::ClientError,
            500.. => Self::ServerError,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl std::fmt::Display for StatusClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Unauthorized => write!(f, "authentication failure"),
            Self::Forbidden => write!(f, "authorization failure"),
            Self::NotFound => write!(f, "not found"),
            Self::ClientError => write!(f, "client error"),
            Self::ServerError => write!(f, "server error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Human-readable scenario label.
#[must_use]
pub fn scenario_label(method: &str, status: &str, summary: &str, response_description: &str) -> String {
    match StatusClass::of(status) {
        StatusClass::Success => format!("Verify successful {method} request - {summary}"),
        StatusClass::Unauthorized => "Verify unauthorized access is rejected".to_string(),
        StatusClass::Forbidden => "Verify forbidden access is rejected".to_string(),
        StatusClass::NotFound => "Verify resource not found handling".to_string(),
        StatusClass::ClientError => {
            format!("Verify client error handling - {response_description}")
        }
        StatusClass::ServerError => {
            format!("Verify server error handling - {response_description}")
        }
        StatusClass::Other => format!("Verify {method} request returns status {status}"),
    }
}

/// Ordered test steps (5 lines, 6 for 2xx).
#[must_use]
pub fn test_steps(method: &str, endpoint: &str, status: &str) -> Vec<String> {
    let class = StatusClass::of(status);

    let mut steps = vec![format!("Prepare the {method} request to {endpoint}")];

    if method.eq_ignore_ascii_case("GET") {
        steps.push("Set the required headers and parameters".to_string());
    } else {
        steps.push("Set the required headers and body parameters".to_string());
    }

    steps.push(
        match class {
            StatusClass::Unauthorized => {
                "Send the request with invalid or missing authentication credentials"
            }
            StatusClass::Forbidden => {
                "Send the request with credentials lacking the required permissions"
            }
            StatusClass::NotFound => "Send the request using a non-existent resource ID",
            StatusClass::ClientError => "Send the request with invalid data",
            _ => "Send the request",
        }
        .to_string(),
    );

    steps.push(format!("Verify the response status code is {status}"));
    steps.push("Verify the response body matches the expected structure".to_string());

    if class.is_success() {
        steps.push("Verify the response data satisfies the business logic".to_string());
    }

    steps
}

/// Steps numbered and joined into one newline-delimited block.
#[must_use]
pub fn format_steps(steps: &[String]) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {step}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// e.g. "GET /users/{id} - 404"
#[must_use]
pub fn test_name(method: &str, endpoint: &str, status: &str) -> String {
    format!("{method} {endpoint} - {status}")
}

/// e.g. "The API responds with status 201: Created"
#[must_use]
pub fn expected_result(status: &str, response_description: &str) -> String {
    if response_description.is_empty() {
        format!("The API responds with status {status}")
    } else {
        format!("The API responds with status {status}: {response_description}")
    }
}
