//! Document loading: OpenAPI description (YAML or JSON) → `serde_json::Value`

use std::path::Path;

/// Read and decode an API description.
///
/// # Errors
///
/// Returns error if the file cannot be read or is not valid YAML/JSON.
pub fn load_document(path: &Path) -> Result<serde_json::Value, LoadError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| LoadError::Io(format!("{}: {e}", path.display())))?;
    parse_document(path, &content)
}

/// Parse an API description from JSON or YAML.
///
/// Detection strategy: try extension first (`.yaml`/`.yml`/`.json`), then fall
/// back to content sniffing (leading `{` → JSON, otherwise YAML).
///
/// Mapping order is preserved and plain YAML scalar keys (e.g. an unquoted
/// `200:` response) are read as strings.
pub fn parse_document(path: &Path, content: &str) -> Result<serde_json::Value, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let document: serde_json::Value = match ext.as_str() {
        "yaml" | "yml" => parse_yaml(content)?,
        "json" => parse_json(content)?,
        _ => {
            if content.trim_start().starts_with('{') {
                parse_json(content)?
            } else {
                parse_yaml(content)?
            }
        }
    };

    if !document.is_object() {
        return Err(LoadError::Parse(format!(
            "{}: expected a mapping at the document root",
            path.display()
        )));
    }
    Ok(document)
}

fn parse_yaml(content: &str) -> Result<serde_json::Value, LoadError> {
    serde_yml::from_str(content).map_err(|e| LoadError::Parse(format!("Invalid YAML: {e}")))
}

fn parse_json(content: &str) -> Result<serde_json::Value, LoadError> {
    serde_json::from_str(content).map_err(|e| LoadError::Parse(format!("Invalid JSON: {e}")))
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
