//! Project configuration for test case generation

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default workbook written when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT: &str = "api_test_cases.xlsx";

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Output workbook path
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Seed for the body-fault coin flip (unseeded when absent)
    #[serde(default)]
    pub seed: Option<u64>,

    /// How required body properties are broken for 400 test cases
    #[serde(default)]
    pub body_fault: BodyFault,

    /// Nested `$ref` levels expanded beneath a schema root (0 = leave opaque)
    #[serde(default)]
    pub ref_depth: usize,

    /// Dump all records to JSONL files
    #[serde(default)]
    pub dump: bool,

    /// Directory for dump files (default: ".apicase/dumps")
    #[serde(default)]
    pub dump_dir: Option<PathBuf>,
}

/// Fault injected into a required body property of a 400 test case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFault {
    /// Coin flip per property between `Omit` and `Corrupt`
    #[default]
    Random,
    /// Leave the property out of the body
    Omit,
    /// Replace the value with one of the wrong type
    Corrupt,
}

impl std::fmt::Display for BodyFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Omit => write!(f, "omit"),
            Self::Corrupt => write!(f, "corrupt"),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: default_output(),
            seed: None,
            body_fault: BodyFault::default(),
            ref_depth: 0,
            dump: false,
            dump_dir: None,
        }
    }
}

impl Config {
    /// Load config from file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e.to_string()))?;

        if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Load from default location (.apicase.toml)
    pub fn load_default() -> Result<Self, ConfigError> {
        let candidates = [".apicase.toml", ".apicase.json", "apicase.toml"];

        for name in candidates {
            let path = Path::new(name);
            if path.exists() {
                return Self::load(path);
            }
        }

        Ok(Self::default())
    }

    /// Create example config file
    pub fn example() -> &'static str {
        r#"# apicase configuration

# Workbook to write (overridden by the OUTPUT argument)
output = "api_test_cases.xlsx"

# How required body properties are broken for 400 cases:
#   "random"  - coin flip per property between omit and corrupt
#   "omit"    - leave the property out
#   "corrupt" - send a value of the wrong type
body_fault = "random"

# Seed for the "random" body fault (reproducible workbooks)
# seed = 42

# Nested $ref levels expanded beneath a schema root.
# 0 keeps nested references as-is; cycles are always left unresolved.
ref_depth = 0

# Dump all test case records to JSONL files (default: false)
# dump = true
# dump_dir = ".apicase/dumps"
"#
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read {0}: {1}")]
    Io(PathBuf, String),
    #[error("Parse error: {0}")]
    Parse(String),
}
