//! Record dump to JSONL files
//!
//! Writes every derived test case record to per-operation JSONL files so the
//! cases can be diffed or fed to other tooling without opening the workbook.
//!
//! ```text
//! .apicase/dumps/
//! ├── GET__users.jsonl
//! ├── POST__users.jsonl
//! └── index.json
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::record::TestCaseRecord;

/// Summary of a dump operation, written as `index.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpIndex {
    /// Total records dumped
    pub total: u64,
    /// Per-operation file listing, in derivation order
    pub operations: Vec<DumpOperationEntry>,
    /// Directory where files were written
    pub dump_dir: PathBuf,
}

/// An entry in the dump index for one operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpOperationEntry {
    /// Operation label, e.g. "POST /api/users"
    pub operation: String,
    /// Filename within dump directory
    pub file: String,
    /// Number of records in this file
    pub count: u64,
}

/// Write all records to per-operation JSONL files.
///
/// # Errors
///
/// Returns error if dump directory cannot be created or files cannot be written.
pub fn write_dump(records: &[TestCaseRecord], dump_dir: &Path) -> Result<DumpIndex, DumpError> {
    std::fs::create_dir_all(dump_dir)
        .map_err(|e| DumpError::Io(format!("create {}: {e}", dump_dir.display())))?;

    // Group by operation label, first-seen order
    let mut groups: Vec<(String, Vec<&TestCaseRecord>)> = Vec::new();
    for record in records {
        let label = record.operation_label();
        match groups.iter_mut().find(|(op, _)| *op == label) {
            Some((_, members)) => members.push(record),
            None => groups.push((label, vec![record])),
        }
    }

    let mut entries = Vec::new();
    let mut total: u64 = 0;

    for (operation, members) in groups {
        let filename = sanitize_filename(&operation);
        let filepath = dump_dir.join(&filename);

        let file = std::fs::File::create(&filepath)
            .map_err(|e| DumpError::Io(format!("create {}: {e}", filepath.display())))?;
        let mut writer = std::io::BufWriter::new(file);

        let count = members.len() as u64;
        total += count;

        for record in members {
            let line =
                serde_json::to_string(record).map_err(|e| DumpError::Serialize(e.to_string()))?;
            writer
                .write_all(line.as_bytes())
                .and_then(|()| writer.write_all(b"\n"))
                .map_err(|e| DumpError::Io(format!("write {}: {e}", filepath.display())))?;
        }

        writer
            .flush()
            .map_err(|e| DumpError::Io(format!("flush {}: {e}", filepath.display())))?;

        entries.push(DumpOperationEntry {
            operation,
            file: filename,
            count,
        });
    }

    let index = DumpIndex {
        total,
        operations: entries,
        dump_dir: dump_dir.to_path_buf(),
    };

    let index_path = dump_dir.join("index.json");
    let index_json =
        serde_json::to_string_pretty(&index).map_err(|e| DumpError::Serialize(e.to_string()))?;
    std::fs::write(&index_path, index_json)
        .map_err(|e| DumpError::Io(format!("write {}: {e}", index_path.display())))?;

    Ok(index)
}

/// Maximum characters kept from the operation label in the filename.
const MAX_FILENAME_LEN: usize = 200;

/// "POST /api/v2/users/{id}" → "POST__api_v2_users__id_.jsonl"
fn sanitize_filename(operation: &str) -> String {
    let sanitized: String = operation
        .chars()
        .take(MAX_FILENAME_LEN)
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' => c,
            _ => '_',
        })
        .collect();
    format!("{sanitized}.jsonl")
}

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}
