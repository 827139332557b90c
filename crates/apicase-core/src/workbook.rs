//! Spreadsheet output: one `.xlsx` workbook with four sheets

use std::borrow::Cow;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::record::TestCaseRecord;
use crate::report::{Sheet, build_sheets};

/// Column width cap, in characters.
const MAX_COLUMN_WIDTH: usize = 60;

/// Excel's per-cell text limit, in characters.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Appended to a cell cut at [`MAX_CELL_CHARS`].
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Write all four report sheets to `path`.
///
/// Nothing is written unless every sheet serializes.
///
/// # Errors
///
/// Returns error if a cell cannot be encoded or the file cannot be saved.
pub fn write_workbook(records: &[TestCaseRecord], path: &Path) -> Result<(), WriteError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    for sheet in build_sheets(records) {
        write_sheet(&mut workbook, &sheet, &header, &wrap)?;
    }

    workbook
        .save(path)
        .map_err(|e| WriteError::Io(format!("{}: {e}", path.display())))
}

fn write_sheet(
    workbook: &mut Workbook,
    sheet: &Sheet,
    header: &Format,
    wrap: &Format,
) -> Result<(), WriteError> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet.name)
        .map_err(|e| WriteError::Serialize(e.to_string()))?;

    for (col, title) in sheet.headers.iter().enumerate() {
        let col = column(col)?;
        worksheet
            .write_string_with_format(0, col, *title, header)
            .map_err(|e| WriteError::Serialize(e.to_string()))?;
        worksheet
            .set_column_width(col, column_width(sheet, usize::from(col)) as f64)
            .map_err(|e| WriteError::Serialize(e.to_string()))?;
    }

    for (idx, cells) in sheet.rows.iter().enumerate() {
        let row = u32::try_from(idx + 1)
            .map_err(|_| WriteError::Serialize(format!("{}: too many rows", sheet.name)))?;
        for (col, value) in cells.iter().enumerate() {
            worksheet
                .write_string_with_format(row, column(col)?, fit_cell(value), wrap)
                .map_err(|e| {
                    WriteError::Serialize(format!("{} row {row}: {e}", sheet.name))
                })?;
        }
    }

    Ok(())
}

/// Cut oversized text so the cell, marker included, stays within Excel's limit.
fn fit_cell(value: &str) -> Cow<'_, str> {
    if value.chars().count() <= MAX_CELL_CHARS {
        return Cow::Borrowed(value);
    }
    let keep = MAX_CELL_CHARS - TRUNCATION_MARKER.chars().count();
    let end = value.char_indices().nth(keep).map_or(value.len(), |(i, _)| i);
    Cow::Owned(format!("{}{TRUNCATION_MARKER}", &value[..end]))
}

fn column(idx: usize) -> Result<u16, WriteError> {
    u16::try_from(idx).map_err(|_| WriteError::Serialize(format!("column {idx} out of range")))
}

/// Widest first line in the column (header included), capped.
fn column_width(sheet: &Sheet, col: usize) -> usize {
    let header = sheet.headers.get(col).map_or(0, |h| h.chars().count());
    let widest = sheet
        .rows
        .iter()
        .filter_map(|r| r.get(col))
        .map(|cell| cell.lines().map(|l| l.chars().count()).max().unwrap_or(0))
        .max()
        .unwrap_or(0);
    header.max(widest).clamp(10, MAX_COLUMN_WIDTH) + 2
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
}
