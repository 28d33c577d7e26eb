//! Spreadsheet (xlsx) reading and writing.
//!
//! The import pipeline works on untyped, header-keyed cell maps; typing
//! happens later in the row mapper. The writer takes an explicit column
//! order so exports and templates control their layout.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};
use thiserror::Error;

/// Errors raised by spreadsheet decoding/encoding.
#[derive(Debug, Error)]
pub enum SpreadsheetError {
    /// The payload could not be parsed as a spreadsheet, or holds no data rows.
    #[error("malformed spreadsheet: {0}")]
    Malformed(String),

    /// The workbook could not be serialized.
    #[error("failed to write spreadsheet: {0}")]
    Write(String),
}

/// A single cell value, as read from or written to a sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Whether the cell carries no usable value.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// String form of the cell, with integral floats rendered without a
    /// trailing `.0` (spreadsheet engines store `42` as `42.0`).
    pub fn as_string(&self) -> Option<String> {
        match self {
            CellValue::Text(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            CellValue::Number(f) => {
                if f.fract() == 0.0 {
                    Some((*f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
            CellValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Numeric form of the cell, parsing textual numbers as well.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Empty | Data::Error(_) => CellValue::Empty,
        }
    }
}

/// A raw imported row: header name -> cell value.
pub type RowMap = HashMap<String, CellValue>;

/// Decode an xlsx payload into header-keyed row maps.
///
/// Reads the first worksheet. The first row is the header; subsequent rows
/// become `RowMap`s keyed by the header text. Fully blank rows are skipped.
/// Fails with [`SpreadsheetError::Malformed`] when the payload cannot be
/// parsed or yields zero data rows.
pub fn read_rows(bytes: &[u8]) -> Result<Vec<RowMap>, SpreadsheetError> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
        .map_err(|e| SpreadsheetError::Malformed(format!("not a valid xlsx file: {}", e)))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| SpreadsheetError::Malformed("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| SpreadsheetError::Malformed(format!("cannot read sheet: {}", e)))?;

    let mut rows = range.rows();
    let header: Vec<String> = rows
        .next()
        .ok_or_else(|| SpreadsheetError::Malformed("sheet is empty".into()))?
        .iter()
        .map(|cell| match cell {
            Data::String(s) => s.trim().to_string(),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    let mut out = Vec::new();
    for row in rows {
        let mut map = RowMap::new();
        let mut has_value = false;
        for (col, cell) in row.iter().enumerate() {
            let Some(name) = header.get(col) else {
                continue;
            };
            if name.is_empty() {
                continue;
            }
            let value = CellValue::from(cell);
            if !value.is_empty() {
                has_value = true;
            }
            map.insert(name.clone(), value);
        }
        if has_value {
            out.push(map);
        }
    }

    if out.is_empty() {
        return Err(SpreadsheetError::Malformed(
            "sheet contains no data rows".into(),
        ));
    }

    Ok(out)
}

/// Encode rows into an xlsx payload with the given column order.
///
/// The header row is written in the declared order; an empty `rows` slice
/// yields a header-only document. Column widths are sized for readability
/// only.
pub fn write_rows(columns: &[&str], rows: &[Vec<CellValue>]) -> Result<Vec<u8>, SpreadsheetError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, name) in columns.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *name, &header_format)
            .map_err(|e| SpreadsheetError::Write(e.to_string()))?;
    }

    for (idx, row) in rows.iter().enumerate() {
        let row_num = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            let col_num = col as u16;
            match value {
                CellValue::Text(s) => sheet.write_string(row_num, col_num, s),
                CellValue::Number(f) => sheet.write_number(row_num, col_num, *f),
                CellValue::Bool(b) => sheet.write_boolean(row_num, col_num, *b),
                CellValue::Empty => continue,
            }
            .map_err(|e| SpreadsheetError::Write(e.to_string()))?;
        }
    }

    sheet.autofit();
    workbook
        .save_to_buffer()
        .map_err(|e| SpreadsheetError::Write(e.to_string()))
}
