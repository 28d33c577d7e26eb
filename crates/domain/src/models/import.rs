//! Spreadsheet import ledger types.

use serde::Serialize;
use std::str::FromStr;

/// Rows are pulled from the decoded sheet in groups of this size. Purely a
/// throughput/memory control; persistence stays per-row.
pub const IMPORT_BATCH_SIZE: usize = 100;

/// Entity kinds accepted by the import entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    Guest,
    Expense,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for ImportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" | "guests" => Ok(ImportKind::Guest),
            "expense" | "expenses" => Ok(ImportKind::Expense),
            _ => Err(format!("Unknown import kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ImportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Entity kinds served by the export entrypoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Guest,
    Expense,
    Gift,
}

impl ExportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Expense => "expense",
            Self::Gift => "gift",
        }
    }
}

impl FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" | "guests" => Ok(ExportKind::Guest),
            "expense" | "expenses" => Ok(ExportKind::Expense),
            "gift" | "gifts" => Ok(ExportKind::Gift),
            _ => Err(format!("Unknown export kind: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The sole output contract of a batch import: how many rows made it in,
/// how many were skipped, and a readable reason per skipped row.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Number of rows persisted.
    pub imported: u32,
    /// Number of rows not persisted (validation, duplicate, quota or storage).
    pub skipped: u32,
    /// Human-readable per-row reasons, in row order.
    pub errors: Vec<String>,
    /// Whether the batch stopped early because the resource quota was hit.
    pub limit_reached: bool,
}

impl ImportResult {
    /// Record a recovered row-level problem.
    pub fn skip(&mut self, reason: impl Into<String>) {
        self.skipped += 1;
        self.errors.push(reason.into());
    }
}

/// A row-level validation failure, carrying the 1-based human row number
/// (sheet row, counting the header) and a reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl RowError {
    /// The sheet has a header row and cell indexes are 0-based, so the row
    /// a person sees in their spreadsheet app is `index + 2`.
    pub fn human_row(raw_index: usize) -> usize {
        raw_index + 2
    }

    pub fn missing_field(raw_index: usize, column: &str) -> Self {
        Self {
            row: Self::human_row(raw_index),
            message: format!("missing required field '{}'", column),
        }
    }

    pub fn invalid_value(raw_index: usize, column: &str, detail: impl Into<String>) -> Self {
        Self {
            row: Self::human_row(raw_index),
            message: format!("invalid value for '{}': {}", column, detail.into()),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_kind_parse() {
        assert_eq!("guest".parse::<ImportKind>().unwrap(), ImportKind::Guest);
        assert_eq!("Expenses".parse::<ImportKind>().unwrap(), ImportKind::Expense);
        assert!("gift".parse::<ImportKind>().is_err());
    }

    #[test]
    fn test_row_error_uses_human_row_numbers() {
        let err = RowError::missing_field(0, "Full Name");
        assert_eq!(err.row, 2);
        assert_eq!(err.to_string(), "Row 2: missing required field 'Full Name'");
    }

    #[test]
    fn test_import_result_skip_accumulates() {
        let mut result = ImportResult::default();
        result.skip("Row 2: missing required field 'Full Name'");
        result.skip("Row 3: duplicate guest 'Alice'");
        assert_eq!(result.skipped, 2);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.imported, 0);
    }

    #[test]
    fn test_import_result_serialize_camel_case() {
        let result = ImportResult {
            imported: 3,
            skipped: 1,
            errors: vec!["Row 4: duplicate".to_string()],
            limit_reached: true,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["imported"], 3);
        assert_eq!(json["limitReached"], true);
    }
}
