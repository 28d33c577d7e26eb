//! Spreadsheet row validation and mapping.
//!
//! Maps raw header-keyed cell maps into typed insert inputs. The column
//! mapping is caller-configured: a table of `(source column, target field)`
//! pairs. Only mapped, non-empty cells are applied; a failed row is
//! discarded whole, never partially applied.

use shared::spreadsheet::{CellValue, RowMap};
use shared::validation;

use crate::models::guest::GuestStatus;
use crate::models::import::RowError;
use crate::models::{NewExpense, NewGuest};

/// Target fields for a guest import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestField {
    Name,
    Phone,
    Email,
    Address,
    Note,
    Status,
    WishingNote,
    PartySize,
    IsInvited,
}

/// Default column mapping for guest sheets. Also drives the downloadable
/// import template.
pub const GUEST_COLUMNS: &[(&str, GuestField)] = &[
    ("Full Name", GuestField::Name),
    ("Phone", GuestField::Phone),
    ("Email", GuestField::Email),
    ("Address", GuestField::Address),
    ("Notes", GuestField::Note),
    ("Status", GuestField::Status),
    ("Wishing Note", GuestField::WishingNote),
    ("Number of Guests", GuestField::PartySize),
    ("Is Invited", GuestField::IsInvited),
];

/// Target fields for an expense import row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    Name,
    Description,
    BudgetAmount,
    ActualAmount,
}

/// Default column mapping for expense sheets.
pub const EXPENSE_COLUMNS: &[(&str, ExpenseField)] = &[
    ("Expense Name", ExpenseField::Name),
    ("Description", ExpenseField::Description),
    ("Budget Amount", ExpenseField::BudgetAmount),
    ("Actual Amount", ExpenseField::ActualAmount),
];

/// Map one raw guest row into a [`NewGuest`].
///
/// `raw_index` is the 0-based data-row index; errors carry the 1-based
/// sheet row number a person sees (`raw_index + 2`).
pub fn map_guest_row(
    raw_index: usize,
    row: &RowMap,
    mapping: &[(&str, GuestField)],
) -> Result<NewGuest, RowError> {
    let mut guest = NewGuest::default();
    let mut name_column = "Full Name";

    for (column, field) in mapping {
        if *field == GuestField::Name {
            name_column = column;
        }
        let Some(value) = row.get(*column).filter(|v| !v.is_empty()) else {
            continue;
        };
        match field {
            GuestField::Name => {
                guest.name = value.as_string().unwrap_or_default();
            }
            GuestField::Phone => {
                let phone = value.as_string().unwrap_or_default();
                validation::validate_phone(&phone).map_err(|e| {
                    RowError::invalid_value(raw_index, column, error_message(&e))
                })?;
                guest.phone = Some(phone);
            }
            GuestField::Email => guest.email = value.as_string(),
            GuestField::Address => guest.address = value.as_string(),
            GuestField::Note => guest.note = value.as_string(),
            GuestField::WishingNote => guest.wishing_note = value.as_string(),
            GuestField::Status => {
                let raw = value.as_string().unwrap_or_default();
                guest.status = raw
                    .parse::<GuestStatus>()
                    .map_err(|_| {
                        RowError::invalid_value(
                            raw_index,
                            column,
                            format!("'{}' is not pending, confirmed or rejected", raw),
                        )
                    })?;
            }
            GuestField::PartySize => {
                let size = value.as_number().ok_or_else(|| {
                    RowError::invalid_value(raw_index, column, "not a number")
                })? as i32;
                validation::validate_party_size(size).map_err(|e| {
                    RowError::invalid_value(raw_index, column, error_message(&e))
                })?;
                guest.party_size = size;
            }
            GuestField::IsInvited => {
                guest.is_invited = parse_bool(value).ok_or_else(|| {
                    RowError::invalid_value(raw_index, column, "expected yes/no")
                })?;
            }
        }
    }

    if guest.name.trim().is_empty() {
        return Err(RowError::missing_field(raw_index, name_column));
    }

    Ok(guest)
}

/// Map one raw expense row into a [`NewExpense`].
pub fn map_expense_row(
    raw_index: usize,
    row: &RowMap,
    mapping: &[(&str, ExpenseField)],
) -> Result<NewExpense, RowError> {
    let mut expense = NewExpense::default();
    let mut name_column = "Expense Name";

    for (column, field) in mapping {
        if *field == ExpenseField::Name {
            name_column = column;
        }
        let Some(value) = row.get(*column).filter(|v| !v.is_empty()) else {
            continue;
        };
        match field {
            ExpenseField::Name => {
                expense.name = value.as_string().unwrap_or_default();
            }
            ExpenseField::Description => expense.description = value.as_string(),
            ExpenseField::BudgetAmount => {
                expense.budget_amount = parse_amount(raw_index, column, value)?;
            }
            ExpenseField::ActualAmount => {
                expense.actual_amount = parse_amount(raw_index, column, value)?;
            }
        }
    }

    if expense.name.trim().is_empty() {
        return Err(RowError::missing_field(raw_index, name_column));
    }

    Ok(expense)
}

fn parse_amount(raw_index: usize, column: &str, value: &CellValue) -> Result<f64, RowError> {
    let amount = value
        .as_number()
        .ok_or_else(|| RowError::invalid_value(raw_index, column, "not a number"))?;
    validation::validate_amount(amount)
        .map_err(|e| RowError::invalid_value(raw_index, column, error_message(&e)))?;
    Ok(amount)
}

fn parse_bool(value: &CellValue) -> Option<bool> {
    match value {
        CellValue::Bool(b) => Some(*b),
        CellValue::Number(f) if *f == 1.0 => Some(true),
        CellValue::Number(f) if *f == 0.0 => Some(false),
        CellValue::Text(s) => match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" | "1" => Some(true),
            "no" | "n" | "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn error_message(err: &validator::ValidationError) -> String {
    err.message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| err.code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::spreadsheet::CellValue;

    fn row(cells: &[(&str, CellValue)]) -> RowMap {
        cells
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_map_guest_row_full() {
        let raw = row(&[
            ("Full Name", text("  Sok Dara  ")),
            ("Phone", text("012 345 678")),
            ("Email", text("dara@example.com")),
            ("Status", text("Confirmed")),
            ("Number of Guests", CellValue::Number(4.0)),
            ("Is Invited", text("yes")),
        ]);

        let guest = map_guest_row(0, &raw, GUEST_COLUMNS).unwrap();
        assert_eq!(guest.name, "Sok Dara");
        assert_eq!(guest.phone.as_deref(), Some("012 345 678"));
        assert_eq!(guest.status, GuestStatus::Confirmed);
        assert_eq!(guest.party_size, 4);
        assert!(guest.is_invited);
    }

    #[test]
    fn test_map_guest_row_missing_name_reports_sheet_row() {
        let raw = row(&[("Phone", text("012345678"))]);
        let err = map_guest_row(3, &raw, GUEST_COLUMNS).unwrap_err();
        assert_eq!(err.row, 5);
        assert!(err.message.contains("Full Name"));
    }

    #[test]
    fn test_map_guest_row_blank_name_is_missing() {
        let raw = row(&[("Full Name", text("   "))]);
        let err = map_guest_row(0, &raw, GUEST_COLUMNS).unwrap_err();
        assert!(err.message.contains("missing required field"));
    }

    #[test]
    fn test_map_guest_row_defaults_apply() {
        let raw = row(&[("Full Name", text("Bopha"))]);
        let guest = map_guest_row(0, &raw, GUEST_COLUMNS).unwrap();
        assert_eq!(guest.status, GuestStatus::Pending);
        assert_eq!(guest.party_size, 1);
        assert!(!guest.is_invited);
        assert!(guest.phone.is_none());
    }

    #[test]
    fn test_map_guest_row_invalid_status() {
        let raw = row(&[("Full Name", text("Bopha")), ("Status", text("maybe"))]);
        let err = map_guest_row(1, &raw, GUEST_COLUMNS).unwrap_err();
        assert_eq!(err.row, 3);
        assert!(err.message.contains("Status"));
    }

    #[test]
    fn test_map_guest_row_invalid_party_size() {
        let raw = row(&[
            ("Full Name", text("Bopha")),
            ("Number of Guests", CellValue::Number(0.0)),
        ]);
        assert!(map_guest_row(0, &raw, GUEST_COLUMNS).is_err());
    }

    #[test]
    fn test_map_guest_row_ignores_unmapped_columns() {
        let raw = row(&[("Full Name", text("Bopha")), ("Table", text("12"))]);
        let guest = map_guest_row(0, &raw, GUEST_COLUMNS).unwrap();
        assert_eq!(guest.name, "Bopha");
    }

    #[test]
    fn test_map_expense_row_full() {
        let raw = row(&[
            ("Expense Name", text("Catering")),
            ("Description", text("Dinner for 100")),
            ("Budget Amount", CellValue::Number(2500.0)),
            ("Actual Amount", text("2610.50")),
        ]);
        let expense = map_expense_row(0, &raw, EXPENSE_COLUMNS).unwrap();
        assert_eq!(expense.name, "Catering");
        assert_eq!(expense.budget_amount, 2500.0);
        assert_eq!(expense.actual_amount, 2610.50);
    }

    #[test]
    fn test_map_expense_row_missing_name() {
        let raw = row(&[("Budget Amount", CellValue::Number(100.0))]);
        let err = map_expense_row(0, &raw, EXPENSE_COLUMNS).unwrap_err();
        assert_eq!(err.row, 2);
        assert!(err.message.contains("Expense Name"));
    }

    #[test]
    fn test_map_expense_row_rejects_negative_amount() {
        let raw = row(&[
            ("Expense Name", text("Flowers")),
            ("Budget Amount", CellValue::Number(-5.0)),
        ]);
        assert!(map_expense_row(0, &raw, EXPENSE_COLUMNS).is_err());
    }

    #[test]
    fn test_map_expense_row_non_numeric_amount() {
        let raw = row(&[
            ("Expense Name", text("Flowers")),
            ("Budget Amount", text("lots")),
        ]);
        let err = map_expense_row(2, &raw, EXPENSE_COLUMNS).unwrap_err();
        assert_eq!(err.row, 4);
        assert!(err.message.contains("not a number"));
    }
}
