//! Spreadsheet export and import-template builders.
//!
//! Turns export row entities into workbook bytes. Column layouts are fixed
//! per kind; templates reuse the import column mappings so a downloaded
//! template always round-trips through the importer.

use chrono::{DateTime, Utc};
use domain::models::guest::GuestStatus;
use domain::services::row_mapper::{EXPENSE_COLUMNS, GUEST_COLUMNS};
use persistence::entities::{ExpenseExportRowEntity, GiftExportRowEntity, GuestExportRowEntity};
use shared::spreadsheet::{write_rows, CellValue, SpreadsheetError};

pub const GUEST_EXPORT_COLUMNS: &[&str] = &[
    "No.",
    "Full Name",
    "Email",
    "Phone",
    "Address",
    "Notes",
    "Status",
    "Wishing Note",
    "Number of Guests",
    "Is Invited",
    "Tags",
    "Groups",
    "Created Date",
    "Updated Date",
];

pub const EXPENSE_EXPORT_COLUMNS: &[&str] = &[
    "No.",
    "Expense ID",
    "Expense Name",
    "Description",
    "Budget Amount",
    "Actual Amount",
    "Payment Name",
    "Payment Amount",
    "Paid At",
    "Payment Note",
    "Created Date",
    "Updated Date",
];

pub const GIFT_EXPORT_COLUMNS: &[&str] = &[
    "No.",
    "Gift ID",
    "Guest Name",
    "Guest Phone",
    "Event ID",
    "Payment Type",
    "Currency Type",
    "Amount (USD)",
    "Amount (KHR)",
    "Note",
    "Created Date",
    "Updated Date",
];

fn text(value: &str) -> CellValue {
    CellValue::Text(value.to_string())
}

fn opt_text(value: Option<&str>) -> CellValue {
    match value {
        Some(v) => CellValue::Text(v.to_string()),
        None => CellValue::Empty,
    }
}

fn date(value: DateTime<Utc>) -> CellValue {
    CellValue::Text(value.format("%Y-%m-%d %H:%M").to_string())
}

/// Build a guest export workbook, one row per guest in creation order.
pub fn guest_workbook(rows: &[GuestExportRowEntity]) -> Result<Vec<u8>, SpreadsheetError> {
    let data: Vec<Vec<CellValue>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            vec![
                CellValue::Number((i + 1) as f64),
                text(&row.name),
                opt_text(row.email.as_deref()),
                opt_text(row.phone.as_deref()),
                opt_text(row.address.as_deref()),
                opt_text(row.note.as_deref()),
                text(GuestStatus::from(row.status).as_str()),
                opt_text(row.wishing_note.as_deref()),
                CellValue::Number(row.party_size as f64),
                CellValue::Bool(row.is_invited),
                opt_text(row.tags.as_deref()),
                opt_text(row.groups.as_deref()),
                date(row.created_at),
                date(row.updated_at),
            ]
        })
        .collect();

    write_rows(GUEST_EXPORT_COLUMNS, &data)
}

/// Build an expense export workbook.
///
/// Rows arrive already fanned out over payments: an expense with N payments
/// contributes N rows sharing its scalar columns, and an expense with none
/// contributes one row with payment placeholders.
pub fn expense_workbook(rows: &[ExpenseExportRowEntity]) -> Result<Vec<u8>, SpreadsheetError> {
    let data: Vec<Vec<CellValue>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            vec![
                CellValue::Number((i + 1) as f64),
                text(&row.expense_id.to_string()),
                text(&row.name),
                opt_text(row.description.as_deref()),
                CellValue::Number(row.budget_amount),
                CellValue::Number(row.actual_amount),
                match row.payment_name.as_deref() {
                    Some(name) => text(name),
                    None => text("-"),
                },
                CellValue::Number(row.payment_amount.unwrap_or(0.0)),
                match row.paid_at {
                    Some(paid_at) => date(paid_at),
                    None => text("-"),
                },
                match row.payment_note.as_deref() {
                    Some(note) => text(note),
                    None => text("-"),
                },
                date(row.created_at),
                date(row.updated_at),
            ]
        })
        .collect();

    write_rows(EXPENSE_EXPORT_COLUMNS, &data)
}

/// Build a gift export workbook, one row per gift with its guest's name and
/// phone joined in.
pub fn gift_workbook(rows: &[GiftExportRowEntity]) -> Result<Vec<u8>, SpreadsheetError> {
    let data: Vec<Vec<CellValue>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            vec![
                CellValue::Number((i + 1) as f64),
                text(&row.id.to_string()),
                text(&row.guest_name),
                opt_text(row.guest_phone.as_deref()),
                text(&row.event_id.to_string()),
                text(&row.payment_type),
                text(&row.currency_type),
                CellValue::Number(row.amount_usd),
                CellValue::Number(row.amount_khr),
                opt_text(row.note.as_deref()),
                date(row.created_at),
                date(row.updated_at),
            ]
        })
        .collect();

    write_rows(GIFT_EXPORT_COLUMNS, &data)
}

/// Build the guest import template: the import headers plus one example row.
pub fn guest_template() -> Result<Vec<u8>, SpreadsheetError> {
    let columns: Vec<&str> = GUEST_COLUMNS.iter().map(|(name, _)| *name).collect();
    let example = vec![
        text("Sok Dara"),
        text("012 345 678"),
        text("dara@example.com"),
        text("Phnom Penh"),
        text("Vegetarian"),
        text("pending"),
        CellValue::Empty,
        CellValue::Number(2.0),
        text("yes"),
    ];
    write_rows(&columns, &[example])
}

/// Build the expense import template.
pub fn expense_template() -> Result<Vec<u8>, SpreadsheetError> {
    let columns: Vec<&str> = EXPENSE_COLUMNS.iter().map(|(name, _)| *name).collect();
    let example = vec![
        text("Catering"),
        text("Dinner for 100 guests"),
        CellValue::Number(2500.0),
        CellValue::Number(2400.0),
    ];
    write_rows(&columns, &[example])
}
