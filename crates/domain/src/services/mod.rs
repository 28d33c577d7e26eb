//! Business logic services.

pub mod row_mapper;

pub use row_mapper::{
    map_expense_row, map_guest_row, ExpenseField, GuestField, EXPENSE_COLUMNS, GUEST_COLUMNS,
};
