//! Expense repository for database operations.

use domain::models::NewExpense;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{ExpenseEntity, ExpenseExportRowEntity};
use crate::metrics::QueryTimer;

/// Outcome of a quota-checked expense insert.
#[derive(Debug, Clone)]
pub enum ExpenseInsertOutcome {
    /// Expense was persisted.
    Created(ExpenseEntity),
    /// The event's expense quota was already full; nothing was inserted.
    LimitReached,
}

/// Repository for expense-related database operations.
#[derive(Clone)]
pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Count expenses belonging to an event.
    pub async fn count_by_event(&self, event_id: Uuid) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_expenses_by_event");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM expenses WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether an expense with this name already exists for the event.
    pub async fn exists_by_name(&self, event_id: Uuid, name: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("expense_exists_by_name");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM expenses WHERE event_id = $1 AND name = $2)
            "#,
        )
        .bind(event_id)
        .bind(name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert an expense, re-validating the event's expense quota inside the
    /// same transaction as the insert. `limit_expenses <= 0` means unlimited.
    pub async fn create_expense(
        &self,
        event_id: Uuid,
        limit_expenses: i32,
        expense: &NewExpense,
    ) -> Result<ExpenseInsertOutcome, sqlx::Error> {
        let timer = QueryTimer::new("create_expense");
        let mut tx = self.pool.begin().await?;

        if limit_expenses > 0 {
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(super::guest::event_lock_key(event_id))
                .execute(&mut *tx)
                .await?;

            let count = sqlx::query_scalar::<_, i64>(
                r#"
                SELECT COUNT(*) FROM expenses WHERE event_id = $1
                "#,
            )
            .bind(event_id)
            .fetch_one(&mut *tx)
            .await?;

            if count >= limit_expenses as i64 {
                timer.record();
                return Ok(ExpenseInsertOutcome::LimitReached);
            }
        }

        let entity = sqlx::query_as::<_, ExpenseEntity>(
            r#"
            INSERT INTO expenses (event_id, name, description, budget_amount, actual_amount)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, event_id, name, description, budget_amount, actual_amount,
                      created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(&expense.name)
        .bind(expense.description.as_deref())
        .bind(expense.budget_amount)
        .bind(expense.actual_amount)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(ExpenseInsertOutcome::Created(entity))
    }

    /// Fetch expense rows fanned out over their payments for export: one row
    /// per payment, or a single row with NULL payment columns when an
    /// expense has none.
    pub async fn export_rows(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<ExpenseExportRowEntity>, sqlx::Error> {
        let timer = QueryTimer::new("export_expense_rows");
        let result = sqlx::query_as::<_, ExpenseExportRowEntity>(
            r#"
            SELECT
                e.id AS expense_id, e.name, e.description,
                e.budget_amount, e.actual_amount,
                p.name AS payment_name, p.amount AS payment_amount,
                p.paid_at, p.note AS payment_note,
                e.created_at, e.updated_at
            FROM expenses e
            LEFT JOIN expense_payments p ON p.expense_id = e.id
            WHERE e.event_id = $1
            ORDER BY e.created_at ASC, e.id ASC, p.paid_at ASC NULLS LAST
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: ExpenseRepository tests require a database connection and are
    // exercised through the import/export service seams.
}
