//! Batch import executor.
//!
//! Runs mapped spreadsheet rows through a per-row pipeline: quota admission,
//! duplicate suppression, then a quota-checked insert. Row-level failures are
//! recorded and skipped; the batch only stops early when the event's quota is
//! exhausted, at which point all remaining rows are reported skipped in one
//! summary line.

use async_trait::async_trait;
use domain::models::{ImportResult, RowError, IMPORT_BATCH_SIZE};
use domain::services::row_mapper::{map_expense_row, map_guest_row, EXPENSE_COLUMNS, GUEST_COLUMNS};
use domain::models::{NewExpense, NewGuest};
use persistence::repositories::{
    ExpenseInsertOutcome, ExpenseRepository, GuestInsertOutcome, GuestRepository,
};
use shared::spreadsheet::RowMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::quota::{QuotaDecision, QuotaGuard};

/// Outcome of a store insert attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Created,
    /// The storage-side quota re-check refused the row.
    LimitReached,
}

/// Storage seam for one import kind.
///
/// Implementations wrap a repository pre-bound to an event. The executor only
/// sees counts, duplicate checks and inserts, which keeps it testable without
/// a database.
#[async_trait]
pub trait ImportStore<R: Send + Sync>: Send + Sync {
    /// Resource label used in skip messages ("guest", "expense").
    fn resource(&self) -> &'static str;

    /// The event's quota for this resource; `<= 0` means unlimited.
    fn limit(&self) -> i32;

    /// Display name of a row for skip messages.
    fn display_name<'a>(&self, row: &'a R) -> &'a str;

    /// Current number of rows of this resource under the event.
    async fn count(&self) -> Result<i64, sqlx::Error>;

    /// Whether a row with this row's identity already exists.
    async fn exists(&self, row: &R) -> Result<bool, sqlx::Error>;

    /// Persist the row, re-checking the quota transactionally.
    async fn insert(&self, row: &R) -> Result<InsertOutcome, sqlx::Error>;
}

/// Run mapped rows through the import pipeline.
///
/// `mapped` pairs each row's 0-based sheet index with its mapping outcome, in
/// sheet order. Rows are processed in groups of [`IMPORT_BATCH_SIZE`];
/// persistence stays per-row, so a storage failure on one row never unwinds
/// its neighbours.
pub async fn run_import<R, S>(
    store: &S,
    mapped: Vec<(usize, Result<R, RowError>)>,
) -> Result<ImportResult, ApiError>
where
    R: Send + Sync,
    S: ImportStore<R>,
{
    let guard = QuotaGuard::new(store.limit());
    let mut result = ImportResult::default();

    let mut start = 0;
    while start < mapped.len() {
        let end = (start + IMPORT_BATCH_SIZE).min(mapped.len());
        tracing::debug!(
            resource = store.resource(),
            batch_start = start,
            batch_end = end,
            "processing import batch"
        );

        for pos in start..end {
            let (raw_index, row) = &mapped[pos];
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    result.skip(err.to_string());
                    continue;
                }
            };

            let current = store.count().await?;
            if guard.admit(current) == QuotaDecision::Reject {
                skip_remaining(store, &mapped, pos, &mut result);
                return Ok(result);
            }

            let human_row = RowError::human_row(*raw_index);
            match store.exists(row).await {
                Ok(true) => {
                    result.skip(format!(
                        "Row {}: duplicate {} '{}'",
                        human_row,
                        store.resource(),
                        store.display_name(row)
                    ));
                    continue;
                }
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(row = human_row, error = %err, "duplicate check failed");
                    result.skip(format!(
                        "Row {}: could not check for duplicates, skipped",
                        human_row
                    ));
                    continue;
                }
            }

            match store.insert(row).await {
                Ok(InsertOutcome::Created) => result.imported += 1,
                Ok(InsertOutcome::LimitReached) => {
                    // A concurrent writer filled the quota between our count
                    // and the insert transaction's re-check.
                    skip_remaining(store, &mapped, pos, &mut result);
                    return Ok(result);
                }
                Err(err) => {
                    tracing::warn!(row = human_row, error = %err, "row insert failed");
                    result.skip(format!(
                        "Row {}: failed to save {} '{}'",
                        human_row,
                        store.resource(),
                        store.display_name(row)
                    ));
                }
            }
        }

        start = end;
    }

    Ok(result)
}

/// Mark every row from `pos` onwards skipped with one quota summary line.
fn skip_remaining<R, S>(
    store: &S,
    mapped: &[(usize, Result<R, RowError>)],
    pos: usize,
    result: &mut ImportResult,
) where
    R: Send + Sync,
    S: ImportStore<R>,
{
    let remaining = mapped.len() - pos;
    let first = RowError::human_row(mapped[pos].0);
    let last = RowError::human_row(mapped[mapped.len() - 1].0);

    result.skipped += remaining as u32;
    result.limit_reached = true;
    if remaining == 1 {
        result
            .errors
            .push(format!("Row {}: {} limit reached", first, store.resource()));
    } else {
        result.errors.push(format!(
            "Rows {}-{}: {} limit reached",
            first,
            last,
            store.resource()
        ));
    }
    tracing::info!(
        resource = store.resource(),
        skipped = remaining,
        "import stopped at quota"
    );
}

/// Map raw guest rows for the executor, preserving sheet order and indexes.
pub fn map_guest_rows(rows: &[RowMap]) -> Vec<(usize, Result<NewGuest, RowError>)> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| (i, map_guest_row(i, row, GUEST_COLUMNS)))
        .collect()
}

/// Map raw expense rows for the executor.
pub fn map_expense_rows(rows: &[RowMap]) -> Vec<(usize, Result<NewExpense, RowError>)> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| (i, map_expense_row(i, row, EXPENSE_COLUMNS)))
        .collect()
}

/// Guest-backed import store.
pub struct GuestStore {
    repo: GuestRepository,
    event_id: Uuid,
    limit: i32,
}

impl GuestStore {
    pub fn new(repo: GuestRepository, event_id: Uuid, limit: i32) -> Self {
        Self {
            repo,
            event_id,
            limit,
        }
    }
}

#[async_trait]
impl ImportStore<NewGuest> for GuestStore {
    fn resource(&self) -> &'static str {
        "guest"
    }

    fn limit(&self) -> i32 {
        self.limit
    }

    fn display_name<'a>(&self, row: &'a NewGuest) -> &'a str {
        &row.name
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        self.repo.count_by_event(self.event_id).await
    }

    async fn exists(&self, row: &NewGuest) -> Result<bool, sqlx::Error> {
        self.repo
            .exists_duplicate(
                self.event_id,
                &row.name,
                row.phone.as_deref(),
                row.email.as_deref(),
            )
            .await
    }

    async fn insert(&self, row: &NewGuest) -> Result<InsertOutcome, sqlx::Error> {
        match self.repo.create_guest(self.event_id, self.limit, row).await? {
            GuestInsertOutcome::Created(_) => Ok(InsertOutcome::Created),
            GuestInsertOutcome::LimitReached => Ok(InsertOutcome::LimitReached),
        }
    }
}

/// Expense-backed import store.
pub struct ExpenseStore {
    repo: ExpenseRepository,
    event_id: Uuid,
    limit: i32,
}

impl ExpenseStore {
    pub fn new(repo: ExpenseRepository, event_id: Uuid, limit: i32) -> Self {
        Self {
            repo,
            event_id,
            limit,
        }
    }
}

#[async_trait]
impl ImportStore<NewExpense> for ExpenseStore {
    fn resource(&self) -> &'static str {
        "expense"
    }

    fn limit(&self) -> i32 {
        self.limit
    }

    fn display_name<'a>(&self, row: &'a NewExpense) -> &'a str {
        &row.name
    }

    async fn count(&self) -> Result<i64, sqlx::Error> {
        self.repo.count_by_event(self.event_id).await
    }

    async fn exists(&self, row: &NewExpense) -> Result<bool, sqlx::Error> {
        self.repo.exists_by_name(self.event_id, &row.name).await
    }

    async fn insert(&self, row: &NewExpense) -> Result<InsertOutcome, sqlx::Error> {
        match self
            .repo
            .create_expense(self.event_id, self.limit, row)
            .await?
        {
            ExpenseInsertOutcome::Created(_) => Ok(InsertOutcome::Created),
            ExpenseInsertOutcome::LimitReached => Ok(InsertOutcome::LimitReached),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory store tracking call counts, seeded with existing names.
    struct MemoryStore {
        limit: i32,
        existing: Mutex<HashSet<String>>,
        fail_inserts_for: HashSet<String>,
        count_calls: AtomicUsize,
        exists_calls: AtomicUsize,
        insert_calls: AtomicUsize,
    }

    impl MemoryStore {
        fn new(limit: i32, existing: &[&str]) -> Self {
            Self {
                limit,
                existing: Mutex::new(existing.iter().map(|s| s.to_string()).collect()),
                fail_inserts_for: HashSet::new(),
                count_calls: AtomicUsize::new(0),
                exists_calls: AtomicUsize::new(0),
                insert_calls: AtomicUsize::new(0),
            }
        }

        fn failing_insert_for(mut self, name: &str) -> Self {
            self.fail_inserts_for.insert(name.to_string());
            self
        }
    }

    #[async_trait]
    impl ImportStore<NewGuest> for MemoryStore {
        fn resource(&self) -> &'static str {
            "guest"
        }

        fn limit(&self) -> i32 {
            self.limit
        }

        fn display_name<'a>(&self, row: &'a NewGuest) -> &'a str {
            &row.name
        }

        async fn count(&self) -> Result<i64, sqlx::Error> {
            self.count_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.existing.lock().unwrap().len() as i64)
        }

        async fn exists(&self, row: &NewGuest) -> Result<bool, sqlx::Error> {
            self.exists_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.existing.lock().unwrap().contains(&row.name))
        }

        async fn insert(&self, row: &NewGuest) -> Result<InsertOutcome, sqlx::Error> {
            self.insert_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_inserts_for.contains(&row.name) {
                return Err(sqlx::Error::WorkerCrashed);
            }
            let mut existing = self.existing.lock().unwrap();
            if self.limit > 0 && existing.len() as i64 >= self.limit as i64 {
                return Ok(InsertOutcome::LimitReached);
            }
            existing.insert(row.name.clone());
            Ok(InsertOutcome::Created)
        }
    }

    fn guest(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            ..NewGuest::default()
        }
    }

    fn ok_rows(names: &[&str]) -> Vec<(usize, Result<NewGuest, RowError>)> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| (i, Ok(guest(name))))
            .collect()
    }

    #[tokio::test]
    async fn test_imports_all_valid_rows() {
        let store = MemoryStore::new(0, &[]);
        let result = run_import(&store, ok_rows(&["Alice", "Bob", "Chan"]))
            .await
            .unwrap();

        assert_eq!(result.imported, 3);
        assert_eq!(result.skipped, 0);
        assert!(result.errors.is_empty());
        assert!(!result.limit_reached);
    }

    #[tokio::test]
    async fn test_duplicates_are_skipped_not_fatal() {
        let store = MemoryStore::new(0, &["Alice"]);
        let result = run_import(&store, ok_rows(&["Alice", "Bob"])).await.unwrap();

        assert_eq!(result.imported, 1);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors, vec!["Row 2: duplicate guest 'Alice'"]);
        assert!(!result.limit_reached);
    }

    #[tokio::test]
    async fn test_reimport_of_same_sheet_is_idempotent() {
        let store = MemoryStore::new(0, &[]);
        let first = run_import(&store, ok_rows(&["Alice", "Bob"])).await.unwrap();
        assert_eq!(first.imported, 2);

        let second = run_import(&store, ok_rows(&["Alice", "Bob"])).await.unwrap();
        assert_eq!(second.imported, 0);
        assert_eq!(second.skipped, 2);
    }

    #[tokio::test]
    async fn test_quota_stops_batch_with_summary() {
        // 3 existing, limit 5: two more fit, then the remaining 8 of 10 rows
        // are reported skipped in a single summary line.
        let store = MemoryStore::new(5, &["a", "b", "c"]);
        let names: Vec<String> = (0..10).map(|i| format!("Guest {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();

        let result = run_import(&store, ok_rows(&refs)).await.unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 8);
        assert!(result.limit_reached);
        assert_eq!(result.errors, vec!["Rows 4-11: guest limit reached"]);
    }

    #[tokio::test]
    async fn test_quota_reject_makes_no_further_store_calls() {
        let store = MemoryStore::new(5, &["a", "b", "c"]);
        let result = run_import(&store, ok_rows(&["d", "e", "f", "g"]))
            .await
            .unwrap();

        assert_eq!(result.imported, 2);
        assert!(result.limit_reached);
        // Rows 1-2 inserted, row 3's count check rejects, row 4 never touches
        // the store.
        assert_eq!(store.count_calls.load(Ordering::SeqCst), 3);
        assert_eq!(store.exists_calls.load(Ordering::SeqCst), 2);
        assert_eq!(store.insert_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_single_remaining_row_uses_singular_summary() {
        let store = MemoryStore::new(1, &["a"]);
        let result = run_import(&store, ok_rows(&["Bob"])).await.unwrap();

        assert_eq!(result.imported, 0);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors, vec!["Row 2: guest limit reached"]);
    }

    #[tokio::test]
    async fn test_insert_failure_skips_row_and_continues() {
        let store = MemoryStore::new(0, &[]).failing_insert_for("Bob");
        let result = run_import(&store, ok_rows(&["Alice", "Bob", "Chan"]))
            .await
            .unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.errors, vec!["Row 3: failed to save guest 'Bob'"]);
        assert!(!result.limit_reached);
    }

    #[tokio::test]
    async fn test_mapping_failures_carry_sheet_row_numbers() {
        let store = MemoryStore::new(0, &[]);
        let mapped = vec![
            (0, Ok(guest("Alice"))),
            (1, Err(RowError::missing_field(1, "Full Name"))),
            (2, Ok(guest("Chan"))),
        ];

        let result = run_import(&store, mapped).await.unwrap();

        assert_eq!(result.imported, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(
            result.errors,
            vec!["Row 3: missing required field 'Full Name'"]
        );
    }

    #[tokio::test]
    async fn test_empty_sheet_yields_empty_result() {
        let store = MemoryStore::new(0, &[]);
        let result = run_import(&store, Vec::new()).await.unwrap();

        assert_eq!(result.imported, 0);
        assert_eq!(result.skipped, 0);
        assert!(!result.limit_reached);
    }

    #[test]
    fn test_map_guest_rows_preserves_indexes() {
        let rows: Vec<RowMap> = vec![RowMap::new(), RowMap::new()];
        let mapped = map_guest_rows(&rows);
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped[0].0, 0);
        assert_eq!(mapped[1].0, 1);
        // Blank rows have no name, so both mappings fail.
        assert!(mapped.iter().all(|(_, r)| r.is_err()));
    }
}
