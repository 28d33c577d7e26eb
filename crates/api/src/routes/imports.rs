//! Spreadsheet import endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use domain::models::{Event, ImportKind, ImportResult};
use shared::spreadsheet::read_rows;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_rows_imported, record_rows_skipped};
use crate::routes::exports::xlsx_response;
use crate::services::export::{expense_template, guest_template};
use crate::services::import::{
    map_expense_rows, map_guest_rows, run_import, ExpenseStore, GuestStore,
};

/// POST /api/v1/events/:event_id/import/:kind
///
/// Accepts an xlsx payload, maps its rows, and imports them under the
/// event's plan quota. Always answers 200 with a per-row ledger when the
/// payload itself was readable; only unreadable payloads, bad parameters and
/// a missing event fail the call.
pub async fn import_spreadsheet(
    State(state): State<AppState>,
    Path((event_id, kind)): Path<(Uuid, String)>,
    body: Bytes,
) -> Result<Json<ImportResult>, ApiError> {
    let kind: ImportKind = kind.parse().map_err(ApiError::Validation)?;

    if body.is_empty() {
        return Err(ApiError::Validation("request body is empty".into()));
    }
    if body.len() > state.config.limits.max_upload_bytes {
        return Err(ApiError::Validation(format!(
            "upload is {} bytes, maximum is {}",
            body.len(),
            state.config.limits.max_upload_bytes
        )));
    }

    let event: Event = state
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".into()))?
        .into();

    let rows = read_rows(&body)?;
    if rows.len() > state.config.limits.max_import_rows {
        return Err(ApiError::Validation(format!(
            "sheet has {} data rows, maximum is {}",
            rows.len(),
            state.config.limits.max_import_rows
        )));
    }

    let result = match kind {
        ImportKind::Guest => {
            let store = GuestStore::new(state.guests.clone(), event_id, event.limit_guests);
            run_import(&store, map_guest_rows(&rows)).await?
        }
        ImportKind::Expense => {
            let store = ExpenseStore::new(state.expenses.clone(), event_id, event.limit_expenses);
            run_import(&store, map_expense_rows(&rows)).await?
        }
    };

    record_rows_imported(kind.as_str(), result.imported as u64);
    record_rows_skipped(kind.as_str(), result.skipped as u64);
    tracing::info!(
        event_id = %event_id,
        kind = %kind,
        imported = result.imported,
        skipped = result.skipped,
        limit_reached = result.limit_reached,
        "import completed"
    );

    Ok(Json(result))
}

/// GET /api/v1/import/:kind/template
///
/// Serves a downloadable xlsx template whose headers match what the
/// importer expects, with one example row.
pub async fn import_template(
    Path(kind): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let kind: ImportKind = kind.parse().map_err(ApiError::Validation)?;

    let bytes = match kind {
        ImportKind::Guest => guest_template()?,
        ImportKind::Expense => expense_template()?,
    };

    Ok(xlsx_response(
        &format!("{}_import_template.xlsx", kind),
        bytes,
    ))
}
