//! Spreadsheet export endpoints.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::Response,
};
use domain::models::ExportKind;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::export::{expense_workbook, gift_workbook, guest_workbook};

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Build an xlsx attachment response.
pub(crate) fn xlsx_response(filename: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, HeaderValue::from_static(XLSX_CONTENT_TYPE))
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(axum::body::Body::from(bytes))
        .unwrap_or_else(|_| Response::new(axum::body::Body::empty()))
}

/// GET /api/v1/events/:event_id/export/:kind
///
/// Streams the event's guests, expenses or gifts as an xlsx attachment.
/// An event with no rows yields a header-only workbook.
pub async fn export_spreadsheet(
    State(state): State<AppState>,
    Path((event_id, kind)): Path<(Uuid, String)>,
) -> Result<Response, ApiError> {
    let kind: ExportKind = kind.parse().map_err(ApiError::Validation)?;

    state
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".into()))?;

    let bytes = match kind {
        ExportKind::Guest => {
            let rows = state.guests.export_rows(event_id).await?;
            guest_workbook(&rows)?
        }
        ExportKind::Expense => {
            let rows = state.expenses.export_rows(event_id).await?;
            expense_workbook(&rows)?
        }
        ExportKind::Gift => {
            let rows = state.gifts.export_rows(event_id).await?;
            gift_workbook(&rows)?
        }
    };

    tracing::info!(event_id = %event_id, kind = %kind, bytes = bytes.len(), "export built");

    Ok(xlsx_response(&format!("{}s_{}.xlsx", kind, event_id), bytes))
}
