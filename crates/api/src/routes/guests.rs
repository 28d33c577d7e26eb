//! Guest management endpoints.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{CascadeDeleteResponse, DeleteGuestsRequest};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_guests_deleted;
use crate::services::delete;

/// DELETE /api/v1/events/:event_id/guests
///
/// Atomically deletes the given guests and their dependent rows (tag
/// associations, group memberships, gifts). Ids outside the event are
/// ignored; if none of the ids matched, the call fails with 404 and nothing
/// is deleted.
pub async fn delete_guests(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    Json(request): Json<DeleteGuestsRequest>,
) -> Result<Json<CascadeDeleteResponse>, ApiError> {
    request.validate()?;

    state
        .events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Event not found".into()))?;

    let response = delete::delete_guests(&state.guests, event_id, &request.ids).await?;

    record_guests_deleted(response.deleted_guests);
    tracing::info!(
        event_id = %event_id,
        deleted_guests = response.deleted_guests,
        "guests deleted"
    );

    Ok(Json(response))
}
