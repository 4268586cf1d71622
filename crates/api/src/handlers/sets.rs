//! Handlers for an event's ordered sets.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::ordering::ReorderRequest;
use setlist_db::models::set::CreateEventSet;
use setlist_db::repositories::{EventRepo, SetRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/events/{event_id}/sets
pub async fn list(
    State(state): State<AppState>,
    ValidPath(event_id): ValidPath<DbId>,
) -> AppResult<impl IntoResponse> {
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;
    let sets = SetRepo::list_by_event(&state.pool, event_id).await?;
    Ok(Json(DataResponse { data: sets }))
}

/// POST /api/v1/events/{event_id}/sets
pub async fn create(
    State(state): State<AppState>,
    ValidPath(event_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<CreateEventSet>,
) -> AppResult<impl IntoResponse> {
    let set = SetRepo::create(&state.pool, event_id, &input).await?;
    tracing::info!(event_id, set_id = set.id, position = set.position, "Set added");
    Ok((StatusCode::CREATED, Json(DataResponse { data: set })))
}

/// PUT /api/v1/events/{event_id}/sets/reorder
pub async fn reorder(
    State(state): State<AppState>,
    ValidPath(event_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let sets = SetRepo::reorder(&state.pool, event_id, &input.child_ids).await?;
    tracing::info!(event_id, count = sets.len(), "Sets reordered");
    Ok(Json(DataResponse { data: sets }))
}

/// DELETE /api/v1/events/{event_id}/sets/{set_id}
///
/// Deletes the set together with its performances.
pub async fn delete(
    State(state): State<AppState>,
    ValidPath((event_id, set_id)): ValidPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let set = SetRepo::delete(&state.pool, event_id, set_id).await?;
    tracing::info!(event_id, set_id, "Set removed");
    Ok(Json(DataResponse { data: set }))
}
