//! Handlers for a set's ordered performances.
//!
//! Besides the shared insert/reorder/delete operations, performances can
//! move to another set and have their boolean flags toggled by name.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::ordering::ReorderRequest;
use setlist_db::models::performance::{CreatePerformance, MovePerformance, PerformanceFlagUpdate};
use setlist_db::repositories::{PerformanceRepo, SetRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Ordered collection
// ---------------------------------------------------------------------------

/// GET /api/v1/sets/{set_id}/performances
pub async fn list(
    State(state): State<AppState>,
    ValidPath(set_id): ValidPath<DbId>,
) -> AppResult<impl IntoResponse> {
    SetRepo::find_by_id(&state.pool, set_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Set",
            id: set_id,
        }))?;
    let performances = PerformanceRepo::list_by_set(&state.pool, set_id).await?;
    Ok(Json(DataResponse { data: performances }))
}

/// POST /api/v1/sets/{set_id}/performances
pub async fn create(
    State(state): State<AppState>,
    ValidPath(set_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<CreatePerformance>,
) -> AppResult<impl IntoResponse> {
    let performance = PerformanceRepo::create(&state.pool, set_id, &input).await?;

    tracing::info!(
        set_id,
        performance_id = performance.id,
        song_id = performance.song_id,
        position = performance.position,
        "Performance added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: performance })))
}

/// PUT /api/v1/sets/{set_id}/performances/reorder
pub async fn reorder(
    State(state): State<AppState>,
    ValidPath(set_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let performances = PerformanceRepo::reorder(&state.pool, set_id, &input.child_ids).await?;
    tracing::info!(set_id, count = performances.len(), "Performances reordered");
    Ok(Json(DataResponse { data: performances }))
}

/// PUT /api/v1/sets/{set_id}/performances/move
///
/// Move a performance out of this set into `target_parent_id` (which may
/// be the same set) at `target_position`.
pub async fn move_performance(
    State(state): State<AppState>,
    ValidPath(set_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<MovePerformance>,
) -> AppResult<impl IntoResponse> {
    let performance = PerformanceRepo::move_to(&state.pool, set_id, &input).await?;

    tracing::info!(
        performance_id = performance.id,
        from_set = set_id,
        to_set = performance.set_id,
        position = performance.position,
        "Performance moved"
    );

    Ok(Json(DataResponse { data: performance }))
}

/// DELETE /api/v1/sets/{set_id}/performances/{performance_id}
pub async fn delete(
    State(state): State<AppState>,
    ValidPath((set_id, performance_id)): ValidPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let performance = PerformanceRepo::delete(&state.pool, set_id, performance_id).await?;
    tracing::info!(set_id, performance_id, "Performance removed");
    Ok(Json(DataResponse { data: performance }))
}

// ---------------------------------------------------------------------------
// Quick update
// ---------------------------------------------------------------------------

/// PATCH /api/v1/sets/{set_id}/performances/{performance_id}
///
/// Toggle one boolean field, named by `field` (`segue`, `debut`, `tease`).
pub async fn update_flag(
    State(state): State<AppState>,
    ValidPath((set_id, performance_id)): ValidPath<(DbId, DbId)>,
    ValidJson(input): ValidJson<PerformanceFlagUpdate>,
) -> AppResult<impl IntoResponse> {
    let flag = input.field;
    let performance =
        PerformanceRepo::set_flag(&state.pool, set_id, performance_id, flag, input.value)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Performance",
                id: performance_id,
            }))?;

    tracing::info!(performance_id, %flag, value = input.value, "Performance flag updated");

    Ok(Json(DataResponse { data: performance }))
}
