//! Handlers for an album's ordered tracks.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use setlist_core::error::CoreError;
use setlist_core::types::DbId;
use setlist_db::models::ordering::ReorderRequest;
use setlist_db::models::track::CreateAlbumTrack;
use setlist_db::repositories::{AlbumRepo, TrackRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{ValidJson, ValidPath};
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that an album exists, returning `NotFound` otherwise.
async fn ensure_album_exists(pool: &PgPool, album_id: DbId) -> AppResult<()> {
    AlbumRepo::find_by_id(pool, album_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Album",
            id: album_id,
        }))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/albums/{album_id}/tracks
pub async fn list(
    State(state): State<AppState>,
    ValidPath(album_id): ValidPath<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_album_exists(&state.pool, album_id).await?;
    let tracks = TrackRepo::list_by_album(&state.pool, album_id).await?;
    Ok(Json(DataResponse { data: tracks }))
}

/// POST /api/v1/albums/{album_id}/tracks
///
/// Add a song to the album, appending unless `position` is given.
pub async fn create(
    State(state): State<AppState>,
    ValidPath(album_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<CreateAlbumTrack>,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::create(&state.pool, album_id, &input).await?;

    tracing::info!(
        album_id,
        track_id = track.id,
        song_id = track.song_id,
        position = track.position,
        "Track added"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: track })))
}

/// PUT /api/v1/albums/{album_id}/tracks/reorder
pub async fn reorder(
    State(state): State<AppState>,
    ValidPath(album_id): ValidPath<DbId>,
    ValidJson(input): ValidJson<ReorderRequest>,
) -> AppResult<impl IntoResponse> {
    let tracks = TrackRepo::reorder(&state.pool, album_id, &input.child_ids).await?;
    tracing::info!(album_id, count = tracks.len(), "Tracks reordered");
    Ok(Json(DataResponse { data: tracks }))
}

/// DELETE /api/v1/albums/{album_id}/tracks/{track_id}
///
/// Returns the deleted track; later tracks move up one position.
pub async fn delete(
    State(state): State<AppState>,
    ValidPath((album_id, track_id)): ValidPath<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let track = TrackRepo::delete(&state.pool, album_id, track_id).await?;
    tracing::info!(album_id, track_id, position = track.position, "Track removed");
    Ok(Json(DataResponse { data: track }))
}
