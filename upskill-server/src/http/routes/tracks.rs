//! Track endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::error::ServerResult;
use crate::http::extractors::{ValidId, ValidJson};
use crate::models::{CreateTrackRequest, TrackResponse, UpdateTrackRequest};
use crate::state::AppState;

/// GET /trilhas
async fn list_tracks(State(state): State<AppState>) -> ServerResult<Json<Vec<TrackResponse>>> {
    let tracks = state.tracks().find_all().await?;
    Ok(Json(tracks.into_iter().map(TrackResponse::from).collect()))
}

/// POST /trilhas
async fn create_track(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateTrackRequest>,
) -> ServerResult<(StatusCode, Json<TrackResponse>)> {
    let track = state.tracks().create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(track.into())))
}

/// GET /trilhas/{id}
async fn get_track(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> ServerResult<Json<TrackResponse>> {
    let track = state.tracks().find_by_id(id).await?;
    Ok(Json(track.into()))
}

/// PUT /trilhas/{id} - empty text and zero workload leave the field unchanged
async fn update_track(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<UpdateTrackRequest>,
) -> ServerResult<Json<TrackResponse>> {
    let track = state.tracks().update(id, req.validate()?).await?;
    Ok(Json(track.into()))
}

/// DELETE /trilhas/{id}
async fn delete_track(State(state): State<AppState>, ValidId(id): ValidId) -> ServerResult<StatusCode> {
    state.tracks().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Track routes. The collection also answers with a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/trilhas", get(list_tracks).post(create_track))
        .route("/trilhas/", get(list_tracks).post(create_track))
        .route(
            "/trilhas/{id}",
            get(get_track).put(update_track).delete(delete_track),
        )
}
