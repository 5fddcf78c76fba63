//! Enrollment endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::error::ServerResult;
use crate::http::extractors::{ValidJson, ValidUserId};
use crate::models::{EnrollRequest, Enrollment};
use crate::state::AppState;

/// POST /matriculas - 422 when the user or track does not exist
async fn enroll(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<EnrollRequest>,
) -> ServerResult<(StatusCode, Json<Enrollment>)> {
    let (user_id, track_id) = req.validate()?;
    let enrollment = state.enrollments().enroll(user_id, track_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

/// GET /usuarios/{id}/matriculas - newest first
async fn list_user_enrollments(
    State(state): State<AppState>,
    ValidUserId(user_id): ValidUserId,
) -> ServerResult<Json<Vec<Enrollment>>> {
    Ok(Json(state.enrollments().list_by_user(user_id).await?))
}

/// Enrollment routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/matriculas", post(enroll))
        .route("/usuarios/{id}/matriculas", get(list_user_enrollments))
}
