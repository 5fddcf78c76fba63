//! User endpoints

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::error::ServerResult;
use crate::http::extractors::{ValidId, ValidJson};
use crate::models::{CreateUserRequest, UpdateUserRequest, UserResponse};
use crate::state::AppState;

/// GET /usuarios
async fn list_users(State(state): State<AppState>) -> ServerResult<Json<Vec<UserResponse>>> {
    let users = state.users().find_all().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// POST /usuarios
async fn create_user(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateUserRequest>,
) -> ServerResult<(StatusCode, Json<UserResponse>)> {
    let user = state.users().create(req.validate()?).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /usuarios/{id}
async fn get_user(
    State(state): State<AppState>,
    ValidId(id): ValidId,
) -> ServerResult<Json<UserResponse>> {
    let user = state.users().find_by_id(id).await?;
    Ok(Json(user.into()))
}

/// PUT /usuarios/{id}
async fn update_user(
    State(state): State<AppState>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> ServerResult<Json<UserResponse>> {
    let user = state.users().update(id, req.validate()?).await?;
    Ok(Json(user.into()))
}

/// DELETE /usuarios/{id}
async fn delete_user(State(state): State<AppState>, ValidId(id): ValidId) -> ServerResult<StatusCode> {
    state.users().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes. The collection also answers with a trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/usuarios", get(list_users).post(create_user))
        .route("/usuarios/", get(list_users).post(create_user))
        .route(
            "/usuarios/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
}
