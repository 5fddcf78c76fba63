//! Route handlers organized by resource

pub mod enrollments;
pub mod health;
pub mod tracks;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Resource routes, mounted under the versioned base path.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(tracks::router())
        .merge(enrollments::router())
}
