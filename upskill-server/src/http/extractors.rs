//! Custom Axum extractors
//!
//! All of them reject with [`ServerError::Validation`] so malformed input gets
//! the same `{message, details}` body as every other failure.

use axum::extract::{FromRequest, FromRequestParts, Json, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::error::ServerError;
use crate::models::ValidationError;

async fn path_id<S>(parts: &mut Parts, state: &S, invalid: ValidationError) -> Result<i64, ServerError>
where
    S: Send + Sync,
{
    match Path::<String>::from_request_parts(parts, state).await {
        Ok(Path(raw)) => raw.parse().map_err(|_| ServerError::Validation(invalid)),
        Err(_) => Err(ServerError::Validation(invalid)),
    }
}

/// Integer id from a `{id}` path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, ValidationError::InvalidId).await.map(Self)
    }
}

/// User id from the `{id}` segment of `/usuarios/{id}/...` sub-resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidUserId(pub i64);

impl<S> FromRequestParts<S> for ValidUserId
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        path_id(parts, state, ValidationError::InvalidUserId).await.map(Self)
    }
}

/// JSON body with decode failures reported as validation errors
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            ServerError::Validation(ValidationError::Body {
                reason: rejection.body_text(),
            })
        })?;
        Ok(Self(value))
    }
}
