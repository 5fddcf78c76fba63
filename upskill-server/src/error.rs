//! Error types for upskill-server
//!
//! Every failure a service can produce maps to one HTTP status. The response
//! body is always `{ "message": ..., "details": ... }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DbError;
use crate::models::ValidationError;

pub type ServerResult<T> = Result<T, ServerError>;

const INVALID_INPUT: &str = "Dados de entrada inválidos.";
const INVALID_ID: &str = "ID inválido.";
const INVALID_USER_ID: &str = "ID de Usuário inválido.";
const INTERNAL: &str = "Ocorreu um erro interno no servidor.";

#[derive(Error, Debug)]
pub enum ServerError {
    /// Malformed or out-of-range request (400)
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Resource lookup by id found nothing (404)
    #[error("{resource} não encontrado(a) com ID: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// Uniqueness violation, e.g. duplicate email (409)
    #[error("{0}")]
    Conflict(String),

    /// Cross-entity precondition failed (422)
    #[error("{0}")]
    BusinessRule(String),

    /// Unanticipated database failure (500)
    #[error("database error: {0}")]
    Storage(#[source] sqlx::Error),
}

/// JSON body for every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServerError {
    pub fn business_rule(message: impl Into<String>) -> Self {
        Self::BusinessRule(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short caller-facing summary
    pub fn message(&self) -> String {
        match self {
            Self::Validation(ValidationError::InvalidId) => INVALID_ID.to_owned(),
            Self::Validation(ValidationError::InvalidUserId) => INVALID_USER_ID.to_owned(),
            Self::Validation(_) => INVALID_INPUT.to_owned(),
            Self::NotFound { resource, .. } => format!("{resource} não encontrado(a)."),
            Self::Conflict(msg) | Self::BusinessRule(msg) => msg.clone(),
            Self::Storage(_) => INTERNAL.to_owned(),
        }
    }

    /// Longer explanation; withheld for storage failures.
    pub fn details(&self) -> Option<String> {
        match self {
            Self::Validation(e) => Some(e.to_string()),
            Self::Storage(_) => None,
            _ => Some(self.to_string()),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { message } => Self::Conflict(message),
            DbError::Sqlx(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let Self::Storage(e) = &self {
            tracing::error!(error = %e, "database error");
        }

        let body = ErrorResponse {
            message: self.message(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ServerError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_error_is_400() {
        let (status, body) = body_of(ValidationError::Empty { field: "nome" }.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, INVALID_INPUT);
        assert_eq!(body.details.as_deref(), Some("o campo 'nome' é obrigatório"));
    }

    #[tokio::test]
    async fn invalid_id_has_its_own_message() {
        let (status, body) = body_of(ValidationError::InvalidId.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, INVALID_ID);
    }

    #[tokio::test]
    async fn invalid_user_id_names_the_user() {
        let (status, body) = body_of(ValidationError::InvalidUserId.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, INVALID_USER_ID);
        assert_eq!(body.details.as_deref(), Some("O ID deve ser um número inteiro."));
    }

    #[tokio::test]
    async fn not_found_is_404_with_resource_and_id() {
        let (status, body) = body_of(DbError::not_found("Trilha", 3).into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "Trilha não encontrado(a).");
        assert_eq!(
            body.details.as_deref(),
            Some("Trilha não encontrado(a) com ID: 3")
        );
    }

    #[tokio::test]
    async fn conflict_is_409() {
        let err: ServerError = DbError::Conflict {
            message: "Email já cadastrado.".into(),
        }
        .into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.message, "Email já cadastrado.");
    }

    #[tokio::test]
    async fn business_rule_is_422() {
        let (status, _) = body_of(ServerError::business_rule("Usuário com ID 9 não encontrado.")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn storage_error_hides_details() {
        let err: ServerError = DbError::Sqlx(sqlx::Error::PoolTimedOut).into();
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, INTERNAL);
        assert!(body.details.is_none());
    }
}
