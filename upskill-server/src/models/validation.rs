//! Validation error types and field checks shared by request models

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Pragmatic email shape: one `@`, no whitespace, a dotted domain.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex")
});

/// Request shape failures, reported as 400 before reaching a service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Required field is missing or empty
    #[error("o campo '{field}' é obrigatório")]
    Empty { field: &'static str },

    #[error("o campo '{field}' deve ter no mínimo {min} caracteres")]
    TooShort { field: &'static str, min: usize },

    #[error("o campo '{field}' deve ter no máximo {max} caracteres")]
    TooLong { field: &'static str, max: usize },

    #[error("o campo '{field}' é inválido: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Value outside a fixed enumeration
    #[error("valor inválido para '{field}': '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    #[error("o campo '{field}' deve ser maior que zero")]
    NotPositive { field: &'static str },

    /// Path id that does not parse as an integer
    #[error("O ID deve ser um número inteiro.")]
    InvalidId,

    /// Same as `InvalidId`, for routes nested under a user
    #[error("O ID deve ser um número inteiro.")]
    InvalidUserId,

    /// Body could not be decoded as the expected JSON document
    #[error("{reason}")]
    Body { reason: String },
}

/// Check a required text field against `min..=max` characters.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }
    bounded_text(field, value, min, max)
}

pub(crate) fn bounded_text(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::TooShort { field, min });
    }
    if len > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

pub(crate) fn max_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    bounded_text(field, value, 0, max)
}

pub(crate) fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "formato de email inválido",
        });
    }
    Ok(())
}

/// Collapse the "empty means unchanged" convention of update requests.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
