//! Store-level error type

/// Failure raised by an entity store.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} não encontrado(a) com ID: {id}")]
    NotFound { resource: &'static str, id: i64 },

    /// Uniqueness constraint violated
    #[error("{message}")]
    Conflict { message: String },
}

impl DbError {
    pub fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display_names_resource_and_id() {
        let err = DbError::not_found("Trilha", 42);
        assert_eq!(err.to_string(), "Trilha não encontrado(a) com ID: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn sqlx_errors_are_not_not_found() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_not_found());
    }
}
