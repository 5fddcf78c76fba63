//! Enrollment: binds one user to one track with a status

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnrollmentStatus {
    #[serde(rename = "ATIVA")]
    Active,
    #[serde(rename = "CONCLUIDA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl EnrollmentStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Completed, Self::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ATIVA",
            Self::Completed => "CONCLUIDA",
            Self::Cancelled => "CANCELADA",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnrollmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidVariant {
                field: "status",
                value: s.to_owned(),
            })
    }
}

/// Stored enrollment record, serialized as-is in API responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    #[serde(rename = "usuario_id")]
    pub user_id: i64,
    #[serde(rename = "trilha_id")]
    pub track_id: i64,
    #[serde(rename = "data_inscricao")]
    pub enrolled_at: DateTime<Utc>,
    pub status: EnrollmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewEnrollment {
    pub user_id: i64,
    pub track_id: i64,
    pub status: EnrollmentStatus,
}

impl NewEnrollment {
    /// Every enrollment starts active.
    pub fn active(user_id: i64, track_id: i64) -> Self {
        Self {
            user_id,
            track_id,
            status: EnrollmentStatus::Active,
        }
    }
}

/// POST /matriculas body
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct EnrollRequest {
    #[serde(default, rename = "usuario_id")]
    pub user_id: i64,
    #[serde(default, rename = "trilha_id")]
    pub track_id: i64,
}

impl EnrollRequest {
    /// Returns `(user_id, track_id)` once both are positive.
    pub fn validate(self) -> Result<(i64, i64), ValidationError> {
        if self.user_id <= 0 {
            return Err(ValidationError::NotPositive { field: "usuario_id" });
        }
        if self.track_id <= 0 {
            return Err(ValidationError::NotPositive { field: "trilha_id" });
        }
        Ok((self.user_id, self.track_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_enrollment_is_active() {
        let new = NewEnrollment::active(1, 2);
        assert_eq!(new.status, EnrollmentStatus::Active);
    }

    #[test]
    fn enroll_request_requires_positive_ids() {
        assert_eq!(
            EnrollRequest { user_id: 1, track_id: 2 }.validate().unwrap(),
            (1, 2)
        );
        assert_eq!(
            EnrollRequest { user_id: 0, track_id: 2 }.validate().unwrap_err(),
            ValidationError::NotPositive { field: "usuario_id" }
        );
        assert_eq!(
            EnrollRequest { user_id: 1, track_id: -3 }.validate().unwrap_err(),
            ValidationError::NotPositive { field: "trilha_id" }
        );
    }

    #[test]
    fn missing_fields_deserialize_to_zero() {
        let req: EnrollRequest = serde_json::from_str(r#"{"usuario_id": 4}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn status_wire_format() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Active).unwrap(),
            "\"ATIVA\""
        );
        assert_eq!(
            "CANCELADA".parse::<EnrollmentStatus>().unwrap(),
            EnrollmentStatus::Cancelled
        );
    }
}
