//! Enrollment workflow
//!
//! Enrolling treats the referenced user and track as preconditions: a missing
//! one is a business-rule failure (422), not a lookup miss (404). Any other
//! store error passes through unchanged.

use std::sync::Arc;

use crate::db::{DbError, EnrollmentStore, TrackStore, UserStore};
use crate::error::{ServerError, ServerResult};
use crate::models::{Enrollment, NewEnrollment, Track, User};

#[derive(Clone)]
pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentStore>,
    users: Arc<dyn UserStore>,
    tracks: Arc<dyn TrackStore>,
}

/// Turn a lookup miss into a business-rule failure with `message`.
fn require<T>(found: Result<T, DbError>, message: impl FnOnce() -> String) -> ServerResult<T> {
    match found {
        Ok(value) => Ok(value),
        Err(e) if e.is_not_found() => {
            let message = message();
            tracing::warn!(%message, "enrollment precondition failed");
            Err(ServerError::BusinessRule(message))
        }
        Err(e) => Err(e.into()),
    }
}

impl EnrollmentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentStore>,
        users: Arc<dyn UserStore>,
        tracks: Arc<dyn TrackStore>,
    ) -> Self {
        Self {
            enrollments,
            users,
            tracks,
        }
    }

    async fn require_user(&self, user_id: i64) -> ServerResult<User> {
        require(self.users.find_by_id(user_id).await, || {
            format!("Usuário com ID {user_id} não encontrado.")
        })
    }

    async fn require_track(&self, track_id: i64) -> ServerResult<Track> {
        require(self.tracks.find_by_id(track_id).await, || {
            format!("Trilha com ID {track_id} não encontrada.")
        })
    }

    /// Enroll a user in a track. The new enrollment starts active.
    ///
    /// Enrolling twice in the same track is allowed.
    pub async fn enroll(&self, user_id: i64, track_id: i64) -> ServerResult<Enrollment> {
        self.require_user(user_id).await?;
        self.require_track(track_id).await?;

        let enrollment = self
            .enrollments
            .create(NewEnrollment::active(user_id, track_id))
            .await?;
        tracing::info!(
            enrollment_id = enrollment.id,
            user_id,
            track_id,
            "user enrolled"
        );
        Ok(enrollment)
    }

    /// Enrollments of an existing user, most recent first.
    pub async fn list_by_user(&self, user_id: i64) -> ServerResult<Vec<Enrollment>> {
        self.require_user(user_id).await?;
        Ok(self.enrollments.find_by_user(user_id).await?)
    }
}
