//! Entity stores
//!
//! One narrow trait per entity, implemented by the Postgres repos in this
//! module and by [`MemoryDatabase`](crate::db::MemoryDatabase). Services only
//! see the traits.
//!
//! Every store follows the same contract:
//! - `find_by_id`, `update` and `delete` report a missing row as
//!   [`DbError::NotFound`]
//! - `find_all` returns rows in ascending id order; empty is not an error
//! - `create` returns the stored record with its assigned id

pub mod competencies;
pub mod enrollments;
pub mod tracks;
pub mod users;

use async_trait::async_trait;

use super::DbError;
use crate::models::{Enrollment, NewEnrollment, NewTrack, NewUser, Track, User};

pub use competencies::CompetencyRepo;
pub use enrollments::EnrollmentRepo;
pub use tracks::TrackRepo;
pub use users::UserRepo;

pub const USER_RESOURCE: &str = "Usuário";
pub const TRACK_RESOURCE: &str = "Trilha";
pub const ENROLLMENT_RESOURCE: &str = "Matrícula";

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user. A duplicate email yields [`DbError::Conflict`].
    async fn create(&self, user: NewUser) -> Result<User, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<User, DbError>;

    /// Absence is `Ok(None)`, not an error.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError>;

    async fn find_all(&self) -> Result<Vec<User>, DbError>;

    /// Replace the mutable fields of the row with `user.id`.
    async fn update(&self, user: &User) -> Result<(), DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

#[async_trait]
pub trait TrackStore: Send + Sync {
    async fn create(&self, track: NewTrack) -> Result<Track, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Track, DbError>;

    async fn find_all(&self) -> Result<Vec<Track>, DbError>;

    async fn update(&self, track: &Track) -> Result<(), DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;
}

#[async_trait]
pub trait EnrollmentStore: Send + Sync {
    /// Insert an enrollment stamped with the current time.
    async fn create(&self, enrollment: NewEnrollment) -> Result<Enrollment, DbError>;

    async fn find_by_id(&self, id: i64) -> Result<Enrollment, DbError>;

    async fn find_all(&self) -> Result<Vec<Enrollment>, DbError>;

    /// Enrollments of one user, most recent first.
    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>, DbError>;

    /// Only the status is mutable.
    async fn update(&self, enrollment: &Enrollment) -> Result<(), DbError>;

    async fn delete(&self, id: i64) -> Result<(), DbError>;
}
