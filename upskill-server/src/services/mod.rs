//! Services between the HTTP handlers and the entity stores
//!
//! Handlers validate request shape first; services receive `New*` and
//! `*Changes` values and return domain records or a [`ServerError`].
//!
//! [`ServerError`]: crate::error::ServerError

pub mod enrollments;
pub mod tracks;
pub mod users;

pub use enrollments::EnrollmentService;
pub use tracks::TrackService;
pub use users::UserService;
