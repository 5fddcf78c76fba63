//! Domain models with validation at construction
//!
//! Request bodies are validated into the `New*` / `*Changes` types before
//! any service sees them. Invalid input returns ValidationError, not panic.

pub mod competency;
pub mod enrollment;
pub mod track;
pub mod user;
pub mod validation;

pub use competency::{Competency, NewCompetency};
pub use enrollment::{EnrollRequest, Enrollment, EnrollmentStatus, NewEnrollment};
pub use track::{
    CreateTrackRequest, NewTrack, Track, TrackChanges, TrackLevel, TrackResponse,
    UpdateTrackRequest,
};
pub use user::{CreateUserRequest, NewUser, UpdateUserRequest, User, UserChanges, UserResponse};
pub use validation::ValidationError;
