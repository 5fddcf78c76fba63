//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::db::{EnrollmentRepo, MemoryDatabase, TrackRepo, UserRepo};
use crate::services::{EnrollmentService, TrackService, UserService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    users: UserService,
    tracks: TrackService,
    enrollments: EnrollmentService,
}

impl AppState {
    pub fn new(users: UserService, tracks: TrackService, enrollments: EnrollmentService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                users,
                tracks,
                enrollments,
            }),
        }
    }

    /// Services backed by Postgres stores sharing one pool.
    pub fn postgres(pool: PgPool) -> Self {
        let users = Arc::new(UserRepo::new(pool.clone()));
        let tracks = Arc::new(TrackRepo::new(pool.clone()));
        let enrollments = Arc::new(EnrollmentRepo::new(pool));

        Self::new(
            UserService::new(users.clone()),
            TrackService::new(tracks.clone()),
            EnrollmentService::new(enrollments, users, tracks),
        )
    }

    /// Services backed by one fresh [`MemoryDatabase`].
    pub fn in_memory() -> Self {
        let db = Arc::new(MemoryDatabase::new());

        Self::new(
            UserService::new(db.clone()),
            TrackService::new(db.clone()),
            EnrollmentService::new(db.clone(), db.clone(), db),
        )
    }

    pub fn users(&self) -> &UserService {
        &self.inner.users
    }

    pub fn tracks(&self) -> &TrackService {
        &self.inner.tracks
    }

    pub fn enrollments(&self) -> &EnrollmentService {
        &self.inner.enrollments
    }
}
