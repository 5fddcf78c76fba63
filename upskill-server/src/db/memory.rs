//! In-memory implementation of every entity store
//!
//! Backs tests and local runs without Postgres. Mirrors the relational schema
//! where it matters to callers: sequential ids, unique email, ordering, and
//! cascading deletes from users/tracks to enrollments.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::repos::{
    EnrollmentStore, TrackStore, UserStore, ENROLLMENT_RESOURCE, TRACK_RESOURCE, USER_RESOURCE,
};
use super::repos::users::DUPLICATE_EMAIL;
use super::DbError;
use crate::models::{Enrollment, NewEnrollment, NewTrack, NewUser, Track, User};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, User>,
    tracks: BTreeMap<i64, Track>,
    enrollments: BTreeMap<i64, Enrollment>,
    next_user_id: i64,
    next_track_id: i64,
    next_enrollment_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

/// One shared table set implementing [`UserStore`], [`TrackStore`] and
/// [`EnrollmentStore`].
#[derive(Default)]
pub struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A panic mid-write cannot leave a half-applied row, so poisoning is ignored.
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let mut t = self.tables();
        if t.users.values().any(|u| u.email == user.email) {
            return Err(DbError::Conflict {
                message: DUPLICATE_EMAIL.to_owned(),
            });
        }

        let id = next_id(&mut t.next_user_id);
        let stored = User {
            id,
            name: user.name,
            email: user.email,
            area: user.area,
            career_level: user.career_level,
            registered_at: Utc::now(),
        };
        t.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<User, DbError> {
        self.tables()
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found(USER_RESOURCE, id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        Ok(self.tables().users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> Result<(), DbError> {
        let mut t = self.tables();
        let stored = t
            .users
            .get_mut(&user.id)
            .ok_or_else(|| DbError::not_found(USER_RESOURCE, user.id))?;

        stored.name.clone_from(&user.name);
        stored.area.clone_from(&user.area);
        stored.career_level.clone_from(&user.career_level);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut t = self.tables();
        if t.users.remove(&id).is_none() {
            return Err(DbError::not_found(USER_RESOURCE, id));
        }
        t.enrollments.retain(|_, e| e.user_id != id);
        Ok(())
    }
}

#[async_trait]
impl TrackStore for MemoryDatabase {
    async fn create(&self, track: NewTrack) -> Result<Track, DbError> {
        let mut t = self.tables();
        let id = next_id(&mut t.next_track_id);
        let stored = Track {
            id,
            name: track.name,
            description: track.description,
            level: track.level,
            workload_hours: track.workload_hours,
            focus: track.focus,
        };
        t.tracks.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Track, DbError> {
        self.tables()
            .tracks
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found(TRACK_RESOURCE, id))
    }

    async fn find_all(&self) -> Result<Vec<Track>, DbError> {
        Ok(self.tables().tracks.values().cloned().collect())
    }

    async fn update(&self, track: &Track) -> Result<(), DbError> {
        let mut t = self.tables();
        let stored = t
            .tracks
            .get_mut(&track.id)
            .ok_or_else(|| DbError::not_found(TRACK_RESOURCE, track.id))?;
        *stored = track.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let mut t = self.tables();
        if t.tracks.remove(&id).is_none() {
            return Err(DbError::not_found(TRACK_RESOURCE, id));
        }
        t.enrollments.retain(|_, e| e.track_id != id);
        Ok(())
    }
}

#[async_trait]
impl EnrollmentStore for MemoryDatabase {
    async fn create(&self, enrollment: NewEnrollment) -> Result<Enrollment, DbError> {
        let mut t = self.tables();
        let id = next_id(&mut t.next_enrollment_id);
        let stored = Enrollment {
            id,
            user_id: enrollment.user_id,
            track_id: enrollment.track_id,
            enrolled_at: Utc::now(),
            status: enrollment.status,
        };
        t.enrollments.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Enrollment, DbError> {
        self.tables()
            .enrollments
            .get(&id)
            .cloned()
            .ok_or_else(|| DbError::not_found(ENROLLMENT_RESOURCE, id))
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, DbError> {
        Ok(self.tables().enrollments.values().cloned().collect())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>, DbError> {
        let mut found: Vec<Enrollment> = self
            .tables()
            .enrollments
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();

        found.sort_by(|a, b| {
            b.enrolled_at
                .cmp(&a.enrolled_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(found)
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DbError> {
        let mut t = self.tables();
        let stored = t
            .enrollments
            .get_mut(&enrollment.id)
            .ok_or_else(|| DbError::not_found(ENROLLMENT_RESOURCE, enrollment.id))?;
        stored.status = enrollment.status;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        self.tables()
            .enrollments
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DbError::not_found(ENROLLMENT_RESOURCE, id))
    }
}
