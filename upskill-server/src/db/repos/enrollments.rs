//! Enrollment repository (Postgres)
//!
//! No uniqueness on (usuario_id, trilha_id): the same user may hold several
//! enrollments in one track.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{EnrollmentStore, ENROLLMENT_RESOURCE};
use crate::db::DbError;
use crate::models::{Enrollment, EnrollmentStatus, NewEnrollment};

const SELECT_ENROLLMENT: &str = r#"
    SELECT id, usuario_id, trilha_id, data_inscricao, status
    FROM matriculas
"#;

pub struct EnrollmentRepo {
    pool: PgPool,
}

impl EnrollmentRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn enrollment_from_row(row: &PgRow) -> Result<Enrollment, sqlx::Error> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<EnrollmentStatus>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Enrollment {
        id: row.try_get("id")?,
        user_id: row.try_get("usuario_id")?,
        track_id: row.try_get("trilha_id")?,
        enrolled_at: row.try_get("data_inscricao")?,
        status,
    })
}

#[async_trait]
impl EnrollmentStore for EnrollmentRepo {
    async fn create(&self, enrollment: NewEnrollment) -> Result<Enrollment, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO matriculas (usuario_id, trilha_id, data_inscricao, status)
            VALUES ($1, $2, $3, $4)
            RETURNING id, data_inscricao
            "#,
        )
        .bind(enrollment.user_id)
        .bind(enrollment.track_id)
        .bind(Utc::now())
        .bind(enrollment.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(Enrollment {
            id: row.try_get("id")?,
            user_id: enrollment.user_id,
            track_id: enrollment.track_id,
            enrolled_at: row.try_get("data_inscricao")?,
            status: enrollment.status,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Enrollment, DbError> {
        let row = sqlx::query(&format!("{SELECT_ENROLLMENT} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(ENROLLMENT_RESOURCE, id))?;

        Ok(enrollment_from_row(&row)?)
    }

    async fn find_all(&self) -> Result<Vec<Enrollment>, DbError> {
        let rows = sqlx::query(&format!("{SELECT_ENROLLMENT} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(enrollment_from_row).collect::<Result<_, _>>()?)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Vec<Enrollment>, DbError> {
        let rows = sqlx::query(&format!(
            "{SELECT_ENROLLMENT} WHERE usuario_id = $1 ORDER BY data_inscricao DESC, id DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(enrollment_from_row).collect::<Result<_, _>>()?)
    }

    async fn update(&self, enrollment: &Enrollment) -> Result<(), DbError> {
        let result = sqlx::query("UPDATE matriculas SET status = $2 WHERE id = $1")
            .bind(enrollment.id)
            .bind(enrollment.status.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENROLLMENT_RESOURCE, enrollment.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM matriculas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENROLLMENT_RESOURCE, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::{TrackRepo, TrackStore, UserRepo, UserStore};
    use crate::db::{create_pool, migrations};
    use crate::models::{NewTrack, NewUser, TrackLevel};

    #[tokio::test]
    #[ignore = "requires database"]
    async fn find_by_user_is_newest_first() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");
        migrations::run(&pool).await.expect("migrations failed");

        let user = UserRepo::new(pool.clone())
            .create(NewUser {
                name: "Ana".into(),
                email: format!("ana-{}@example.com", Utc::now().timestamp_micros()),
                area: String::new(),
                career_level: String::new(),
            })
            .await
            .unwrap();
        let track = TrackRepo::new(pool.clone())
            .create(NewTrack {
                name: "Dados 101".into(),
                description: String::new(),
                level: TrackLevel::Beginner,
                workload_hours: 10,
                focus: String::new(),
            })
            .await
            .unwrap();

        let repo = EnrollmentRepo::new(pool);
        let first = repo.create(NewEnrollment::active(user.id, track.id)).await.unwrap();
        let second = repo.create(NewEnrollment::active(user.id, track.id)).await.unwrap();

        let listed = repo.find_by_user(user.id).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
