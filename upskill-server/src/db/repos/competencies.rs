//! Competency repository (Postgres)
//!
//! Competencies have no API surface; the seeder is the only writer.

use sqlx::PgPool;

use crate::db::DbError;
use crate::models::{Competency, NewCompetency};

pub struct CompetencyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CompetencyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, competency: NewCompetency) -> Result<Competency, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO competencias (nome, categoria, descricao)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&competency.name)
        .bind(&competency.category)
        .bind(&competency.description)
        .fetch_one(self.pool)
        .await?;

        Ok(Competency {
            id,
            name: competency.name,
            category: competency.category,
            description: competency.description,
        })
    }

    /// Associate a competency with a track. Re-linking is a no-op.
    pub async fn link_track(&self, track_id: i64, competency_id: i64) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO trilha_competencia (trilha_id, competencia_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(track_id)
        .bind(competency_id)
        .execute(self.pool)
        .await?;
        Ok(())
    }
}
