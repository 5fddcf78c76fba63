//! Track repository (Postgres)

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{TrackStore, TRACK_RESOURCE};
use crate::db::DbError;
use crate::models::{NewTrack, Track, TrackLevel};

const SELECT_TRACK: &str = r#"
    SELECT id, nome, descricao, nivel, carga_horaria, foco_principal
    FROM trilhas
"#;

pub struct TrackRepo {
    pool: PgPool,
}

impl TrackRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn track_from_row(row: &PgRow) -> Result<Track, sqlx::Error> {
    let level: String = row.try_get("nivel")?;
    let level = level
        .parse::<TrackLevel>()
        .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(Track {
        id: row.try_get("id")?,
        name: row.try_get("nome")?,
        description: row.try_get("descricao")?,
        level,
        workload_hours: row.try_get("carga_horaria")?,
        focus: row.try_get("foco_principal")?,
    })
}

#[async_trait]
impl TrackStore for TrackRepo {
    async fn create(&self, track: NewTrack) -> Result<Track, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO trilhas (nome, descricao, nivel, carga_horaria, foco_principal)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&track.name)
        .bind(&track.description)
        .bind(track.level.as_str())
        .bind(track.workload_hours)
        .bind(&track.focus)
        .fetch_one(&self.pool)
        .await?;

        Ok(Track {
            id,
            name: track.name,
            description: track.description,
            level: track.level,
            workload_hours: track.workload_hours,
            focus: track.focus,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Track, DbError> {
        let row = sqlx::query(&format!("{SELECT_TRACK} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(TRACK_RESOURCE, id))?;

        Ok(track_from_row(&row)?)
    }

    async fn find_all(&self) -> Result<Vec<Track>, DbError> {
        let rows = sqlx::query(&format!("{SELECT_TRACK} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(track_from_row).collect::<Result<_, _>>()?)
    }

    async fn update(&self, track: &Track) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE trilhas
            SET nome = $2, descricao = $3, nivel = $4, carga_horaria = $5, foco_principal = $6
            WHERE id = $1
            "#,
        )
        .bind(track.id)
        .bind(&track.name)
        .bind(&track.description)
        .bind(track.level.as_str())
        .bind(track.workload_hours)
        .bind(&track.focus)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(TRACK_RESOURCE, track.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM trilhas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(TRACK_RESOURCE, id));
        }
        Ok(())
    }
}
