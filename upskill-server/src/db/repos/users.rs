//! User repository (Postgres)
//!
//! - create: INSERT ... RETURNING; unique violation on email becomes Conflict
//! - update/delete: zero rows affected becomes NotFound

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use super::{UserStore, USER_RESOURCE};
use crate::db::DbError;
use crate::models::{NewUser, User};

const SELECT_USER: &str = r#"
    SELECT id, nome, email, area_atuacao, nivel_carreira, data_cadastro
    FROM usuarios
"#;

/// Message reported when the email unique constraint fires
pub const DUPLICATE_EMAIL: &str = "Email já cadastrado.";

pub struct UserRepo {
    pool: PgPool,
}

impl UserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("nome")?,
        email: row.try_get("email")?,
        area: row.try_get("area_atuacao")?,
        career_level: row.try_get("nivel_carreira")?,
        registered_at: row.try_get("data_cadastro")?,
    })
}

/// Map a unique-constraint violation to a conflict, anything else to Sqlx.
pub(crate) fn conflict_or(err: sqlx::Error, message: &str) -> DbError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => DbError::Conflict {
            message: message.to_owned(),
        },
        _ => DbError::Sqlx(err),
    }
}

#[async_trait]
impl UserStore for UserRepo {
    async fn create(&self, user: NewUser) -> Result<User, DbError> {
        let row = sqlx::query(
            r#"
            INSERT INTO usuarios (nome, email, area_atuacao, nivel_carreira, data_cadastro)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, data_cadastro
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.area)
        .bind(&user.career_level)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_or(e, DUPLICATE_EMAIL))?;

        Ok(User {
            id: row.try_get("id")?,
            name: user.name,
            email: user.email,
            area: user.area,
            career_level: user.career_level,
            registered_at: row.try_get("data_cadastro")?,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<User, DbError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found(USER_RESOURCE, id))?;

        Ok(user_from_row(&row)?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query(&format!("{SELECT_USER} WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row).transpose()?)
    }

    async fn find_all(&self) -> Result<Vec<User>, DbError> {
        let rows = sqlx::query(&format!("{SELECT_USER} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect::<Result<_, _>>()?)
    }

    async fn update(&self, user: &User) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET nome = $2, area_atuacao = $3, nivel_carreira = $4
            WHERE id = $1
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.area)
        .bind(&user.career_level)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(USER_RESOURCE, user.id));
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM usuarios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(USER_RESOURCE, id));
        }
        Ok(())
    }
}
