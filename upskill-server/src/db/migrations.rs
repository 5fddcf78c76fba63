//! Schema creation, idempotent so it can run at every startup

use sqlx::PgPool;

use super::DbError;

const STATEMENTS: &[(&str, &str)] = &[
    (
        "usuarios",
        r#"
        CREATE TABLE IF NOT EXISTS usuarios (
            id BIGSERIAL PRIMARY KEY,
            nome VARCHAR(100) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            area_atuacao VARCHAR(100) NOT NULL DEFAULT '',
            nivel_carreira VARCHAR(50) NOT NULL DEFAULT '',
            data_cadastro TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    ),
    (
        "trilhas",
        r#"
        CREATE TABLE IF NOT EXISTS trilhas (
            id BIGSERIAL PRIMARY KEY,
            nome VARCHAR(150) NOT NULL,
            descricao TEXT NOT NULL DEFAULT '',
            nivel VARCHAR(20) NOT NULL
                CHECK (nivel IN ('INICIANTE', 'INTERMEDIARIO', 'AVANCADO')),
            carga_horaria INTEGER NOT NULL CHECK (carga_horaria > 0),
            foco_principal VARCHAR(100) NOT NULL DEFAULT ''
        )
        "#,
    ),
    (
        "competencias",
        r#"
        CREATE TABLE IF NOT EXISTS competencias (
            id BIGSERIAL PRIMARY KEY,
            nome VARCHAR(100) NOT NULL UNIQUE,
            categoria VARCHAR(50) NOT NULL DEFAULT '',
            descricao TEXT NOT NULL DEFAULT ''
        )
        "#,
    ),
    (
        "trilha_competencia",
        r#"
        CREATE TABLE IF NOT EXISTS trilha_competencia (
            trilha_id BIGINT NOT NULL REFERENCES trilhas(id) ON DELETE CASCADE,
            competencia_id BIGINT NOT NULL REFERENCES competencias(id) ON DELETE CASCADE,
            PRIMARY KEY (trilha_id, competencia_id)
        )
        "#,
    ),
    (
        "matriculas",
        r#"
        CREATE TABLE IF NOT EXISTS matriculas (
            id BIGSERIAL PRIMARY KEY,
            usuario_id BIGINT NOT NULL REFERENCES usuarios(id) ON DELETE CASCADE,
            trilha_id BIGINT NOT NULL REFERENCES trilhas(id) ON DELETE CASCADE,
            data_inscricao TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            status VARCHAR(20) NOT NULL DEFAULT 'ATIVA'
                CHECK (status IN ('ATIVA', 'CONCLUIDA', 'CANCELADA'))
        )
        "#,
    ),
    (
        "idx_matriculas_usuario",
        r#"
        CREATE INDEX IF NOT EXISTS idx_matriculas_usuario
            ON matriculas (usuario_id, data_inscricao DESC)
        "#,
    ),
];

/// Create every table and index that does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("running schema migrations");

    for (name, sql) in STATEMENTS {
        sqlx::query(*sql).execute(pool).await?;
        tracing::debug!(object = *name, "schema object ensured");
    }

    tracing::info!("schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_created_before_their_dependents() {
        let order: Vec<&str> = STATEMENTS.iter().map(|(name, _)| *name).collect();
        let pos = |n: &str| order.iter().position(|o| *o == n).unwrap();

        assert!(pos("usuarios") < pos("matriculas"));
        assert!(pos("trilhas") < pos("matriculas"));
        assert!(pos("trilhas") < pos("trilha_competencia"));
        assert!(pos("competencias") < pos("trilha_competencia"));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
