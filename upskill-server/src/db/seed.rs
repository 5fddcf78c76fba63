//! Reference data for a fresh database
//!
//! Each table is seeded only while it is empty. A row that fails to insert is
//! logged and skipped; the rest of the seed carries on.

use chrono::{DateTime, Duration, Months, Utc};
use sqlx::PgPool;

use super::repos::{CompetencyRepo, TrackRepo, TrackStore, UserRepo, UserStore};
use super::DbError;
use crate::models::{EnrollmentStatus, NewCompetency, NewTrack, NewUser, TrackLevel};

/// Rows inserted per table by one seed run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub tracks: usize,
    pub competencies: usize,
    pub track_competencies: usize,
    pub enrollments: usize,
}

fn seed_users() -> Vec<NewUser> {
    [
        ("Ana Silva", "ana.silva@exemplo.com", "TI", "Pleno"),
        ("Bruno Costa", "bruno.costa@exemplo.com", "Finanças", "Em transição"),
        ("Carla Souza", "carla.souza@exemplo.com", "Marketing", "Junior"),
        ("Daniel Pereira", "daniel.pereira@exemplo.com", "Recursos Humanos", "Senior"),
    ]
    .into_iter()
    .map(|(name, email, area, level)| NewUser {
        name: name.into(),
        email: email.into(),
        area: area.into(),
        career_level: level.into(),
    })
    .collect()
}

fn seed_tracks() -> Vec<NewTrack> {
    vec![
        NewTrack {
            name: "Inteligência Artificial para Negócios".into(),
            description: "Trilha focada em aplicação de IA em processos empresariais.".into(),
            level: TrackLevel::Advanced,
            workload_hours: 80,
            focus: "IA".into(),
        },
        NewTrack {
            name: "Análise de Dados com Python".into(),
            description: "Fundamentos e práticas de Data Science.".into(),
            level: TrackLevel::Intermediate,
            workload_hours: 60,
            focus: "Dados".into(),
        },
        NewTrack {
            name: "Comunicação e Liderança Remota".into(),
            description: "Desenvolvimento de soft skills essenciais para o trabalho híbrido."
                .into(),
            level: TrackLevel::Beginner,
            workload_hours: 40,
            focus: "Soft Skills".into(),
        },
    ]
}

fn seed_competencies() -> Vec<NewCompetency> {
    [
        (
            "Machine Learning",
            "Tecnologia",
            "Capacidade de desenvolver modelos de aprendizado de máquina.",
        ),
        (
            "Pensamento Crítico",
            "Humana",
            "Habilidade de analisar informações de forma objetiva.",
        ),
        (
            "Gestão de Projetos Ágeis",
            "Gestão",
            "Conhecimento em metodologias ágeis como Scrum e Kanban.",
        ),
    ]
    .into_iter()
    .map(|(name, category, description)| NewCompetency {
        name: name.into(),
        category: category.into(),
        description: description.into(),
    })
    .collect()
}

/// Backdated enrollment times: (user index, track index, enrolled at).
fn seed_enrollment_plan(now: DateTime<Utc>) -> Vec<(usize, usize, DateTime<Utc>)> {
    let month_ago = now.checked_sub_months(Months::new(1)).unwrap_or(now);
    vec![(0, 0, month_ago), (1, 1, now - Duration::days(5))]
}

async fn is_empty(pool: &PgPool, table: &str) -> Result<bool, DbError> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    if count > 0 {
        tracing::info!(table, count, "table already has data, skipping seed");
    }
    Ok(count == 0)
}

async fn id_by(pool: &PgPool, sql: &str, key: &str) -> Result<Option<i64>, DbError> {
    Ok(sqlx::query_scalar::<_, i64>(sql).bind(key).fetch_optional(pool).await?)
}

/// Populate empty tables with the platform's reference data.
pub async fn run(pool: &PgPool) -> Result<SeedReport, DbError> {
    let mut report = SeedReport::default();
    let users = seed_users();
    let tracks = seed_tracks();
    let competencies = seed_competencies();

    if is_empty(pool, "usuarios").await? {
        let repo = UserRepo::new(pool.clone());
        for user in users.iter().cloned() {
            let name = user.name.clone();
            match repo.create(user).await {
                Ok(_) => report.users += 1,
                Err(e) => tracing::warn!(user = %name, error = %e, "failed to seed user"),
            }
        }
    }

    if is_empty(pool, "trilhas").await? {
        let repo = TrackRepo::new(pool.clone());
        for track in tracks.iter().cloned() {
            let name = track.name.clone();
            match repo.create(track).await {
                Ok(_) => report.tracks += 1,
                Err(e) => tracing::warn!(track = %name, error = %e, "failed to seed track"),
            }
        }
    }

    let competency_repo = CompetencyRepo::new(pool);
    if is_empty(pool, "competencias").await? {
        for competency in competencies.iter().cloned() {
            let name = competency.name.clone();
            match competency_repo.create(competency).await {
                Ok(_) => report.competencies += 1,
                Err(e) => tracing::warn!(competency = %name, error = %e, "failed to seed competency"),
            }
        }
    }

    // Track i is linked to competency i.
    if is_empty(pool, "trilha_competencia").await? {
        for (track, competency) in tracks.iter().zip(&competencies) {
            let track_id = id_by(pool, "SELECT id FROM trilhas WHERE nome = $1", &track.name).await?;
            let competency_id =
                id_by(pool, "SELECT id FROM competencias WHERE nome = $1", &competency.name)
                    .await?;

            if let (Some(t), Some(c)) = (track_id, competency_id) {
                match competency_repo.link_track(t, c).await {
                    Ok(()) => report.track_competencies += 1,
                    Err(e) => tracing::warn!(track_id = t, competency_id = c, error = %e, "failed to link competency"),
                }
            }
        }
    }

    if is_empty(pool, "matriculas").await? {
        for (user_idx, track_idx, enrolled_at) in seed_enrollment_plan(Utc::now()) {
            let (Some(user), Some(track)) = (users.get(user_idx), tracks.get(track_idx)) else {
                continue;
            };
            let user_id = id_by(pool, "SELECT id FROM usuarios WHERE email = $1", &user.email).await?;
            let track_id = id_by(pool, "SELECT id FROM trilhas WHERE nome = $1", &track.name).await?;

            let (Some(u), Some(t)) = (user_id, track_id) else {
                continue;
            };
            let inserted = sqlx::query(
                r#"
                INSERT INTO matriculas (usuario_id, trilha_id, data_inscricao, status)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(u)
            .bind(t)
            .bind(enrolled_at)
            .bind(EnrollmentStatus::Active.as_str())
            .execute(pool)
            .await;

            match inserted {
                Ok(_) => report.enrollments += 1,
                Err(e) => tracing::warn!(user_id = u, track_id = t, error = %e, "failed to seed enrollment"),
            }
        }
    }

    tracing::info!(?report, "seed complete");
    Ok(report)
}
