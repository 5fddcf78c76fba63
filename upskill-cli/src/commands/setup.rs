//! Database setup command: schema plus reference data.

use anyhow::{Context, Result};
use clap::Parser;
use upskill_server::db::{close_pool, create_pool_with_options, migrations, seed, PgPool};

#[derive(Parser, Debug)]
pub struct SetupArgs {
    /// Database URL (overrides DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_NAME)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Create the schema only, without reference data
    #[arg(long)]
    pub skip_seed: bool,
}

async fn prepare(pool: &PgPool, skip_seed: bool) -> Result<()> {
    migrations::run(pool)
        .await
        .context("Failed to create the database schema")?;
    if skip_seed {
        tracing::info!("Skipping reference data");
        return Ok(());
    }

    let report = seed::run(pool)
        .await
        .context("Failed to seed reference data")?;
    println!(
        "Seeded {} users, {} tracks, {} competencies, {} track links, {} enrollments",
        report.users,
        report.tracks,
        report.competencies,
        report.track_competencies,
        report.enrollments
    );
    Ok(())
}

pub async fn run_setup(args: SetupArgs) -> Result<()> {
    let db = super::database_config(args.database_url);
    let pool = create_pool_with_options(&db.url(), db.max_connections)
        .await
        .context("Failed to connect to the database")?;

    let result = prepare(&pool, args.skip_seed).await;
    close_pool(&pool).await;
    result
}
