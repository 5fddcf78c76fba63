//! HTTP server command
//!
//! Ensures the schema exists, then serves the API until Ctrl+C/SIGTERM.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use upskill_server::db::{close_pool, create_pool_with_options, migrations};
use upskill_server::{run_server, AppState, ServerConfig};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Database URL (overrides DB_HOST/DB_PORT/DB_USER/DB_PASSWORD/DB_NAME)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Connection pool size (default: DB_MAX_CONNECTIONS or 5)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db = super::database_config(args.database_url);
    let max_connections = args.max_connections.unwrap_or(db.max_connections);

    let pool = create_pool_with_options(&db.url(), max_connections)
        .await
        .context("Failed to connect to the database")?;
    migrations::run(&pool)
        .await
        .context("Failed to create the database schema")?;

    let config = ServerConfig {
        bind_addr: SocketAddr::new(args.host, args.port),
        cors_permissive: args.cors_permissive,
    };
    tracing::info!("Starting upskill server on {}", config.bind_addr);

    let served = run_server(AppState::postgres(pool.clone()), config)
        .await
        .context("Server error");
    close_pool(&pool).await;
    served
}
