//! upskill CLI - runs the upskilling platform backend
//!
//! - `serve`: HTTP API over Postgres (schema is ensured at startup)
//! - `setup`: schema creation and reference-data seeding

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "upskill",
    author,
    version,
    about = "Backend for the upskilling platform: users, learning tracks and enrollments"
)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the database schema and load reference data
    Setup(commands::setup::SetupArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values feed clap's `env` fallbacks.
    let env_file = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;
    match env_file {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => tracing::debug!("no .env file found"),
        Err(e) => tracing::warn!(error = %e, "failed to load .env"),
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await,
        Commands::Setup(args) => commands::run_setup(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
