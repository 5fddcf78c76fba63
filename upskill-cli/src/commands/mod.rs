//! Command implementations for the upskill CLI

pub mod serve;
pub mod setup;

pub use serve::run_serve;
pub use setup::run_setup;

use upskill_server::DatabaseConfig;

/// `DB_*` settings from the environment, with an explicit URL taking precedence.
fn database_config(database_url: Option<String>) -> DatabaseConfig {
    let mut config = DatabaseConfig::from_env();
    if database_url.is_some() {
        config.url_override = database_url;
    }
    config
}
