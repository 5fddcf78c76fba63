//! upskill-server: HTTP backend for the upskilling platform
//!
//! Users, learning tracks and the enrollments linking them, exposed as JSON
//! under `/api/v1`. Request flow is handler → service → entity store, with
//! Postgres stores in production and [`db::MemoryDatabase`] in tests.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod services;
pub mod state;

pub use config::{DatabaseConfig, ServerConfig};
pub use error::{ErrorResponse, ServerError, ServerResult};
pub use http::{build_router, run_server};
pub use state::AppState;
