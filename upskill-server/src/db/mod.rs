//! Database layer - connection pool, schema, seed data and entity stores
//!
//! - One `PgPool` per process, handed to each store at construction
//! - Stores sit behind per-entity traits so services can run on
//!   [`MemoryDatabase`] in tests
//! - Rely on DB constraints for uniqueness, translate violations to conflicts

pub mod error;
pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;
pub mod seed;

pub use error::DbError;
pub use memory::MemoryDatabase;
pub use pool::{close_pool, create_pool, create_pool_with_options};
pub use repos::{
    EnrollmentRepo, EnrollmentStore, TrackRepo, TrackStore, UserRepo, UserStore,
};
pub use seed::SeedReport;
pub use sqlx::PgPool;
