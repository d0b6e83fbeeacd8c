//! # Rolodex DB
//!
//! Persistence plumbing for the Rolodex API, on PostgreSQL through SQLx.
//!
//! - [`init_db_pool`] / [`MIGRATOR`]: pool construction and embedded migrations
//! - [`unit_of_work`]: one transaction (or read-only session) per request
//! - [`repository`]: generic filtered CRUD over any [`Entity`]
//! - [`filter`]: bound-parameter filter predicates and change sets
//!
//! # Example
//!
//! ```ignore
//! use rolodex_db::{Filter, Repository, UnitOfWork};
//!
//! let mut uow = UnitOfWork::begin(&pool).await?;
//! let contacts = Repository::<Contact>::get_all(
//!     &mut uow,
//!     &[Filter::eq("user_id", user_id)],
//!     Some(&page),
//! )
//! .await?;
//! uow.commit().await?;
//! ```

pub mod error;
pub mod filter;
pub mod repository;
pub mod unit_of_work;

use std::time::Duration;

use rolodex_config::DatabaseConfig;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

pub use error::map_db_error;
pub use filter::{Changes, Filter, SqlValue};
pub use repository::{Entity, Repository};
pub use sqlx::PgPool;
pub use unit_of_work::UnitOfWork;

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Builds the shared connection pool.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await
}

/// Applies any pending migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
