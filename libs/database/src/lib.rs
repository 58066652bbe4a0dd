//! PostgreSQL plumbing shared by the ShareIt domain crates.
//!
//! # Features
//!
//! - `postgres` (default): SeaORM connector, health check, [`BaseRepository`]
//! - `config`: `core_config::FromEnv` for [`postgres::PostgresConfig`]
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<migration::Migrator>(&db, "shareit-server").await?;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod repository;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};

#[cfg(feature = "postgres")]
pub use repository::{BaseRepository, is_unique_violation};
