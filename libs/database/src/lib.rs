//! PostgreSQL connectivity for the stroycity services.
//!
//! - [`postgres`]: pool configuration, connection with retry, migrations, health checks
//! - [`common`]: shared error type and retry helpers
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "stroycity_api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
