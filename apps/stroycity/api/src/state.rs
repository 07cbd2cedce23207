//! Shared application state.
//!
//! Cloned into every router builder; the connection pool and token issuer
//! are cheap handles.

use axum_helpers::JwtAuth;
use domain_catalog::LocalImageStore;

#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// PostgreSQL database connection pool
    pub db: database::postgres::DatabaseConnection,
    /// Signs and verifies bearer tokens
    pub auth: JwtAuth,
    /// Item image storage under `UPLOAD_DIR`
    pub images: LocalImageStore,
}
