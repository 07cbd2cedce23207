//! # Axum Helpers
//!
//! Shared building blocks for the stroycity HTTP services.
//!
//! - **[`auth`]**: bearer JWTs carrying account id and role, role checks
//! - **[`server`]**: router assembly with API docs, health checks, graceful shutdown
//! - **[`http`]**: CORS and security header layers
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: validated JSON, UUID and integer path parameters
//! - **[`audit`]**: structured audit events

pub mod audit;
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    AuthUser, JwtAuth, JwtClaims, JwtConfig, Role, RoleMismatch, jwt_auth_middleware, require_auth,
};

pub use server::{
    HealthCheckFuture, HealthResponse, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::{CorsConfig, create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{IdPath, UuidPath, ValidatedJson};

pub use audit::{AuditEvent, AuditOutcome, extract_ip_from_headers, extract_user_agent};
