//! Bearer-token authentication and role checks.
//!
//! Tokens are stateless HS256 JWTs carrying the account id and its [`Role`].
//! [`jwt_auth_middleware`] guards a router and stores the decoded
//! [`JwtClaims`] in the request extensions; handlers take an [`AuthUser`]
//! and call [`AuthUser::require`] before privileged work.
//!
//! ```ignore
//! use axum_helpers::auth::{AuthUser, JwtAuth, JwtConfig, Role, require_auth};
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! async fn me(user: AuthUser) -> Result<String, AppError> {
//!     let seller_id = user.require(Role::Seller)?;
//!     Ok(seller_id.to_string())
//! }
//!
//! let protected = require_auth(Router::new().route("/sellers/me", get(me)), auth);
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod role;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, require_auth};
pub use role::{AuthUser, Role, RoleMismatch};
