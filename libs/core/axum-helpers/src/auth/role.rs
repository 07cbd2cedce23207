use crate::audit::{AuditEvent, AuditOutcome};
use crate::errors::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;

use super::jwt::JwtClaims;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    Buyer,
}

/// The caller's token did not carry the role an endpoint requires.
#[derive(Debug, Clone, thiserror::Error)]
#[error("You are not authorized to access this resource")]
pub struct RoleMismatch {
    pub required: Role,
    pub actual: Role,
}

impl From<RoleMismatch> for AppError {
    fn from(err: RoleMismatch) -> Self {
        AppError::Forbidden(err.to_string())
    }
}

/// Identity of an authenticated caller, taken from the claims that
/// [`jwt_auth_middleware`](super::jwt_auth_middleware) stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

impl AuthUser {
    /// Returns the account id when the caller has `role`.
    pub fn require(&self, role: Role) -> Result<Uuid, RoleMismatch> {
        if self.role == role {
            Ok(self.id)
        } else {
            AuditEvent::new(Some(self), "role.check", None, AuditOutcome::Denied)
                .with_details(serde_json::json!({ "required": role }))
                .log();
            Err(RoleMismatch {
                required: role,
                actual: self.role,
            })
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<JwtClaims>()
            .map(|claims| AuthUser {
                id: claims.sub,
                role: claims.role,
            })
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}
