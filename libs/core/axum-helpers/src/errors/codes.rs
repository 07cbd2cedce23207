//! Error codes carried in every error body.
//!
//! Each code has a client-facing identifier (`as_str`), a numeric code for
//! logs and dashboards (`code`) and a default message.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::InsufficientStock.as_str(), "INSUFFICIENT_STOCK");
//! assert_eq!(ErrorCode::InsufficientStock.code(), 1101);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Numeric ranges:
/// - 1000-1099: request errors
/// - 1100-1199: business rule violations
/// - 2000-2999: storage errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    InternalError,
    Unauthorized,
    Forbidden,
    Conflict,
    BadRequest,
    InvalidId,
    ServiceUnavailable,
    MethodNotAllowed,

    /// Cart line asks for more units than are in stock
    InsufficientStock,
    /// Order placement attempted with an empty cart
    EmptyCart,

    DatabaseError,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::BadRequest => "BAD_REQUEST",
            Self::InvalidId => "INVALID_ID",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::EmptyCart => "EMPTY_CART",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageError => "STORAGE_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::BadRequest => 1009,
            Self::InvalidId => 1010,
            Self::ServiceUnavailable => 1011,
            Self::MethodNotAllowed => 1012,

            Self::InsufficientStock => 1101,
            Self::EmptyCart => 1102,

            Self::DatabaseError => 2003,
            Self::StorageError => 2101,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::BadRequest => "Bad request",
            Self::InvalidId => "Invalid numeric id",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InsufficientStock => "Not enough items in stock",
            Self::EmptyCart => "Cart is empty",
            Self::DatabaseError => "Database error occurred",
            Self::StorageError => "File storage error occurred",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
