use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, RoleMismatch};
use domain_catalog::CatalogError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Email '{0}' is already registered")]
    EmailTaken(String),

    #[error("Login '{0}' is already taken")]
    LoginTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Seller {0} not found")]
    SellerNotFound(Uuid),

    #[error("Buyer {0} not found")]
    BuyerNotFound(Uuid),

    #[error("Item {0} not found")]
    ItemNotFound(i32),

    #[error("Item {0} is not in favorites")]
    FavoriteNotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailTaken(_) | AccountError::LoginTaken(_) => {
                AppError::Conflict(err.to_string())
            }
            AccountError::InvalidCredentials => {
                AppError::Unauthorized("Invalid credentials".to_string())
            }
            AccountError::SellerNotFound(_)
            | AccountError::BuyerNotFound(_)
            | AccountError::ItemNotFound(_)
            | AccountError::FavoriteNotFound(_) => AppError::NotFound(err.to_string()),
            AccountError::Validation(msg) => AppError::BadRequest(msg),
            AccountError::Forbidden(e) => e.into(),
            AccountError::PasswordHash(msg) | AccountError::Token(msg) => {
                AppError::InternalServerError(msg)
            }
            AccountError::Catalog(e) => e.into(),
            AccountError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AccountError::EmailTaken("a@b.c".into()), StatusCode::CONFLICT),
            (AccountError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AccountError::FavoriteNotFound(3), StatusCode::NOT_FOUND),
            (AccountError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                AccountError::PasswordHash("salt".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
