use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, RoleMismatch};
use domain_catalog::CatalogError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Item {0} not found")]
    ItemNotFound(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type ReviewResult<T> = Result<T, ReviewError>;

impl From<ReviewError> for AppError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::ItemNotFound(_) => AppError::NotFound(err.to_string()),
            ReviewError::Validation(msg) => AppError::BadRequest(msg),
            ReviewError::Forbidden(e) => e.into(),
            ReviewError::Catalog(e) => e.into(),
            ReviewError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for ReviewError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
