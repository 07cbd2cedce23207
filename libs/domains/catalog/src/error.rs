use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, RoleMismatch};
use sea_orm::DbErr;
use thiserror::Error;

use crate::models::ReferenceKind;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Unknown catalog kind '{0}'")]
    UnknownKind(String),

    #[error("{} {id} not found", .kind.singular())]
    ReferenceNotFound { kind: ReferenceKind, id: i32 },

    #[error("{} {id} is still used by items", .kind.singular())]
    ReferenceInUse { kind: ReferenceKind, id: i32 },

    #[error("Item {0} not found")]
    ItemNotFound(i32),

    #[error("Item {0} belongs to another seller")]
    NotOwner(i32),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),

    #[error("Image storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::UnknownKind(_)
            | CatalogError::ReferenceNotFound { .. }
            | CatalogError::ItemNotFound(_) => AppError::NotFound(err.to_string()),
            CatalogError::ReferenceInUse { .. } => AppError::Conflict(err.to_string()),
            CatalogError::NotOwner(_) => AppError::Forbidden(err.to_string()),
            CatalogError::InvalidImage(_) => AppError::BadRequest(err.to_string()),
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Forbidden(e) => e.into(),
            CatalogError::Storage(e) => AppError::Io(e),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
