use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode, RoleMismatch};
use domain_catalog::CatalogError;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Cart is empty")]
    EmptyCart,

    #[error("Not enough items in stock for item {item_id}: requested {requested}, available {available}")]
    InsufficientStock {
        item_id: i32,
        requested: i32,
        available: i32,
    },

    #[error("Item {0} not found")]
    ItemNotFound(i32),

    #[error("Item {0} is not in the cart")]
    CartItemNotFound(i32),

    #[error("Order {0} not found")]
    OrderNotFound(i32),

    #[error("Order {0} belongs to another buyer")]
    NotOwner(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Forbidden(#[from] RoleMismatch),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::EmptyCart => AppError::Rule {
                code: ErrorCode::EmptyCart,
                message: err.to_string(),
                details: None,
            },
            OrderError::InsufficientStock {
                item_id,
                requested,
                available,
            } => AppError::Rule {
                code: ErrorCode::InsufficientStock,
                message: err.to_string(),
                details: Some(serde_json::json!({
                    "item_id": item_id,
                    "requested": requested,
                    "available": available,
                })),
            },
            OrderError::ItemNotFound(_)
            | OrderError::CartItemNotFound(_)
            | OrderError::OrderNotFound(_) => AppError::NotFound(err.to_string()),
            OrderError::NotOwner(_) => AppError::Forbidden(err.to_string()),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Forbidden(e) => e.into(),
            OrderError::Catalog(e) => e.into(),
            OrderError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
