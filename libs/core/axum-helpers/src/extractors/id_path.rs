use crate::errors::{ErrorCode, error_response};
use axum::{
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};

/// Positive integer id taken from the last path parameter.
///
/// Routes such as `/catalog/{kind}/{id}` carry two parameters; the id is
/// always the final one.
///
/// ```ignore
/// async fn get_item(IdPath(id): IdPath) -> String {
///     format!("item {id}")
/// }
/// ```
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        let raw = params.last().map(|(_, value)| value.as_str()).unwrap_or_default();

        match raw.parse::<i32>() {
            Ok(id) if id > 0 => Ok(IdPath(id)),
            _ => Err(error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid id: {}", raw),
                ErrorCode::InvalidId,
            )),
        }
    }
}
