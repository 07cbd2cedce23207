use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body checked with [`Validate`] before the handler runs.
///
/// Malformed JSON keeps axum's rejection status; failed validation yields
/// 400 with per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct AddToCart {
///     item_id: i32,
///     #[validate(range(min = 1))]
///     quantity: i32,
/// }
///
/// async fn add(ValidatedJson(input): ValidatedJson<AddToCart>) { /* ... */ }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::from(e).into_response())?;

        data.validate()
            .map_err(|e| AppError::from(e).into_response())?;

        Ok(ValidatedJson(data))
    }
}
