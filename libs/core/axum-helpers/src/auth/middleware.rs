use super::jwt::JwtAuth;
use crate::errors::AppError;
use axum::{
    Router,
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::{Next, from_fn_with_state},
    response::Response,
};

/// Returns the token of an `Authorization: Bearer <token>` header.
///
/// Anything other than exactly two space separated parts with the `Bearer`
/// scheme is treated as malformed.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}

/// Rejects requests without a valid bearer token with 401 and stores the
/// decoded [`JwtClaims`](super::JwtClaims) in the request extensions.
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or_else(|| {
        tracing::debug!("Missing or malformed Authorization header");
        AppError::Unauthorized("Missing or malformed Authorization header".to_string())
    })?;

    let claims = auth.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "JWT verification failed");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Puts every route registered so far on `router` behind [`jwt_auth_middleware`].
///
/// Routes added afterwards (or merged in from another router) stay public.
pub fn require_auth<S>(router: Router<S>, auth: JwtAuth) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(from_fn_with_state(auth, jwt_auth_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, JwtConfig, Role};
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;
    use uuid::Uuid;

    fn auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-with-32-chars!!").unwrap())
    }

    fn app(auth: JwtAuth) -> Router {
        let protected = Router::new().route(
            "/me",
            get(|user: AuthUser| async move { user.role.to_string() }),
        );
        require_auth(protected, auth).route("/public", get(|| async { "ok" }))
    }

    async fn status_with_header(value: Option<String>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri("/me");
        if let Some(value) = value {
            builder = builder.header(AUTHORIZATION, value);
        }
        app(auth())
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let token = auth().issue(Uuid::new_v4(), Role::Buyer).unwrap();
        assert_eq!(
            status_with_header(Some(format!("Bearer {token}"))).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_missing_and_malformed_headers_are_unauthorized() {
        let token = auth().issue(Uuid::new_v4(), Role::Buyer).unwrap();
        let cases = [
            None,
            Some(token.clone()),
            Some(format!("Basic {token}")),
            Some(format!("Bearer {token} extra")),
            Some("Bearer ".to_string()),
            Some("Bearer not-a-jwt".to_string()),
        ];

        for header in cases {
            assert_eq!(
                status_with_header(header.clone()).await,
                StatusCode::UNAUTHORIZED,
                "{header:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_routes_added_after_layer_stay_public() {
        let response = app(auth())
            .oneshot(
                HttpRequest::builder()
                    .uri("/public")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
