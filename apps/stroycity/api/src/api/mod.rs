use axum::Router;

pub mod accounts;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod reviews;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Every sub-router has its state applied, so the result is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .merge(accounts::router(state)) // /auth/*, /sellers, /buyers, /admins
        .nest("/catalog", catalog::references_router(state))
        .nest("/items", catalog::items_router(state))
        .nest("/cart", orders::cart_router(state))
        .nest("/orders", orders::orders_router(state))
        .nest("/reviews", reviews::router(state))
}

/// `/ready` with a real database check, mergeable with the stateless app
/// router from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
