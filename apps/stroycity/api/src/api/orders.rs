use axum::Router;
use domain_catalog::PgItemRepository;
use domain_orders::{CartService, OrderService, PgCartRepository, PgOrderRepository, handlers};

pub fn cart_router(state: &crate::state::AppState) -> Router {
    let service = CartService::new(
        PgCartRepository::new(state.db.clone()),
        PgItemRepository::new(state.db.clone()),
    );
    handlers::cart::router(service, state.auth.clone())
}

pub fn orders_router(state: &crate::state::AppState) -> Router {
    let service = OrderService::new(
        PgCartRepository::new(state.db.clone()),
        PgOrderRepository::new(state.db.clone()),
        PgItemRepository::new(state.db.clone()),
    );
    handlers::orders::router(service, state.auth.clone())
}
