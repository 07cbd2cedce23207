use axum::Router;
use domain_accounts::{AccountService, PgAccountRepository, handlers};
use domain_catalog::PgItemRepository;

pub fn router(state: &crate::state::AppState) -> Router {
    let service = AccountService::new(
        PgAccountRepository::new(state.db.clone()),
        PgItemRepository::new(state.db.clone()),
        state.auth.clone(),
    );
    handlers::router(service, state.auth.clone())
}
