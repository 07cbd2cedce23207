use axum::Router;
use domain_catalog::{
    ItemService, PgItemRepository, PgReferenceRepository, ReferenceService, handlers,
};

pub fn references_router(state: &crate::state::AppState) -> Router {
    let service = ReferenceService::new(PgReferenceRepository::new(state.db.clone()));
    handlers::references::router(service, state.auth.clone())
}

pub fn items_router(state: &crate::state::AppState) -> Router {
    let service = ItemService::new(
        PgItemRepository::new(state.db.clone()),
        PgReferenceRepository::new(state.db.clone()),
        state.images.clone(),
    );
    handlers::items::router(service, state.auth.clone(), state.config.uploads.max_bytes)
}
