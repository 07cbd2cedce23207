use axum::Router;
use domain_catalog::PgItemRepository;
use domain_reviews::{PgReviewRepository, ReviewService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = ReviewService::new(
        PgReviewRepository::new(state.db.clone()),
        PgItemRepository::new(state.db.clone()),
    );
    handlers::router(service, state.auth.clone())
}
