use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, JwtAuth, Role, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ForbiddenResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use domain_catalog::ItemRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ReviewResult;
use crate::models::{CreateReview, ItemReviews, Review, ReviewQuery};
use crate::repository::ReviewRepository;
use crate::service::ReviewService;

pub const TAG: &str = "reviews";

#[derive(OpenApi)]
#[openapi(
    paths(list_reviews, create_review),
    components(
        schemas(Review, CreateReview, ItemReviews),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = TAG, description = "Buyer ratings and comments on items")
    )
)]
pub struct ApiDoc;

pub fn router<R, I>(service: ReviewService<R, I>, auth: JwtAuth) -> Router
where
    R: ReviewRepository + 'static,
    I: ItemRepository + 'static,
{
    let shared_service = Arc::new(service);

    let buyer = require_auth(Router::new().route("/", post(create_review)), auth);

    Router::new()
        .route("/", get(list_reviews))
        .merge(buyer)
        .with_state(shared_service)
}

/// Reviews of an item with the average rating
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(ReviewQuery),
    responses(
        (status = 200, description = "Item reviews, newest first", body = ItemReviews),
        (status = 400, description = "Missing or invalid item_id"),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_reviews<R: ReviewRepository, I: ItemRepository>(
    State(service): State<Arc<ReviewService<R, I>>>,
    Query(query): Query<ReviewQuery>,
) -> ReviewResult<Json<ItemReviews>> {
    Ok(Json(service.item_reviews(query.item_id).await?))
}

/// Review an item (buyer)
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateReview,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Review created", body = Review),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_review<R: ReviewRepository, I: ItemRepository>(
    State(service): State<Arc<ReviewService<R, I>>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateReview>,
) -> ReviewResult<impl IntoResponse> {
    let buyer_id = user.require(Role::Buyer)?;
    let review = service.create_review(buyer_id, input).await?;

    AuditEvent::new(
        Some(&user),
        "review.create",
        Some(format!("item:{}", review.item_id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(serde_json::json!({ "review_id": review.id, "rating": review.rating }))
    .log();

    Ok((StatusCode::CREATED, Json(review)))
}
