use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, IdPath, JwtAuth, Role, UuidPath, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use domain_catalog::ItemRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::auth_handlers;
use crate::error::AccountResult;
use crate::models::{
    Admin, Buyer, BuyerProfile, CreateAdmin, PublicSeller, PublicSellerProfile, Seller,
    SellerProfile, UpdateBuyer, UpdateSeller,
};
use crate::repository::AccountRepository;
use crate::service::AccountService;

pub const SELLERS_TAG: &str = "sellers";
pub const BUYERS_TAG: &str = "buyers";
pub const ADMINS_TAG: &str = "admins";

#[derive(OpenApi)]
#[openapi(
    paths(
        seller_me, update_seller_me, public_seller,
        buyer_me, update_buyer_me, add_favorite, remove_favorite,
        create_admin
    ),
    components(
        schemas(
            Admin, Seller, PublicSeller, SellerProfile, PublicSellerProfile, Buyer, BuyerProfile,
            UpdateSeller, UpdateBuyer, CreateAdmin
        ),
        responses(
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = SELLERS_TAG, description = "Seller profiles"),
        (name = BUYERS_TAG, description = "Buyer profiles and favorites"),
        (name = ADMINS_TAG, description = "Administrator accounts")
    )
)]
pub struct ApiDoc;

/// Every account route: `/auth/*` and `GET /sellers/{id}` are public, the
/// rest need a token of the matching role
pub fn router<R, I>(service: AccountService<R, I>, auth: JwtAuth) -> Router
where
    R: AccountRepository + 'static,
    I: ItemRepository + 'static,
{
    let shared_service = Arc::new(service);

    let protected = require_auth(
        Router::new()
            .route("/sellers/me", get(seller_me).patch(update_seller_me))
            .route("/buyers/me", get(buyer_me).patch(update_buyer_me))
            .route(
                "/buyers/me/favorites/{item_id}",
                post(add_favorite).delete(remove_favorite),
            )
            .route("/admins", post(create_admin)),
        auth,
    );

    Router::new()
        .route("/sellers/{id}", get(public_seller))
        .merge(auth_handlers::routes())
        .merge(protected)
        .with_state(shared_service)
}

/// Current seller with balance and items
#[utoipa::path(
    get,
    path = "/sellers/me",
    tag = SELLERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seller profile", body = SellerProfile),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_me<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
) -> AccountResult<Json<SellerProfile>> {
    user.require(Role::Seller)?;
    Ok(Json(service.seller_profile(user.id).await?))
}

/// Update the current seller (partial)
#[utoipa::path(
    patch,
    path = "/sellers/me",
    tag = SELLERS_TAG,
    request_body = UpdateSeller,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Seller updated", body = Seller),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_seller_me<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateSeller>,
) -> AccountResult<Json<Seller>> {
    user.require(Role::Seller)?;
    Ok(Json(service.update_seller(user.id, input).await?))
}

/// Public seller profile with items
#[utoipa::path(
    get,
    path = "/sellers/{id}",
    tag = SELLERS_TAG,
    params(
        ("id" = uuid::Uuid, Path, description = "Seller ID")
    ),
    responses(
        (status = 200, description = "Seller without balance or email", body = PublicSellerProfile),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn public_seller<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    UuidPath(id): UuidPath,
) -> AccountResult<Json<PublicSellerProfile>> {
    Ok(Json(service.public_seller(id).await?))
}

/// Current buyer with favorites
#[utoipa::path(
    get,
    path = "/buyers/me",
    tag = BUYERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer profile", body = BuyerProfile),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buyer_me<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
) -> AccountResult<Json<BuyerProfile>> {
    user.require(Role::Buyer)?;
    Ok(Json(service.buyer_profile(user.id).await?))
}

/// Update the current buyer (partial)
#[utoipa::path(
    patch,
    path = "/buyers/me",
    tag = BUYERS_TAG,
    request_body = UpdateBuyer,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer updated", body = Buyer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_buyer_me<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateBuyer>,
) -> AccountResult<Json<Buyer>> {
    user.require(Role::Buyer)?;
    Ok(Json(service.update_buyer(user.id, input).await?))
}

/// Add an item to the buyer's favorites
#[utoipa::path(
    post,
    path = "/buyers/me/favorites/{item_id}",
    tag = BUYERS_TAG,
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Item is a favorite"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_favorite<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
    IdPath(item_id): IdPath,
) -> AccountResult<StatusCode> {
    user.require(Role::Buyer)?;
    service.add_favorite(user.id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Remove an item from the buyer's favorites
#[utoipa::path(
    delete,
    path = "/buyers/me/favorites/{item_id}",
    tag = BUYERS_TAG,
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Favorite removed"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_favorite<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
    IdPath(item_id): IdPath,
) -> AccountResult<StatusCode> {
    user.require(Role::Buyer)?;
    service.remove_favorite(user.id, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create another administrator (admin)
#[utoipa::path(
    post,
    path = "/admins",
    tag = ADMINS_TAG,
    request_body = CreateAdmin,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Admin created", body = Admin),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_admin<R: AccountRepository, I: ItemRepository>(
    State(service): State<Arc<AccountService<R, I>>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateAdmin>,
) -> AccountResult<impl IntoResponse> {
    user.require(Role::Admin)?;
    let admin = service.create_admin(input).await?;

    AuditEvent::new(
        Some(&user),
        "admin.create",
        Some(format!("admin:{}", admin.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({ "login": admin.login }))
    .log();

    Ok((StatusCode::CREATED, Json(admin)))
}
