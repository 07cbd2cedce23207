use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, patch, post},
};
use axum_helpers::{
    AuthUser, IdPath, JwtAuth, Role, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use domain_catalog::ItemRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use super::CART_TAG;
use crate::error::OrderResult;
use crate::models::{AddToCart, Cart, CartLine, UpdateCartItem};
use crate::repository::CartRepository;
use crate::service::CartService;

#[derive(OpenApi)]
#[openapi(
    paths(get_cart, clear_cart, add_item, update_item, remove_item),
    components(
        schemas(Cart, CartLine, AddToCart, UpdateCartItem),
        responses(
            BadRequestValidationResponse,
            BadRequestIdResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = CART_TAG, description = "Buyer cart")
    )
)]
pub struct ApiDoc;

type SharedService<C, I> = Arc<CartService<C, I>>;

/// Cart routes; every one needs a buyer token
pub fn router<C, I>(service: CartService<C, I>, auth: JwtAuth) -> Router
where
    C: CartRepository + 'static,
    I: ItemRepository + 'static,
{
    let shared_service = Arc::new(service);

    require_auth(
        Router::new()
            .route("/", get(get_cart).delete(clear_cart))
            .route("/items", post(add_item))
            .route("/items/{item_id}", patch(update_item).delete(remove_item)),
        auth,
    )
    .with_state(shared_service)
}

/// Cart of the calling buyer with line and cart totals
#[utoipa::path(
    get,
    path = "",
    tag = CART_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current cart", body = Cart),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_cart<C: CartRepository, I: ItemRepository>(
    State(service): State<SharedService<C, I>>,
    user: AuthUser,
) -> OrderResult<Json<Cart>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.get_cart(buyer_id).await?))
}

/// Remove every line from the cart
#[utoipa::path(
    delete,
    path = "",
    tag = CART_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Cart cleared"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn clear_cart<C: CartRepository, I: ItemRepository>(
    State(service): State<SharedService<C, I>>,
    user: AuthUser,
) -> OrderResult<StatusCode> {
    let buyer_id = user.require(Role::Buyer)?;
    service.clear(buyer_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Put an item into the cart; an existing line gets the new quantity
#[utoipa::path(
    post,
    path = "/items",
    tag = CART_TAG,
    request_body = AddToCart,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<C: CartRepository, I: ItemRepository>(
    State(service): State<SharedService<C, I>>,
    user: AuthUser,
    ValidatedJson(input): ValidatedJson<AddToCart>,
) -> OrderResult<Json<Cart>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.add_item(buyer_id, input).await?))
}

/// Change the quantity of a cart line
#[utoipa::path(
    patch,
    path = "/items/{item_id}",
    tag = CART_TAG,
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateCartItem,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<C: CartRepository, I: ItemRepository>(
    State(service): State<SharedService<C, I>>,
    user: AuthUser,
    IdPath(item_id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateCartItem>,
) -> OrderResult<Json<Cart>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.update_item(buyer_id, item_id, input).await?))
}

/// Drop a line from the cart
#[utoipa::path(
    delete,
    path = "/items/{item_id}",
    tag = CART_TAG,
    params(
        ("item_id" = i32, Path, description = "Item ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated cart", body = Cart),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<C: CartRepository, I: ItemRepository>(
    State(service): State<SharedService<C, I>>,
    user: AuthUser,
    IdPath(item_id): IdPath,
) -> OrderResult<Json<Cart>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.remove_item(buyer_id, item_id).await?))
}
