use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, IdPath, JwtAuth, Role,
    errors::responses::{
        BadRequestIdResponse, BadRequestRuleResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use domain_catalog::ItemRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use super::ORDERS_TAG;
use crate::error::OrderResult;
use crate::models::{Earnings, Order, OrderItem, OrderStatus};
use crate::repository::{CartRepository, OrderRepository};
use crate::service::OrderService;

#[derive(OpenApi)]
#[openapi(
    paths(place_order, list_orders, get_order, earnings),
    components(
        schemas(Order, OrderItem, OrderStatus, Earnings),
        responses(
            BadRequestIdResponse,
            BadRequestRuleResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            NotFoundResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = ORDERS_TAG, description = "Orders and seller earnings")
    )
)]
pub struct ApiDoc;

type SharedService<C, O, I> = Arc<OrderService<C, O, I>>;

/// Order routes; buyers place and read orders, sellers read earnings
pub fn router<C, O, I>(service: OrderService<C, O, I>, auth: JwtAuth) -> Router
where
    C: CartRepository + 'static,
    O: OrderRepository + 'static,
    I: ItemRepository + 'static,
{
    let shared_service = Arc::new(service);

    require_auth(
        Router::new()
            .route("/", get(list_orders).post(place_order))
            .route("/earnings", get(earnings))
            .route("/{id}", get(get_order)),
        auth,
    )
    .with_state(shared_service)
}

/// Turn the buyer's cart into an order
#[utoipa::path(
    post,
    path = "",
    tag = ORDERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Order placed, stock and seller balances updated, cart cleared", body = Order),
        (status = 400, response = BadRequestRuleResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn place_order<C: CartRepository, O: OrderRepository, I: ItemRepository>(
    State(service): State<SharedService<C, O, I>>,
    user: AuthUser,
    headers: HeaderMap,
) -> OrderResult<impl IntoResponse> {
    let buyer_id = user.require(Role::Buyer)?;
    let order = match service.place_order(buyer_id).await {
        Ok(order) => order,
        Err(err) => {
            AuditEvent::new(Some(&user), "order.place", None, AuditOutcome::Failure)
                .with_request(&headers)
                .with_details(json!({ "reason": err.to_string() }))
                .log();
            return Err(err);
        }
    };

    AuditEvent::new(
        Some(&user),
        "order.place",
        Some(format!("order:{}", order.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(json!({
        "total": order.total,
        "lines": order.items.len(),
    }))
    .log();

    Ok((StatusCode::CREATED, Json(order)))
}

/// Orders of the calling buyer, newest first
#[utoipa::path(
    get,
    path = "",
    tag = ORDERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Buyer orders", body = Vec<Order>),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_orders<C: CartRepository, O: OrderRepository, I: ItemRepository>(
    State(service): State<SharedService<C, O, I>>,
    user: AuthUser,
) -> OrderResult<Json<Vec<Order>>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.list_orders(buyer_id).await?))
}

/// One order of the calling buyer
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ORDERS_TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Order with its items", body = Order),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_order<C: CartRepository, O: OrderRepository, I: ItemRepository>(
    State(service): State<SharedService<C, O, I>>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> OrderResult<Json<Order>> {
    let buyer_id = user.require(Role::Buyer)?;
    Ok(Json(service.get_order(buyer_id, id).await?))
}

/// Revenue of the calling seller for the current and the previous week
#[utoipa::path(
    get,
    path = "/earnings",
    tag = ORDERS_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Rolling weekly earnings", body = Earnings),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn earnings<C: CartRepository, O: OrderRepository, I: ItemRepository>(
    State(service): State<SharedService<C, O, I>>,
    user: AuthUser,
) -> OrderResult<Json<Earnings>> {
    let seller_id = user.require(Role::Seller)?;
    Ok(Json(service.earnings(seller_id).await?))
}
