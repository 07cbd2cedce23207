//! Sign-up and sign-in endpoints under `/auth`.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, Role, ValidatedJson,
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        UnauthorizedResponse,
    },
};
use domain_catalog::ItemRepository;
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{AccountError, AccountResult};
use crate::models::{
    AdminAuth, AdminSignIn, Buyer, BuyerAuth, BuyerSignUp, Seller, SellerAuth, SellerSignUp,
    SignIn,
};
use crate::repository::AccountRepository;
use crate::service::AccountService;

pub const AUTH_TAG: &str = "auth";

#[derive(OpenApi)]
#[openapi(
    paths(seller_sign_up, buyer_sign_up, seller_sign_in, buyer_sign_in, admin_sign_in),
    components(
        schemas(
            SellerSignUp, BuyerSignUp, SignIn, AdminSignIn, SellerAuth, BuyerAuth, AdminAuth
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Account registration and sign-in")
    )
)]
pub struct ApiDoc;

type SharedService<R, I> = Arc<AccountService<R, I>>;

/// Public `/auth/*` routes
pub fn routes<R, I>() -> Router<SharedService<R, I>>
where
    R: AccountRepository + 'static,
    I: ItemRepository + 'static,
{
    Router::new()
        .route("/auth/sellers/sign-up", post(seller_sign_up))
        .route("/auth/buyers/sign-up", post(buyer_sign_up))
        .route("/auth/sellers/sign-in", post(seller_sign_in))
        .route("/auth/buyers/sign-in", post(buyer_sign_in))
        .route("/auth/admins/sign-in", post(admin_sign_in))
}

/// Records a rejected sign-in and passes the error through.
fn failed_sign_in(action: &str, who: &str, headers: &HeaderMap, err: AccountError) -> AccountError {
    AuditEvent::new(None, action, None, AuditOutcome::Failure)
        .with_request(headers)
        .with_details(json!({ "account": who, "reason": err.to_string() }))
        .log();
    err
}

/// Register a seller
#[utoipa::path(
    post,
    path = "/auth/sellers/sign-up",
    tag = AUTH_TAG,
    request_body = SellerSignUp,
    responses(
        (status = 201, description = "Seller registered", body = Seller),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_sign_up<R: AccountRepository, I: ItemRepository>(
    State(service): State<SharedService<R, I>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<SellerSignUp>,
) -> AccountResult<impl IntoResponse> {
    let seller = service.seller_sign_up(input).await?;

    AuditEvent::for_account(seller.id, Role::Seller, "seller.sign_up", AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "email": seller.email, "shop_name": seller.shop_name }))
        .log();

    Ok((StatusCode::CREATED, Json(seller)))
}

/// Register a buyer
#[utoipa::path(
    post,
    path = "/auth/buyers/sign-up",
    tag = AUTH_TAG,
    request_body = BuyerSignUp,
    responses(
        (status = 201, description = "Buyer registered", body = Buyer),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buyer_sign_up<R: AccountRepository, I: ItemRepository>(
    State(service): State<SharedService<R, I>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<BuyerSignUp>,
) -> AccountResult<impl IntoResponse> {
    let buyer = service.buyer_sign_up(input).await?;

    AuditEvent::for_account(buyer.id, Role::Buyer, "buyer.sign_up", AuditOutcome::Success)
        .with_request(&headers)
        .with_details(json!({ "email": buyer.email }))
        .log();

    Ok((StatusCode::CREATED, Json(buyer)))
}

/// Sign in as a seller
#[utoipa::path(
    post,
    path = "/auth/sellers/sign-in",
    tag = AUTH_TAG,
    request_body = SignIn,
    responses(
        (status = 200, description = "Token and seller", body = SellerAuth),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn seller_sign_in<R: AccountRepository, I: ItemRepository>(
    State(service): State<SharedService<R, I>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<SignIn>,
) -> AccountResult<Json<SellerAuth>> {
    let email = input.email.clone();
    let auth = service
        .seller_sign_in(input)
        .await
        .map_err(|e| failed_sign_in("seller.sign_in", &email, &headers, e))?;

    AuditEvent::for_account(auth.seller.id, Role::Seller, "seller.sign_in", AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(auth))
}

/// Sign in as a buyer
#[utoipa::path(
    post,
    path = "/auth/buyers/sign-in",
    tag = AUTH_TAG,
    request_body = SignIn,
    responses(
        (status = 200, description = "Token and buyer", body = BuyerAuth),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn buyer_sign_in<R: AccountRepository, I: ItemRepository>(
    State(service): State<SharedService<R, I>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<SignIn>,
) -> AccountResult<Json<BuyerAuth>> {
    let email = input.email.clone();
    let auth = service
        .buyer_sign_in(input)
        .await
        .map_err(|e| failed_sign_in("buyer.sign_in", &email, &headers, e))?;

    AuditEvent::for_account(auth.buyer.id, Role::Buyer, "buyer.sign_in", AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(auth))
}

/// Sign in as an admin
#[utoipa::path(
    post,
    path = "/auth/admins/sign-in",
    tag = AUTH_TAG,
    request_body = AdminSignIn,
    responses(
        (status = 200, description = "Token and admin", body = AdminAuth),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn admin_sign_in<R: AccountRepository, I: ItemRepository>(
    State(service): State<SharedService<R, I>>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<AdminSignIn>,
) -> AccountResult<Json<AdminAuth>> {
    let login = input.login.clone();
    let auth = service
        .admin_sign_in(input)
        .await
        .map_err(|e| failed_sign_in("admin.sign_in", &login, &headers, e))?;

    AuditEvent::for_account(auth.admin.id, Role::Admin, "admin.sign_in", AuditOutcome::Success)
        .with_request(&headers)
        .log();

    Ok(Json(auth))
}
