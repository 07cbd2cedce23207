use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, IdPath, JwtAuth, Role, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ConflictResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::REFERENCES_TAG;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{CreateReference, Reference, ReferenceKind};
use crate::repository::ReferenceRepository;
use crate::service::ReferenceService;

#[derive(OpenApi)]
#[openapi(
    paths(list_references, create_reference, delete_reference),
    components(
        schemas(Reference, CreateReference, ReferenceKind),
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
        (name = REFERENCES_TAG, description = "Categories, brands and materials")
    )
)]
pub struct ApiDoc;

/// `/{kind}` routes; reads are public, writes need an admin token
pub fn router<R: ReferenceRepository + 'static>(
    service: ReferenceService<R>,
    auth: JwtAuth,
) -> Router {
    let shared_service = Arc::new(service);

    let admin = require_auth(
        Router::new()
            .route("/{kind}", post(create_reference))
            .route("/{kind}/{id}", delete(delete_reference)),
        auth,
    );

    Router::new()
        .route("/{kind}", get(list_references))
        .merge(admin)
        .with_state(shared_service)
}

fn parse_kind(raw: &str) -> CatalogResult<ReferenceKind> {
    raw.parse()
        .map_err(|_| CatalogError::UnknownKind(raw.to_string()))
}

/// List all references of a kind
#[utoipa::path(
    get,
    path = "/{kind}",
    tag = REFERENCES_TAG,
    params(
        ("kind" = String, Path, description = "categories, brands or materials")
    ),
    responses(
        (status = 200, description = "References ordered by id", body = Vec<Reference>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_references<R: ReferenceRepository>(
    State(service): State<Arc<ReferenceService<R>>>,
    Path(kind): Path<String>,
) -> CatalogResult<Json<Vec<Reference>>> {
    let kind = parse_kind(&kind)?;
    Ok(Json(service.list(kind).await?))
}

/// Create a reference (admin)
#[utoipa::path(
    post,
    path = "/{kind}",
    tag = REFERENCES_TAG,
    params(
        ("kind" = String, Path, description = "categories, brands or materials")
    ),
    request_body = CreateReference,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Reference created", body = Reference),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_reference<R: ReferenceRepository>(
    State(service): State<Arc<ReferenceService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    Path(kind): Path<String>,
    ValidatedJson(input): ValidatedJson<CreateReference>,
) -> CatalogResult<impl IntoResponse> {
    user.require(Role::Admin)?;
    let kind = parse_kind(&kind)?;
    let reference = service.create(kind, input).await?;

    AuditEvent::new(
        Some(&user),
        "catalog.create",
        Some(format!("{}:{}", kind, reference.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(serde_json::json!({ "name": reference.name }))
    .log();

    Ok((StatusCode::CREATED, Json(reference)))
}

/// Delete a reference (admin); fails while items still use it
#[utoipa::path(
    delete,
    path = "/{kind}/{id}",
    tag = REFERENCES_TAG,
    params(
        ("kind" = String, Path, description = "categories, brands or materials"),
        ("id" = i32, Path, description = "Reference ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Reference deleted"),
        (status = 400, response = BadRequestIdResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_reference<R: ReferenceRepository>(
    State(service): State<Arc<ReferenceService<R>>>,
    user: AuthUser,
    headers: HeaderMap,
    Path(params): Path<(String, String)>,
    IdPath(id): IdPath,
) -> CatalogResult<impl IntoResponse> {
    user.require(Role::Admin)?;
    let kind = parse_kind(&params.0)?;
    service.delete(kind, id).await?;

    AuditEvent::new(
        Some(&user),
        "catalog.delete",
        Some(format!("{}:{}", kind, id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .log();

    Ok(StatusCode::NO_CONTENT)
}
