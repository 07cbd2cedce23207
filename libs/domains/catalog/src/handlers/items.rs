use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post, put},
};
use axum_helpers::{
    AuditEvent, AuditOutcome, AuthUser, IdPath, JwtAuth, Role, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, UnauthorizedResponse,
    },
    require_auth,
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::ITEMS_TAG;
use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CreateItem, ImageForm, Item, ItemDetails, ItemFilter, ItemImage, Pagination, UpdateItem,
};
use crate::repository::{ItemRepository, ReferenceRepository};
use crate::service::{ImageUpload, ItemService};
use crate::storage::ImageStore;

#[derive(OpenApi)]
#[openapi(
    paths(list_items, search_items, get_item, create_item, update_item, upload_image),
    components(
        schemas(Item, ItemDetails, ItemImage, ItemFilter, CreateItem, UpdateItem, ImageForm),
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
        (name = ITEMS_TAG, description = "Items listed by sellers")
    )
)]
pub struct ApiDoc;

type SharedService<I, R, S> = Arc<ItemService<I, R, S>>;

/// Item routes. Browsing is public; writes need the owning seller's token.
/// `max_upload_bytes` caps the image upload body.
pub fn router<I, R, S>(
    service: ItemService<I, R, S>,
    auth: JwtAuth,
    max_upload_bytes: usize,
) -> Router
where
    I: ItemRepository + 'static,
    R: ReferenceRepository + 'static,
    S: ImageStore + 'static,
{
    let shared_service = Arc::new(service);

    let seller = require_auth(
        Router::new()
            .route("/", post(create_item))
            .route("/{id}", put(update_item))
            .route(
                "/{id}/images",
                post(upload_image).layer(DefaultBodyLimit::max(max_upload_bytes)),
            ),
        auth,
    );

    Router::new()
        .route("/", get(list_items))
        .route("/search", post(search_items))
        .route("/{id}", get(get_item))
        .merge(seller)
        .with_state(shared_service)
}

/// List all items, newest first
#[utoipa::path(
    get,
    path = "",
    tag = ITEMS_TAG,
    params(Pagination),
    responses(
        (status = 200, description = "Page of items", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_items<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    Query(page): Query<Pagination>,
) -> CatalogResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items(page.into()).await?))
}

/// Filter items by brands, sellers, categories, materials and price range
#[utoipa::path(
    post,
    path = "/search",
    tag = ITEMS_TAG,
    request_body = ItemFilter,
    responses(
        (status = 200, description = "Matching items", body = Vec<Item>),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_items<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    ValidatedJson(filter): ValidatedJson<ItemFilter>,
) -> CatalogResult<Json<Vec<Item>>> {
    Ok(Json(service.list_items(filter).await?))
}

/// Item with reference names and images
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ITEMS_TAG,
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemDetails),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_item<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    IdPath(id): IdPath,
) -> CatalogResult<Json<ItemDetails>> {
    Ok(Json(service.get_item(id).await?))
}

/// Create an item for the calling seller
#[utoipa::path(
    post,
    path = "",
    tag = ITEMS_TAG,
    request_body = CreateItem,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_item<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    user: AuthUser,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> CatalogResult<impl IntoResponse> {
    let seller_id = user.require(Role::Seller)?;
    let item = service.create_item(seller_id, input).await?;

    AuditEvent::new(
        Some(&user),
        "item.create",
        Some(format!("item:{}", item.id)),
        AuditOutcome::Success,
    )
    .with_request(&headers)
    .with_details(serde_json::json!({
        "name": item.name,
        "price": item.price,
        "quantity": item.quantity,
    }))
    .log();

    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an item owned by the calling seller
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ITEMS_TAG,
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_item<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> CatalogResult<Json<Item>> {
    let seller_id = user.require(Role::Seller)?;
    Ok(Json(service.update_item(seller_id, id, input).await?))
}

/// Upload an image for an item owned by the calling seller
#[utoipa::path(
    post,
    path = "/{id}/images",
    tag = ITEMS_TAG,
    params(
        ("id" = i32, Path, description = "Item ID")
    ),
    request_body(content = ImageForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Image stored", body = ItemImage),
        (status = 400, description = "Missing, oversized or not a jpeg/png/gif/webp file"),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn upload_image<I: ItemRepository, R: ReferenceRepository, S: ImageStore>(
    State(service): State<SharedService<I, R, S>>,
    user: AuthUser,
    IdPath(id): IdPath,
    mut multipart: Multipart,
) -> CatalogResult<impl IntoResponse> {
    let seller_id = user.require(Role::Seller)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| CatalogError::InvalidImage(e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| CatalogError::InvalidImage(e.body_text()))?;

        upload = Some(ImageUpload {
            content_type,
            data: data.to_vec(),
        });
        break;
    }

    let upload =
        upload.ok_or_else(|| CatalogError::InvalidImage("missing 'image' field".to_string()))?;
    let image = service.upload_image(seller_id, id, upload).await?;

    Ok((StatusCode::CREATED, Json(image)))
}
