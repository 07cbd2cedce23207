//! Handler tests for the catalog domain
//!
//! Drive the routers with in-memory repositories and real tokens:
//! - public browsing and search
//! - admin-only reference writes
//! - seller-only item writes, ownership and image upload

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_catalog::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct Catalog {
    auth: JwtAuth,
    references: Router,
    items: Router,
    store: InMemoryImageStore,
    seeded: (i32, i32, i32),
}

impl Catalog {
    async fn new() -> Self {
        let auth = JwtAuth::new(&JwtConfig::new("catalog-handler-test-secret-32-chars").unwrap());
        let refs = InMemoryReferenceRepository::new();
        let category = refs
            .create(ReferenceKind::Category, "Insulation".to_string())
            .await
            .unwrap();
        let brand = refs
            .create(ReferenceKind::Brand, "Rockwool".to_string())
            .await
            .unwrap();
        let material = refs
            .create(ReferenceKind::Material, "Stone wool".to_string())
            .await
            .unwrap();
        let items_repo = InMemoryItemRepository::new(refs.clone());
        let store = InMemoryImageStore::new();

        Self {
            references: handlers::references::router(ReferenceService::new(refs.clone()), auth.clone()),
            items: handlers::items::router(
                ItemService::new(items_repo, refs, store.clone()),
                auth.clone(),
                1024,
            ),
            auth,
            store,
            seeded: (category.id, brand.id, material.id),
        }
    }

    fn token(&self, role: Role) -> (Uuid, String) {
        let id = Uuid::new_v4();
        (id, self.auth.issue(id, role).unwrap())
    }

    fn item_json(&self, name: &str, price: f64) -> Value {
        let (category_id, brand_id, material_id) = self.seeded;
        json!({
            "name": name,
            "article": "RW-50",
            "price": price,
            "quantity": 12,
            "category_id": category_id,
            "brand_id": brand_id,
            "material_id": material_id
        })
    }

    async fn create_item(&self, token: &str, body: Value) -> axum::response::Response {
        self.items
            .clone()
            .oneshot(json_request("POST", "/", Some(token), body))
            .await
            .unwrap()
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn multipart_request(uri: &str, token: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let boundary = "stroycity-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"photo.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_list_references_is_public() {
    let catalog = Catalog::new().await;

    let response = catalog
        .references
        .clone()
        .oneshot(Request::get("/brands").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let brands: Vec<Reference> = json_body(response.into_body()).await;
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].name, "Rockwool");
}

#[tokio::test]
async fn test_unknown_reference_kind_is_404() {
    let catalog = Catalog::new().await;

    let response = catalog
        .references
        .clone()
        .oneshot(Request::get("/colors").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_reference_requires_admin() {
    let catalog = Catalog::new().await;
    let (_, admin) = catalog.token(Role::Admin);
    let (_, seller) = catalog.token(Role::Seller);

    let response = catalog
        .references
        .clone()
        .oneshot(json_request("POST", "/categories", None, json!({"name": "Roofing"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = catalog
        .references
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            Some(&seller),
            json!({"name": "Roofing"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = catalog
        .references
        .clone()
        .oneshot(json_request(
            "POST",
            "/categories",
            Some(&admin),
            json!({"name": "Roofing"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Reference = json_body(response.into_body()).await;
    assert_eq!(created.name, "Roofing");
}

#[tokio::test]
async fn test_delete_reference_in_use_is_conflict() {
    let catalog = Catalog::new().await;
    let (_, admin) = catalog.token(Role::Admin);
    let (_, seller) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&seller, catalog.item_json("Light Batts 50mm", 1890.0))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let (_, brand_id, _) = catalog.seeded;
    let response = catalog
        .references
        .clone()
        .oneshot(
            Request::delete(format!("/brands/{brand_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {admin}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_delete_reference_with_bad_id_is_400() {
    let catalog = Catalog::new().await;
    let (_, admin) = catalog.token(Role::Admin);

    let response = catalog
        .references
        .clone()
        .oneshot(
            Request::delete("/brands/abc")
                .header(header::AUTHORIZATION, format!("Bearer {admin}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "INVALID_ID");
}

#[tokio::test]
async fn test_create_item_requires_seller_role() {
    let catalog = Catalog::new().await;

    for role in [Role::Buyer, Role::Admin] {
        let (_, token) = catalog.token(role);
        let response = catalog
            .create_item(&token, catalog.item_json("Light Batts", 10.0))
            .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{role}");
    }
}

#[tokio::test]
async fn test_create_item_with_missing_reference_is_404() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let mut body = catalog.item_json("Light Batts", 10.0);
    body["brand_id"] = json!(999);

    let response = catalog.create_item(&seller, body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_item_validates_body() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let mut body = catalog.item_json("", 10.0);
    body["quantity"] = json!(-3);

    let response = catalog.create_item(&seller, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["name"].is_array());
    assert!(body["details"]["quantity"].is_array());
}

#[tokio::test]
async fn test_item_details_and_update_by_owner_only() {
    let catalog = Catalog::new().await;
    let (seller_id, owner) = catalog.token(Role::Seller);
    let (_, other) = catalog.token(Role::Seller);

    let response = catalog
        .create_item(&owner, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;
    assert_eq!(item.seller_id, seller_id);

    let response = catalog
        .items
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", item.id),
            Some(&other),
            json!({"price": 1.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = catalog
        .items
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", item.id),
            Some(&owner),
            json!({"price": 1750.0, "quantity": 3}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = catalog
        .items
        .clone()
        .oneshot(
            Request::get(format!("/{}", item.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let details: Value = json_body(response.into_body()).await;
    assert_eq!(details["price"], 1750.0);
    assert_eq!(details["quantity"], 3);
    assert_eq!(details["brand"], "Rockwool");
    assert_eq!(details["images"], json!([]));
}

#[tokio::test]
async fn test_get_unknown_item_is_404() {
    let catalog = Catalog::new().await;

    let response = catalog
        .items
        .clone()
        .oneshot(Request::get("/404").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_filters_by_price_and_seller() {
    let catalog = Catalog::new().await;
    let (seller_a, token_a) = catalog.token(Role::Seller);
    let (_, token_b) = catalog.token(Role::Seller);
    for (token, price) in [(&token_a, 100.0), (&token_a, 900.0), (&token_b, 500.0)] {
        let response = catalog
            .create_item(token, catalog.item_json("Batts", price))
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let search = |body: Value| {
        let items = catalog.items.clone();
        async move {
            let response = items
                .oneshot(json_request("POST", "/search", None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            json_body::<Vec<Item>>(response.into_body()).await
        }
    };

    assert_eq!(search(json!({})).await.len(), 3);
    assert_eq!(
        search(json!({"min_price": 0, "max_price": 0, "brand_ids": []}))
            .await
            .len(),
        3
    );
    assert_eq!(search(json!({"max_price": 500})).await.len(), 2);

    let found = search(json!({"seller_ids": [seller_a], "min_price": 200})).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].price, 900.0);
}

#[tokio::test]
async fn test_list_items_paginates() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    for n in 0..3 {
        catalog
            .create_item(&seller, catalog.item_json(&format!("Batts {n}"), 10.0))
            .await;
    }

    let response = catalog
        .items
        .clone()
        .oneshot(
            Request::get("/?limit=2&offset=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<Item> = json_body(response.into_body()).await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].name, "Batts 2");
}

#[tokio::test]
async fn test_upload_image_for_own_item() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&seller, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    let response = catalog
        .items
        .clone()
        .oneshot(multipart_request(
            &format!("/{}/images", item.id),
            &seller,
            "image/png",
            b"\x89PNG\r\n",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let image: ItemImage = json_body(response.into_body()).await;
    assert_eq!(image.item_id, item.id);
    assert!(image.url.starts_with(&format!("/uploads/{}_", item.id)));
    assert!(image.url.ends_with(".png"));

    let file_name = image.url.trim_start_matches("/uploads/");
    assert_eq!(catalog.store.get(file_name).await.unwrap(), b"\x89PNG\r\n");
}

#[tokio::test]
async fn test_upload_rejects_non_image_content() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&seller, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    let response = catalog
        .items
        .clone()
        .oneshot(multipart_request(
            &format!("/{}/images", item.id),
            &seller,
            "text/plain",
            b"hello",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_by_other_seller_is_forbidden() {
    let catalog = Catalog::new().await;
    let (_, owner) = catalog.token(Role::Seller);
    let (_, other) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&owner, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    let response = catalog
        .items
        .clone()
        .oneshot(multipart_request(
            &format!("/{}/images", item.id),
            &other,
            "image/png",
            b"\x89PNG",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_list_items_rejects_out_of_range_pagination() {
    let catalog = Catalog::new().await;

    for uri in [
        "/?limit=0",
        "/?limit=5000000",
        "/?offset=18446744073709551615",
    ] {
        let response = catalog
            .items
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_update_item_rejects_other_roles() {
    let catalog = Catalog::new().await;
    let (_, owner) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&owner, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    for role in [Role::Buyer, Role::Admin] {
        let (_, token) = catalog.token(role);
        let response = catalog
            .items
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/{}", item.id),
                Some(&token),
                json!({"price": 1.0}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{role:?}");
    }

    let (_, buyer) = catalog.token(Role::Buyer);
    let response = catalog
        .items
        .clone()
        .oneshot(multipart_request(
            &format!("/{}/images", item.id),
            &buyer,
            "image/png",
            b"\x89PNG",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upload_rejects_svg() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&seller, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    let response = catalog
        .items
        .clone()
        .oneshot(multipart_request(
            &format!("/{}/images", item.id),
            &seller,
            "image/svg+xml",
            b"<svg xmlns=\"http://www.w3.org/2000/svg\"><script>alert(1)</script></svg>",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_back_to_back_uploads_keep_both_images() {
    let catalog = Catalog::new().await;
    let (_, seller) = catalog.token(Role::Seller);
    let response = catalog
        .create_item(&seller, catalog.item_json("Light Batts", 1890.0))
        .await;
    let item: Item = json_body(response.into_body()).await;

    let mut urls = Vec::new();
    for data in [b"first".as_slice(), b"second".as_slice()] {
        let response = catalog
            .items
            .clone()
            .oneshot(multipart_request(
                &format!("/{}/images", item.id),
                &seller,
                "image/png",
                data,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let image: ItemImage = json_body(response.into_body()).await;
        urls.push(image.url);
    }

    assert_ne!(urls[0], urls[1]);
    let first = urls[0].trim_start_matches("/uploads/");
    assert_eq!(catalog.store.get(first).await.unwrap(), b"first");

    let response = catalog
        .items
        .clone()
        .oneshot(
            Request::get(format!("/{}", item.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let details: Value = json_body(response.into_body()).await;
    assert_eq!(details["images"].as_array().unwrap().len(), 2);
}
