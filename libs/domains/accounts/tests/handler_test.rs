//! Handler tests for the accounts domain
//!
//! Sign-up and sign-in flows, role-scoped profiles and favorites, driven
//! through the router with in-memory repositories.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{JwtAuth, JwtConfig, Role};
use domain_accounts::*;
use domain_catalog::{
    CreateItem, InMemoryItemRepository, InMemoryReferenceRepository, ItemRepository,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()
use uuid::Uuid;

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

struct Accounts {
    auth: JwtAuth,
    app: Router,
    service: AccountService<InMemoryAccountRepository, InMemoryItemRepository>,
    items: InMemoryItemRepository,
}

impl Accounts {
    fn new() -> Self {
        let auth = JwtAuth::new(&JwtConfig::new("accounts-handler-test-secret-32-chars").unwrap());
        let items = InMemoryItemRepository::new(InMemoryReferenceRepository::new());
        let service =
            AccountService::new(InMemoryAccountRepository::new(), items.clone(), auth.clone());

        Self {
            app: handlers::router(service.clone(), auth.clone()),
            auth,
            service,
            items,
        }
    }

    async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> axum::response::Response {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        self.app.clone().oneshot(request).await.unwrap()
    }

    async fn seller(&self, email: &str) -> SellerAuth {
        let response = self
            .send(
                "POST",
                "/auth/sellers/sign-up",
                None,
                Some(json!({
                    "name": "Petr",
                    "email": email,
                    "password": "concrete-mixer",
                    "shop_name": "Petr Blocks"
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self
            .send(
                "POST",
                "/auth/sellers/sign-in",
                None,
                Some(json!({ "email": email, "password": "concrete-mixer" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response.into_body()).await
    }

    async fn buyer(&self, email: &str) -> BuyerAuth {
        let response = self
            .send(
                "POST",
                "/auth/buyers/sign-up",
                None,
                Some(json!({ "name": "Anna", "email": email, "password": "paint-roller" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self
            .send(
                "POST",
                "/auth/buyers/sign-in",
                None,
                Some(json!({ "email": email, "password": "paint-roller" })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response.into_body()).await
    }

    async fn item_for(&self, seller_id: Uuid, name: &str) -> i32 {
        self.items
            .create(
                seller_id,
                CreateItem {
                    name: name.to_string(),
                    description: String::new(),
                    article: "P-1".to_string(),
                    price: 99.0,
                    price_with_discount: None,
                    quantity: 5,
                    length: 0.0,
                    width: 0.0,
                    height: 0.0,
                    weight: 1.0,
                    category_id: 1,
                    brand_id: 1,
                    material_id: 1,
                },
            )
            .await
            .unwrap()
            .id
    }
}

#[tokio::test]
async fn test_seller_sign_up_hides_password_and_rejects_duplicates() {
    let accounts = Accounts::new();
    let body = json!({
        "name": "Petr",
        "email": "Petr@Example.com",
        "password": "concrete-mixer"
    });

    let response = accounts.send("POST", "/auth/sellers/sign-up", None, Some(body.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let seller: Value = json_body(response.into_body()).await;
    assert_eq!(seller["email"], "petr@example.com");
    assert_eq!(seller["balance"], 0.0);
    assert!(seller.get("password").is_none());
    assert!(seller.get("password_hash").is_none());

    let response = accounts.send("POST", "/auth/sellers/sign-up", None, Some(body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_sign_up_validates_input() {
    let accounts = Accounts::new();
    let response = accounts
        .send(
            "POST",
            "/auth/buyers/sign-up",
            None,
            Some(json!({ "name": "", "email": "not-an-email", "password": "short" })),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = json_body(response.into_body()).await;
    let details = body["details"].as_object().unwrap();
    assert!(details.contains_key("email"));
    assert!(details.contains_key("password"));
}

#[tokio::test]
async fn test_sign_in_with_wrong_password_is_unauthorized() {
    let accounts = Accounts::new();
    accounts.buyer("anna@example.com").await;

    let response = accounts
        .send(
            "POST",
            "/auth/buyers/sign-in",
            None,
            Some(json!({ "email": "anna@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A buyer account cannot sign in as a seller
    let response = accounts
        .send(
            "POST",
            "/auth/sellers/sign-in",
            None,
            Some(json!({ "email": "anna@example.com", "password": "paint-roller" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_issued_token_carries_role() {
    let accounts = Accounts::new();
    let seller = accounts.seller("petr@example.com").await;

    let claims = accounts.auth.verify(&seller.token).unwrap();
    assert_eq!(claims.sub, seller.seller.id);
    assert_eq!(claims.role, Role::Seller);
}

#[tokio::test]
async fn test_seller_profile_includes_items_and_balance() {
    let accounts = Accounts::new();
    let seller = accounts.seller("petr@example.com").await;
    accounts.item_for(seller.seller.id, "Primer").await;

    let response = accounts.send("GET", "/sellers/me", Some(&seller.token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = json_body(response.into_body()).await;
    assert_eq!(profile["shop_name"], "Petr Blocks");
    assert_eq!(profile["balance"], 0.0);
    assert_eq!(profile["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_public_seller_profile_hides_balance_and_email() {
    let accounts = Accounts::new();
    let seller = accounts.seller("petr@example.com").await;

    let uri = format!("/sellers/{}", seller.seller.id);
    let response = accounts.send("GET", &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile: Value = json_body(response.into_body()).await;
    assert_eq!(profile["name"], "Petr");
    assert!(profile.get("balance").is_none());
    assert!(profile.get("email").is_none());

    let uri = format!("/sellers/{}", Uuid::new_v4());
    let response = accounts.send("GET", &uri, None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = accounts.send("GET", "/sellers/not-a-uuid", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profiles_require_matching_role() {
    let accounts = Accounts::new();
    let buyer = accounts.buyer("anna@example.com").await;
    let seller = accounts.seller("petr@example.com").await;

    let response = accounts.send("GET", "/sellers/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = accounts.send("GET", "/sellers/me", Some("garbage"), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin = accounts.auth.issue(Uuid::new_v4(), Role::Admin).unwrap();
    let item = accounts.item_for(seller.seller.id, "Gas block").await;

    let seller_routes = [
        ("GET", "/sellers/me".to_string(), None),
        ("PATCH", "/sellers/me".to_string(), Some(json!({ "shop_name": "Other" }))),
    ];
    for token in [&buyer.token, &admin] {
        for (method, uri, body) in &seller_routes {
            let response = accounts.send(method, uri, Some(token.as_str()), body.clone()).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        }
    }

    let buyer_routes = [
        ("GET", "/buyers/me".to_string(), None),
        ("PATCH", "/buyers/me".to_string(), Some(json!({ "name": "Other" }))),
        ("POST", format!("/buyers/me/favorites/{item}"), None),
        ("DELETE", format!("/buyers/me/favorites/{item}"), None),
    ];
    for token in [&seller.token, &admin] {
        for (method, uri, body) in &buyer_routes {
            let response = accounts.send(method, uri, Some(token.as_str()), body.clone()).await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{method} {uri}");
        }
    }

    let response = accounts
        .send(
            "POST",
            "/admins",
            Some(&seller.token),
            Some(json!({ "login": "root", "password": "supersecret" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_seller_changes_password() {
    let accounts = Accounts::new();
    let seller = accounts.seller("petr@example.com").await;

    let response = accounts
        .send(
            "PATCH",
            "/sellers/me",
            Some(&seller.token),
            Some(json!({ "shop_name": "Petr & Sons", "password": "new-password-1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = json_body(response.into_body()).await;
    assert_eq!(updated["shop_name"], "Petr & Sons");
    assert_eq!(updated["name"], "Petr");

    let response = accounts
        .send(
            "POST",
            "/auth/sellers/sign-in",
            None,
            Some(json!({ "email": "petr@example.com", "password": "new-password-1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_favorites_flow() {
    let accounts = Accounts::new();
    let buyer = accounts.buyer("anna@example.com").await;
    let item_id = accounts.item_for(Uuid::new_v4(), "Roller").await;
    let uri = format!("/buyers/me/favorites/{item_id}");

    // Adding twice is idempotent
    for _ in 0..2 {
        let response = accounts.send("POST", &uri, Some(&buyer.token), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    let response = accounts.send("GET", "/buyers/me", Some(&buyer.token), None).await;
    let profile: Value = json_body(response.into_body()).await;
    let favorites = profile["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["name"], "Roller");

    let response = accounts.send("DELETE", &uri, Some(&buyer.token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = accounts.send("DELETE", &uri, Some(&buyer.token), None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_unknown_item_is_not_found() {
    let accounts = Accounts::new();
    let buyer = accounts.buyer("anna@example.com").await;

    let response = accounts
        .send("POST", "/buyers/me/favorites/999", Some(&buyer.token), None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = accounts
        .send("POST", "/buyers/me/favorites/abc", Some(&buyer.token), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_admin_sign_in_and_create_admin() {
    let accounts = Accounts::new();
    assert!(accounts.service.ensure_admin("root", "bootstrap-pass").await.unwrap());
    assert!(!accounts.service.ensure_admin("root", "bootstrap-pass").await.unwrap());

    let response = accounts
        .send(
            "POST",
            "/auth/admins/sign-in",
            None,
            Some(json!({ "login": "root", "password": "bootstrap-pass" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let admin: AdminAuth = json_body(response.into_body()).await;
    assert_eq!(admin.admin.login, "root");

    let body = json!({ "login": "moderator", "password": "moderator-pass" });
    let response = accounts.send("POST", "/admins", Some(&admin.token), Some(body.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = accounts.send("POST", "/admins", Some(&admin.token), Some(body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
