//! Integration tests for the accounts domain
//!
//! Run against real PostgreSQL via testcontainers with the workspace
//! migrations applied. Docker is required:
//! `cargo test -p domain_accounts -- --ignored`

use domain_accounts::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn new_seller(builder: &TestDataBuilder) -> NewSeller {
    NewSeller {
        name: builder.name("seller", "pg"),
        email: builder.email("seller"),
        shop_name: "Bricks & Mortar".to_string(),
        password_hash: "$argon2id$v=19$not-a-real-hash".to_string(),
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seller_roundtrip_and_unique_email() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("accounts_seller_roundtrip");
    let repo = PgAccountRepository::new(db.connection());

    let seller = repo.create_seller(new_seller(&builder)).await.unwrap();
    assert_eq!(seller.balance, 0.0);

    let found = assert_some(
        repo.find_seller_by_email(&builder.email("seller")).await.unwrap(),
        "seller should be found by email",
    );
    assert_uuid_eq(found.account.id, seller.id, "seller id");
    assert!(found.password_hash.starts_with("$argon2id$"));

    let duplicate = repo.create_seller(new_seller(&builder)).await;
    assert!(matches!(duplicate, Err(AccountError::EmailTaken(_))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_seller_keeps_absent_fields() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("accounts_update_seller");
    let repo = PgAccountRepository::new(db.connection());
    let seller = repo.create_seller(new_seller(&builder)).await.unwrap();

    let updated = repo
        .update_seller(
            seller.id,
            SellerChanges {
                shop_name: Some("Stone Age".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.shop_name, "Stone Age");
    assert_eq!(updated.email, seller.email);
    assert_eq!(updated.name, seller.name);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_favorites_are_idempotent_and_ordered() {
    let db = TestDatabase::new().await;
    let seller_id = db.create_seller(uuid::Uuid::new_v4()).await;
    let buyer_id = db.create_buyer(uuid::Uuid::new_v4()).await;
    let first = db.create_item(seller_id, 10.0, 1).await;
    let second = db.create_item(seller_id, 20.0, 1).await;
    let repo = PgAccountRepository::new(db.connection());

    repo.add_favorite(buyer_id, second).await.unwrap();
    repo.add_favorite(buyer_id, first).await.unwrap();
    repo.add_favorite(buyer_id, second).await.unwrap();

    assert_eq!(repo.favorite_item_ids(buyer_id).await.unwrap(), vec![second, first]);

    assert!(repo.remove_favorite(buyer_id, second).await.unwrap());
    assert!(!repo.remove_favorite(buyer_id, second).await.unwrap());
    assert_eq!(repo.favorite_item_ids(buyer_id).await.unwrap(), vec![first]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_favorite_unknown_item_is_not_found() {
    let db = TestDatabase::new().await;
    let buyer_id = db.create_buyer(uuid::Uuid::new_v4()).await;
    let repo = PgAccountRepository::new(db.connection());

    let result = repo.add_favorite(buyer_id, 4242).await;
    assert!(matches!(result, Err(AccountError::ItemNotFound(4242))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_admin_login_is_unique() {
    let db = TestDatabase::new().await;
    let repo = PgAccountRepository::new(db.connection());

    let admin = repo
        .create_admin("root".to_string(), "hash".to_string())
        .await
        .unwrap();
    let found = assert_some(repo.find_admin("root").await.unwrap(), "admin should exist");
    assert_uuid_eq(found.account.id, admin.id, "admin id");

    let duplicate = repo.create_admin("root".to_string(), "hash".to_string()).await;
    assert!(matches!(duplicate, Err(AccountError::LoginTaken(_))));
}
