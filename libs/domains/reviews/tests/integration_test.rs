//! Integration tests for the reviews domain
//!
//! Run against real PostgreSQL via testcontainers with the workspace
//! migrations applied. Docker is required:
//! `cargo test -p domain_reviews -- --ignored`

use domain_reviews::*;
use test_utils::{TestDataBuilder, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_reviews_roundtrip() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("reviews_roundtrip");
    let seller = db.create_seller(uuid::Uuid::new_v4()).await;
    let buyer = db.create_buyer(builder.user_id()).await;
    let item_id = db.create_item(seller, 9.5, 3).await;
    let repo = PgReviewRepository::new(db.connection());

    for rating in [3, 5] {
        repo.create(
            buyer,
            CreateReview {
                item_id,
                rating,
                comment: format!("{rating}/5"),
            },
        )
        .await
        .unwrap();
    }

    let reviews = repo.list_for_item(item_id).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert_eq!(reviews[0].rating, 5);
    assert_eq!(ItemReviews::new(item_id, reviews).average_rating, Some(4.0));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_review_unknown_item() {
    let db = TestDatabase::new().await;
    let buyer = db.create_buyer(uuid::Uuid::new_v4()).await;
    let repo = PgReviewRepository::new(db.connection());

    let result = repo
        .create(
            buyer,
            CreateReview {
                item_id: 31337,
                rating: 4,
                comment: String::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(ReviewError::ItemNotFound(31337))));
}
