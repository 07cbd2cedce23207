use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ReviewResult;
use crate::models::{CreateReview, Review};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, buyer_id: Uuid, input: CreateReview) -> ReviewResult<Review>;

    /// Reviews of an item, newest first
    async fn list_for_item(&self, item_id: i32) -> ReviewResult<Vec<Review>>;
}

/// In-memory implementation of ReviewRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryReviewRepository {
    reviews: Arc<RwLock<Vec<Review>>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn create(&self, buyer_id: Uuid, input: CreateReview) -> ReviewResult<Review> {
        let mut reviews = self.reviews.write().await;
        let review = Review {
            id: reviews.len() as i32 + 1,
            item_id: input.item_id,
            buyer_id,
            rating: input.rating,
            comment: input.comment,
            created_at: Utc::now(),
        };
        reviews.push(review.clone());

        tracing::info!(review_id = review.id, item_id = review.item_id, "Created review");
        Ok(review)
    }

    async fn list_for_item(&self, item_id: i32) -> ReviewResult<Vec<Review>> {
        let reviews = self.reviews.read().await;
        Ok(reviews
            .iter()
            .rev()
            .filter(|r| r.item_id == item_id)
            .cloned()
            .collect())
    }
}
