use domain_catalog::ItemRepository;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ReviewError, ReviewResult};
use crate::models::{CreateReview, ItemReviews, Review};
use crate::repository::ReviewRepository;

pub struct ReviewService<R: ReviewRepository, I: ItemRepository> {
    repository: Arc<R>,
    items: Arc<I>,
}

impl<R: ReviewRepository, I: ItemRepository> Clone for ReviewService<R, I> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            items: Arc::clone(&self.items),
        }
    }
}

impl<R: ReviewRepository, I: ItemRepository> ReviewService<R, I> {
    pub fn new(repository: R, items: I) -> Self {
        Self {
            repository: Arc::new(repository),
            items: Arc::new(items),
        }
    }

    async fn ensure_item(&self, item_id: i32) -> ReviewResult<()> {
        match self.items.get_by_id(item_id).await? {
            Some(_) => Ok(()),
            None => Err(ReviewError::ItemNotFound(item_id)),
        }
    }

    pub async fn create_review(
        &self,
        buyer_id: Uuid,
        mut input: CreateReview,
    ) -> ReviewResult<Review> {
        input
            .validate()
            .map_err(|e| ReviewError::Validation(e.to_string()))?;
        self.ensure_item(input.item_id).await?;

        input.comment = input.comment.trim().to_string();
        self.repository.create(buyer_id, input).await
    }

    pub async fn item_reviews(&self, item_id: i32) -> ReviewResult<ItemReviews> {
        self.ensure_item(item_id).await?;
        let reviews = self.repository.list_for_item(item_id).await?;
        Ok(ItemReviews::new(item_id, reviews))
    }
}
