use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::review,
    error::{ReviewError, ReviewResult},
    models::{CreateReview, Review},
    repository::ReviewRepository,
};

#[derive(Clone)]
pub struct PgReviewRepository {
    db: DatabaseConnection,
}

impl PgReviewRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, buyer_id: Uuid, input: CreateReview) -> ReviewResult<Review> {
        let item_id = input.item_id;
        let model = review::ActiveModel {
            item_id: Set(input.item_id),
            buyer_id: Set(buyer_id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|err| match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => ReviewError::ItemNotFound(item_id),
            _ => ReviewError::Database(err),
        })?;

        tracing::info!(review_id = model.id, item_id, "Created review");
        Ok(model.into())
    }

    async fn list_for_item(&self, item_id: i32) -> ReviewResult<Vec<Review>> {
        let rows = review::Entity::find()
            .filter(review::Column::ItemId.eq(item_id))
            .order_by_desc(review::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
