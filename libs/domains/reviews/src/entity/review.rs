use sea_orm::entity::prelude::*;

use crate::models::Review;

/// Sea-ORM Entity for the reviews table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub item_id: i32,
    pub buyer_id: Uuid,
    pub rating: i32,
    #[sea_orm(column_type = "Text")]
    pub comment: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Review {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            item_id: model.item_id,
            buyer_id: model.buyer_id,
            rating: model.rating,
            comment: model.comment,
            created_at: model.created_at.into(),
        }
    }
}
