use sea_orm::entity::prelude::*;

use crate::models::CartItem;

/// Sea-ORM Entity for the cart_items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CartItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            buyer_id: model.buyer_id,
            item_id: model.item_id,
            quantity: model.quantity,
        }
    }
}
