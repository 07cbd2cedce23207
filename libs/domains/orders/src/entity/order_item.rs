use sea_orm::entity::prelude::*;

use crate::models::OrderItem;

/// Sea-ORM Entity for the order_items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub order_id: i32,
    pub item_id: i32,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for OrderItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            item_id: model.item_id,
            seller_id: model.seller_id,
            quantity: model.quantity,
            unit_price: model.unit_price,
            total: model.total,
            created_at: model.created_at.into(),
        }
    }
}
