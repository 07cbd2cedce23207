use sea_orm::entity::prelude::*;

use crate::models::{Order, OrderItem};

/// Sea-ORM Entity for the orders table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub buyer_id: Uuid,
    pub total: f64,
    pub status: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_item::Entity")]
    Items,
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_order(self, items: Vec<OrderItem>) -> Order {
        Order {
            id: self.id,
            buyer_id: self.buyer_id,
            total: self.total,
            // Unknown statuses read back as processing
            status: self.status.parse().unwrap_or_default(),
            created_at: self.created_at.into(),
            items,
        }
    }
}
