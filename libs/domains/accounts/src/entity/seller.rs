use sea_orm::entity::prelude::*;

use crate::models::{Credentials, Seller};

/// Sea-ORM Entity for the sellers table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sellers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub shop_name: String,
    pub balance: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Credentials<Seller> {
    fn from(model: Model) -> Self {
        Self {
            account: Seller {
                id: model.id,
                name: model.name,
                email: model.email,
                shop_name: model.shop_name,
                balance: model.balance,
                created_at: model.created_at.into(),
            },
            password_hash: model.password_hash,
        }
    }
}

impl From<Model> for Seller {
    fn from(model: Model) -> Self {
        Credentials::<Seller>::from(model).account
    }
}
