use sea_orm::entity::prelude::*;

use crate::models::{Buyer, Credentials};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "buyers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Credentials<Buyer> {
    fn from(model: Model) -> Self {
        Self {
            account: Buyer {
                id: model.id,
                name: model.name,
                email: model.email,
                created_at: model.created_at.into(),
            },
            password_hash: model.password_hash,
        }
    }
}

impl From<Model> for Buyer {
    fn from(model: Model) -> Self {
        Credentials::<Buyer>::from(model).account
    }
}
