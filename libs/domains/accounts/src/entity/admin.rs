use sea_orm::entity::prelude::*;

use crate::models::{Admin, Credentials};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub login: String,
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Credentials<Admin> {
    fn from(model: Model) -> Self {
        Self {
            account: Admin {
                id: model.id,
                login: model.login,
                created_at: model.created_at.into(),
            },
            password_hash: model.password_hash,
        }
    }
}
