use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{CreateItem, Item};

/// Sea-ORM Entity for the items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub article: String,
    pub price: f64,
    pub price_with_discount: Option<f64>,
    pub quantity: i32,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub category_id: i32,
    pub brand_id: i32,
    pub material_id: i32,
    pub seller_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
    #[sea_orm(has_many = "super::item_image::Entity")]
    Images,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

impl Related<super::item_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Images.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            article: model.article,
            price: model.price,
            price_with_discount: model.price_with_discount,
            quantity: model.quantity,
            length: model.length,
            width: model.width,
            height: model.height,
            weight: model.weight,
            category_id: model.category_id,
            brand_id: model.brand_id,
            material_id: model.material_id,
            seller_id: model.seller_id,
            created_at: model.created_at.into(),
        }
    }
}

impl ActiveModel {
    pub fn for_seller(seller_id: Uuid, input: CreateItem) -> Self {
        Self {
            name: Set(input.name),
            description: Set(input.description),
            article: Set(input.article),
            price: Set(input.price),
            price_with_discount: Set(input.price_with_discount),
            quantity: Set(input.quantity),
            length: Set(input.length),
            width: Set(input.width),
            height: Set(input.height),
            weight: Set(input.weight),
            category_id: Set(input.category_id),
            brand_id: Set(input.brand_id),
            material_id: Set(input.material_id),
            seller_id: Set(seller_id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
    }
}
