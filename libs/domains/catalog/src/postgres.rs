use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{brand, category, item, item_image, material},
    error::{CatalogError, CatalogResult},
    models::{
        CreateItem, Item, ItemDetails, ItemFilter, ItemImage, Reference, ReferenceKind, UpdateItem,
    },
    repository::{ItemRepository, ReferenceRepository},
};

#[derive(Clone)]
pub struct PgReferenceRepository {
    db: DatabaseConnection,
}

impl PgReferenceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn in_use_or(kind: ReferenceKind, id: i32, err: DbErr) -> CatalogError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => CatalogError::ReferenceInUse { kind, id },
        _ => CatalogError::Database(err),
    }
}

#[async_trait]
impl ReferenceRepository for PgReferenceRepository {
    async fn create(&self, kind: ReferenceKind, name: String) -> CatalogResult<Reference> {
        let reference: Reference = match kind {
            ReferenceKind::Category => category::ActiveModel {
                name: Set(name),
                ..Default::default()
            }
            .insert(&self.db)
            .await?
            .into(),
            ReferenceKind::Brand => brand::ActiveModel {
                name: Set(name),
                ..Default::default()
            }
            .insert(&self.db)
            .await?
            .into(),
            ReferenceKind::Material => material::ActiveModel {
                name: Set(name),
                ..Default::default()
            }
            .insert(&self.db)
            .await?
            .into(),
        };

        tracing::info!(kind = %kind, reference_id = reference.id, "Created reference");
        Ok(reference)
    }

    async fn list(&self, kind: ReferenceKind) -> CatalogResult<Vec<Reference>> {
        let references = match kind {
            ReferenceKind::Category => category::Entity::find()
                .order_by_asc(category::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Reference::from)
                .collect(),
            ReferenceKind::Brand => brand::Entity::find()
                .order_by_asc(brand::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Reference::from)
                .collect(),
            ReferenceKind::Material => material::Entity::find()
                .order_by_asc(material::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Reference::from)
                .collect(),
        };
        Ok(references)
    }

    async fn get(&self, kind: ReferenceKind, id: i32) -> CatalogResult<Option<Reference>> {
        let reference = match kind {
            ReferenceKind::Category => category::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Reference::from),
            ReferenceKind::Brand => brand::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Reference::from),
            ReferenceKind::Material => material::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Reference::from),
        };
        Ok(reference)
    }

    async fn delete(&self, kind: ReferenceKind, id: i32) -> CatalogResult<bool> {
        let result = match kind {
            ReferenceKind::Category => category::Entity::delete_by_id(id).exec(&self.db).await,
            ReferenceKind::Brand => brand::Entity::delete_by_id(id).exec(&self.db).await,
            ReferenceKind::Material => material::Entity::delete_by_id(id).exec(&self.db).await,
        }
        .map_err(|e| in_use_or(kind, id, e))?;

        if result.rows_affected > 0 {
            tracing::info!(kind = %kind, reference_id = id, "Deleted reference");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, seller_id: Uuid, input: CreateItem) -> CatalogResult<Item> {
        let model = item::ActiveModel::for_seller(seller_id, input)
            .insert(&self.db)
            .await?;

        tracing::info!(item_id = model.id, seller_id = %seller_id, "Created item");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Item>> {
        let model = item::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_details(&self, id: i32) -> CatalogResult<Option<ItemDetails>> {
        let Some(model) = item::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let category = category::Entity::find_by_id(model.category_id)
            .one(&self.db)
            .await?
            .map(|m| m.name)
            .unwrap_or_default();
        let brand = brand::Entity::find_by_id(model.brand_id)
            .one(&self.db)
            .await?
            .map(|m| m.name)
            .unwrap_or_default();
        let material = material::Entity::find_by_id(model.material_id)
            .one(&self.db)
            .await?
            .map(|m| m.name)
            .unwrap_or_default();
        let images = item_image::Entity::find()
            .filter(item_image::Column::ItemId.eq(id))
            .order_by_asc(item_image::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(ItemImage::from)
            .collect();

        Ok(Some(ItemDetails {
            item: model.into(),
            category,
            brand,
            material,
            images,
        }))
    }

    async fn update(&self, id: i32, input: UpdateItem) -> CatalogResult<Item> {
        let model = item::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::ItemNotFound(id))?;

        let mut updated: Item = model.clone().into();
        updated.apply_update(input);

        let mut active: item::ActiveModel = model.into();
        active.name = Set(updated.name);
        active.description = Set(updated.description);
        active.article = Set(updated.article);
        active.price = Set(updated.price);
        active.price_with_discount = Set(updated.price_with_discount);
        active.quantity = Set(updated.quantity);
        active.length = Set(updated.length);
        active.width = Set(updated.width);
        active.height = Set(updated.height);
        active.weight = Set(updated.weight);
        active.category_id = Set(updated.category_id);
        active.brand_id = Set(updated.brand_id);
        active.material_id = Set(updated.material_id);

        let model = active.update(&self.db).await?;

        tracing::info!(item_id = id, "Updated item");
        Ok(model.into())
    }

    async fn list(&self, filter: ItemFilter) -> CatalogResult<Vec<Item>> {
        let mut query = item::Entity::find();

        if !filter.brand_ids.is_empty() {
            query = query.filter(item::Column::BrandId.is_in(filter.brand_ids.clone()));
        }
        if !filter.seller_ids.is_empty() {
            query = query.filter(item::Column::SellerId.is_in(filter.seller_ids.clone()));
        }
        if !filter.category_ids.is_empty() {
            query = query.filter(item::Column::CategoryId.is_in(filter.category_ids.clone()));
        }
        if !filter.material_ids.is_empty() {
            query = query.filter(item::Column::MaterialId.is_in(filter.material_ids.clone()));
        }
        if filter.min_price > 0.0 {
            query = query.filter(item::Column::Price.gte(filter.min_price));
        }
        if filter.max_price > 0.0 {
            query = query.filter(item::Column::Price.lte(filter.max_price));
        }

        let models = query
            .order_by_desc(item::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> CatalogResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = item::Entity::find()
            .filter(item::Column::Id.is_in(ids))
            .order_by_asc(item::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn add_image(&self, item_id: i32, url: String) -> CatalogResult<ItemImage> {
        if item::Entity::find_by_id(item_id).one(&self.db).await?.is_none() {
            return Err(CatalogError::ItemNotFound(item_id));
        }

        let model = item_image::ActiveModel {
            item_id: Set(item_id),
            url: Set(url),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        tracing::info!(item_id, image_id = model.id, "Attached image to item");
        Ok(model.into())
    }
}
