use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CreateItem, CreateReference, Item, ItemDetails, ItemFilter, ItemImage, Reference,
    ReferenceKind, UpdateItem,
};
use crate::repository::{ItemRepository, ReferenceRepository};
use crate::storage::{ImageStore, ensure_image, image_file_name};

/// Reference data (categories, brands, materials)
#[derive(Clone)]
pub struct ReferenceService<R: ReferenceRepository> {
    repository: Arc<R>,
}

impl<R: ReferenceRepository> ReferenceService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn list(&self, kind: ReferenceKind) -> CatalogResult<Vec<Reference>> {
        self.repository.list(kind).await
    }

    pub async fn create(
        &self,
        kind: ReferenceKind,
        input: CreateReference,
    ) -> CatalogResult<Reference> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;

        self.repository.create(kind, input.name.trim().to_string()).await
    }

    pub async fn delete(&self, kind: ReferenceKind, id: i32) -> CatalogResult<()> {
        if !self.repository.delete(kind, id).await? {
            return Err(CatalogError::ReferenceNotFound { kind, id });
        }
        Ok(())
    }
}

/// An image as received from a multipart upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Items, their ownership and images
pub struct ItemService<I: ItemRepository, R: ReferenceRepository, S: ImageStore> {
    items: Arc<I>,
    references: Arc<R>,
    images: Arc<S>,
}

impl<I: ItemRepository, R: ReferenceRepository, S: ImageStore> Clone for ItemService<I, R, S> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            references: Arc::clone(&self.references),
            images: Arc::clone(&self.images),
        }
    }
}

impl<I: ItemRepository, R: ReferenceRepository, S: ImageStore> ItemService<I, R, S> {
    pub fn new(items: I, references: R, images: S) -> Self {
        Self {
            items: Arc::new(items),
            references: Arc::new(references),
            images: Arc::new(images),
        }
    }

    async fn ensure_references(&self, references: Vec<(ReferenceKind, i32)>) -> CatalogResult<()> {
        for (kind, id) in references {
            if self.references.get(kind, id).await?.is_none() {
                return Err(CatalogError::ReferenceNotFound { kind, id });
            }
        }
        Ok(())
    }

    /// Fetch an item and check it belongs to `seller_id`
    async fn owned_item(&self, seller_id: Uuid, id: i32) -> CatalogResult<Item> {
        let item = self
            .items
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::ItemNotFound(id))?;

        if item.seller_id != seller_id {
            tracing::warn!(item_id = id, seller_id = %seller_id, "Seller does not own item");
            return Err(CatalogError::NotOwner(id));
        }
        Ok(item)
    }

    pub async fn create_item(&self, seller_id: Uuid, input: CreateItem) -> CatalogResult<Item> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.ensure_references(input.references()).await?;

        self.items.create(seller_id, input).await
    }

    pub async fn get_item(&self, id: i32) -> CatalogResult<ItemDetails> {
        self.items
            .get_details(id)
            .await?
            .ok_or(CatalogError::ItemNotFound(id))
    }

    pub async fn update_item(
        &self,
        seller_id: Uuid,
        id: i32,
        input: UpdateItem,
    ) -> CatalogResult<Item> {
        input
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.owned_item(seller_id, id).await?;
        self.ensure_references(input.references()).await?;

        self.items.update(id, input).await
    }

    pub async fn list_items(&self, filter: ItemFilter) -> CatalogResult<Vec<Item>> {
        filter
            .validate()
            .map_err(|e| CatalogError::Validation(e.to_string()))?;
        self.items.list(filter).await
    }

    pub async fn upload_image(
        &self,
        seller_id: Uuid,
        item_id: i32,
        upload: ImageUpload,
    ) -> CatalogResult<ItemImage> {
        self.owned_item(seller_id, item_id).await?;

        let ext = ensure_image(upload.content_type.as_deref())?;
        if upload.data.is_empty() {
            return Err(CatalogError::InvalidImage("empty file".to_string()));
        }

        let file_name = image_file_name(item_id, Utc::now().timestamp(), ext);
        let url = self.images.save(&file_name, &upload.data).await?;

        self.items.add_image(item_id, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{MockItemRepository, MockReferenceRepository};
    use crate::storage::InMemoryImageStore;
    use mockall::predicate::eq;

    fn input() -> CreateItem {
        CreateItem {
            name: "Ceramic tile 30x30".to_string(),
            description: String::new(),
            article: "CT-3030".to_string(),
            price: 35.5,
            price_with_discount: None,
            quantity: 500,
            length: 0.3,
            width: 0.3,
            height: 0.008,
            weight: 1.2,
            category_id: 1,
            brand_id: 2,
            material_id: 3,
        }
    }

    fn item(seller_id: Uuid) -> Item {
        Item::new(10, seller_id, input())
    }

    fn all_references_exist() -> MockReferenceRepository {
        let mut references = MockReferenceRepository::new();
        references.expect_get().returning(|_, id| {
            Ok(Some(Reference {
                id,
                name: "ref".to_string(),
            }))
        });
        references
    }

    #[tokio::test]
    async fn test_create_item_with_unknown_brand() {
        let mut references = MockReferenceRepository::new();
        references
            .expect_get()
            .returning(|kind, id| {
                Ok((kind != ReferenceKind::Brand).then(|| Reference {
                    id,
                    name: "ref".to_string(),
                }))
            });
        let mut items = MockItemRepository::new();
        items.expect_create().never();

        let service = ItemService::new(items, references, InMemoryImageStore::new());
        let result = service.create_item(Uuid::new_v4(), input()).await;

        assert!(matches!(
            result,
            Err(CatalogError::ReferenceNotFound {
                kind: ReferenceKind::Brand,
                id: 2
            })
        ));
    }

    #[tokio::test]
    async fn test_create_item_uses_seller_from_caller() {
        let seller_id = Uuid::new_v4();
        let mut items = MockItemRepository::new();
        items
            .expect_create()
            .withf(move |id, _| *id == seller_id)
            .returning(|seller_id, input| Ok(Item::new(1, seller_id, input)));

        let service = ItemService::new(items, all_references_exist(), InMemoryImageStore::new());
        let created = service.create_item(seller_id, input()).await.unwrap();

        assert_eq!(created.seller_id, seller_id);
    }

    #[tokio::test]
    async fn test_create_item_rejects_negative_price() {
        let service = ItemService::new(
            MockItemRepository::new(),
            MockReferenceRepository::new(),
            InMemoryImageStore::new(),
        );
        let mut bad = input();
        bad.price = -1.0;

        let result = service.create_item(Uuid::new_v4(), bad).await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_item_of_another_seller() {
        let owner = Uuid::new_v4();
        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .with(eq(10))
            .returning(move |_| Ok(Some(item(owner))));
        items.expect_update().never();

        let service = ItemService::new(items, all_references_exist(), InMemoryImageStore::new());
        let result = service
            .update_item(Uuid::new_v4(), 10, UpdateItem::default())
            .await;

        assert!(matches!(result, Err(CatalogError::NotOwner(10))));
    }

    #[tokio::test]
    async fn test_update_missing_item() {
        let mut items = MockItemRepository::new();
        items.expect_get_by_id().returning(|_| Ok(None));

        let service = ItemService::new(items, all_references_exist(), InMemoryImageStore::new());
        let result = service
            .update_item(Uuid::new_v4(), 77, UpdateItem::default())
            .await;

        assert!(matches!(result, Err(CatalogError::ItemNotFound(77))));
    }

    #[tokio::test]
    async fn test_upload_image_stores_file_and_records_url() {
        let owner = Uuid::new_v4();
        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .returning(move |_| Ok(Some(item(owner))));
        items.expect_add_image().returning(|item_id, url| {
            Ok(ItemImage {
                id: 1,
                item_id,
                url,
                created_at: Utc::now(),
            })
        });
        let store = InMemoryImageStore::new();

        let service = ItemService::new(items, MockReferenceRepository::new(), store.clone());
        let image = service
            .upload_image(
                owner,
                10,
                ImageUpload {
                    content_type: Some("image/png".to_string()),
                    data: b"\x89PNG".to_vec(),
                },
            )
            .await
            .unwrap();

        assert!(image.url.starts_with("/uploads/10_"));
        assert!(image.url.ends_with(".png"));
        let file_name = image.url.trim_start_matches("/uploads/");
        assert!(store.get(file_name).await.is_some());
    }

    #[tokio::test]
    async fn test_upload_rejects_non_image() {
        let owner = Uuid::new_v4();
        let mut items = MockItemRepository::new();
        items
            .expect_get_by_id()
            .returning(move |_| Ok(Some(item(owner))));
        items.expect_add_image().never();

        let service = ItemService::new(
            items,
            MockReferenceRepository::new(),
            InMemoryImageStore::new(),
        );
        let result = service
            .upload_image(
                owner,
                10,
                ImageUpload {
                    content_type: Some("application/pdf".to_string()),
                    data: b"%PDF".to_vec(),
                },
            )
            .await;

        assert!(matches!(result, Err(CatalogError::InvalidImage(_))));
    }

    #[tokio::test]
    async fn test_delete_missing_reference() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_delete()
            .with(eq(ReferenceKind::Material), eq(5))
            .returning(|_, _| Ok(false));

        let service = ReferenceService::new(repo);
        let result = service.delete(ReferenceKind::Material, 5).await;

        assert!(matches!(
            result,
            Err(CatalogError::ReferenceNotFound {
                kind: ReferenceKind::Material,
                id: 5
            })
        ));
    }

    #[tokio::test]
    async fn test_create_reference_trims_name() {
        let mut repo = MockReferenceRepository::new();
        repo.expect_create()
            .with(eq(ReferenceKind::Category), eq("Roofing".to_string()))
            .returning(|_, name| Ok(Reference { id: 1, name }));

        let service = ReferenceService::new(repo);
        let created = service
            .create(
                ReferenceKind::Category,
                CreateReference {
                    name: "  Roofing ".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.name, "Roofing");
    }
}
