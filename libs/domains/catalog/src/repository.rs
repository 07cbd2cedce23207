use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{
    CreateItem, Item, ItemDetails, ItemFilter, ItemImage, Reference, ReferenceKind, UpdateItem,
};

/// Persistence for categories, brands and materials
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    async fn create(&self, kind: ReferenceKind, name: String) -> CatalogResult<Reference>;

    /// All references of a kind ordered by id
    async fn list(&self, kind: ReferenceKind) -> CatalogResult<Vec<Reference>>;

    async fn get(&self, kind: ReferenceKind, id: i32) -> CatalogResult<Option<Reference>>;

    /// Delete a reference; fails with `ReferenceInUse` while items point at it
    async fn delete(&self, kind: ReferenceKind, id: i32) -> CatalogResult<bool>;
}

/// Persistence for items and their images
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn create(&self, seller_id: Uuid, input: CreateItem) -> CatalogResult<Item>;

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Item>>;

    /// Item with reference names and images
    async fn get_details(&self, id: i32) -> CatalogResult<Option<ItemDetails>>;

    async fn update(&self, id: i32, input: UpdateItem) -> CatalogResult<Item>;

    /// Items matching the filter, newest first
    async fn list(&self, filter: ItemFilter) -> CatalogResult<Vec<Item>>;

    /// Items with the given ids; unknown ids are skipped
    async fn find_by_ids(&self, ids: Vec<i32>) -> CatalogResult<Vec<Item>>;

    async fn add_image(&self, item_id: i32, url: String) -> CatalogResult<ItemImage>;
}

#[derive(Debug, Default)]
struct CatalogState {
    references: HashMap<ReferenceKind, BTreeMap<i32, Reference>>,
    items: BTreeMap<i32, Item>,
    images: Vec<ItemImage>,
    next_reference_id: i32,
    next_item_id: i32,
    next_image_id: i32,
}

impl CatalogState {
    fn reference_name(&self, kind: ReferenceKind, id: i32) -> String {
        self.references
            .get(&kind)
            .and_then(|refs| refs.get(&id))
            .map(|r| r.name.clone())
            .unwrap_or_default()
    }

    fn is_referenced(&self, kind: ReferenceKind, id: i32) -> bool {
        self.items.values().any(|item| match kind {
            ReferenceKind::Category => item.category_id == id,
            ReferenceKind::Brand => item.brand_id == id,
            ReferenceKind::Material => item.material_id == id,
        })
    }
}

/// In-memory implementation of ReferenceRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryReferenceRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryReferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReferenceRepository for InMemoryReferenceRepository {
    async fn create(&self, kind: ReferenceKind, name: String) -> CatalogResult<Reference> {
        let mut state = self.state.write().await;
        state.next_reference_id += 1;
        let reference = Reference {
            id: state.next_reference_id,
            name,
        };
        state
            .references
            .entry(kind)
            .or_default()
            .insert(reference.id, reference.clone());

        tracing::info!(kind = %kind, reference_id = reference.id, "Created reference");
        Ok(reference)
    }

    async fn list(&self, kind: ReferenceKind) -> CatalogResult<Vec<Reference>> {
        let state = self.state.read().await;
        Ok(state
            .references
            .get(&kind)
            .map(|refs| refs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get(&self, kind: ReferenceKind, id: i32) -> CatalogResult<Option<Reference>> {
        let state = self.state.read().await;
        Ok(state.references.get(&kind).and_then(|refs| refs.get(&id)).cloned())
    }

    async fn delete(&self, kind: ReferenceKind, id: i32) -> CatalogResult<bool> {
        let mut state = self.state.write().await;
        if state.is_referenced(kind, id) {
            return Err(CatalogError::ReferenceInUse { kind, id });
        }

        let removed = state
            .references
            .get_mut(&kind)
            .and_then(|refs| refs.remove(&id))
            .is_some();
        if removed {
            tracing::info!(kind = %kind, reference_id = id, "Deleted reference");
        }
        Ok(removed)
    }
}

/// In-memory implementation of ItemRepository.
///
/// Shares its state with the reference repository it was built from so
/// details can resolve reference names and references in use are protected.
#[derive(Debug, Clone)]
pub struct InMemoryItemRepository {
    state: Arc<RwLock<CatalogState>>,
}

impl InMemoryItemRepository {
    pub fn new(references: InMemoryReferenceRepository) -> Self {
        Self {
            state: references.state,
        }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, seller_id: Uuid, input: CreateItem) -> CatalogResult<Item> {
        let mut state = self.state.write().await;
        state.next_item_id += 1;
        let item = Item::new(state.next_item_id, seller_id, input);
        state.items.insert(item.id, item.clone());

        tracing::info!(item_id = item.id, seller_id = %seller_id, "Created item");
        Ok(item)
    }

    async fn get_by_id(&self, id: i32) -> CatalogResult<Option<Item>> {
        let state = self.state.read().await;
        Ok(state.items.get(&id).cloned())
    }

    async fn get_details(&self, id: i32) -> CatalogResult<Option<ItemDetails>> {
        let state = self.state.read().await;
        let Some(item) = state.items.get(&id).cloned() else {
            return Ok(None);
        };

        Ok(Some(ItemDetails {
            category: state.reference_name(ReferenceKind::Category, item.category_id),
            brand: state.reference_name(ReferenceKind::Brand, item.brand_id),
            material: state.reference_name(ReferenceKind::Material, item.material_id),
            images: state
                .images
                .iter()
                .filter(|image| image.item_id == id)
                .cloned()
                .collect(),
            item,
        }))
    }

    async fn update(&self, id: i32, input: UpdateItem) -> CatalogResult<Item> {
        let mut state = self.state.write().await;
        let item = state.items.get_mut(&id).ok_or(CatalogError::ItemNotFound(id))?;
        item.apply_update(input);

        tracing::info!(item_id = id, "Updated item");
        Ok(item.clone())
    }

    async fn list(&self, filter: ItemFilter) -> CatalogResult<Vec<Item>> {
        let state = self.state.read().await;
        Ok(state
            .items
            .values()
            .rev()
            .filter(|item| filter.matches(item))
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }

    async fn find_by_ids(&self, ids: Vec<i32>) -> CatalogResult<Vec<Item>> {
        let state = self.state.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.items.get(id))
            .cloned()
            .collect())
    }

    async fn add_image(&self, item_id: i32, url: String) -> CatalogResult<ItemImage> {
        let mut state = self.state.write().await;
        if !state.items.contains_key(&item_id) {
            return Err(CatalogError::ItemNotFound(item_id));
        }
        state.next_image_id += 1;
        let image = ItemImage {
            id: state.next_image_id,
            item_id,
            url,
            created_at: Utc::now(),
        };
        state.images.push(image.clone());

        tracing::info!(item_id, image_id = image.id, "Attached image to item");
        Ok(image)
    }
}
