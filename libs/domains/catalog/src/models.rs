use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Kind of reference data, as it appears in `/catalog/{kind}`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    #[strum(serialize = "categories")]
    #[serde(rename = "categories")]
    Category,
    #[strum(serialize = "brands")]
    #[serde(rename = "brands")]
    Brand,
    #[strum(serialize = "materials")]
    #[serde(rename = "materials")]
    Material,
}

impl ReferenceKind {
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Brand => "Brand",
            Self::Material => "Material",
        }
    }
}

/// A category, brand or material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reference {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateReference {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Seller's article number
    pub article: String,
    pub price: f64,
    pub price_with_discount: Option<f64>,
    /// Units in stock
    pub quantity: i32,
    pub length: f64,
    pub width: f64,
    pub height: f64,
    pub weight: f64,
    pub category_id: i32,
    pub brand_id: i32,
    pub material_id: i32,
    pub seller_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemImage {
    pub id: i32,
    pub item_id: i32,
    /// Public URL under `/uploads`
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Item with resolved reference names and its images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemDetails {
    #[serde(flatten)]
    pub item: Item,
    pub category: String,
    pub brand: String,
    pub material: String,
    pub images: Vec<ItemImage>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub article: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0.0))]
    pub price_with_discount: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub length: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub width: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub height: f64,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub weight: f64,
    pub category_id: i32,
    pub brand_id: i32,
    pub material_id: i32,
}

/// Partial update; absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub article: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[validate(range(min = 0.0))]
    pub price_with_discount: Option<f64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0))]
    pub length: Option<f64>,
    #[validate(range(min = 0.0))]
    pub width: Option<f64>,
    #[validate(range(min = 0.0))]
    pub height: Option<f64>,
    #[validate(range(min = 0.0))]
    pub weight: Option<f64>,
    pub category_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub material_id: Option<i32>,
}

/// Item search criteria. Empty lists and zero price bounds match everything.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema, Validate)]
#[serde(default)]
pub struct ItemFilter {
    pub brand_ids: Vec<i32>,
    pub seller_ids: Vec<Uuid>,
    pub category_ids: Vec<i32>,
    pub material_ids: Vec<i32>,
    #[validate(range(min = 0.0))]
    pub min_price: f64,
    #[validate(range(min = 0.0))]
    pub max_price: f64,
    #[validate(range(min = 1, max = 1000))]
    pub limit: u64,
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u64,
}

impl Default for ItemFilter {
    fn default() -> Self {
        Self {
            brand_ids: Vec::new(),
            seller_ids: Vec::new(),
            category_ids: Vec::new(),
            material_ids: Vec::new(),
            min_price: 0.0,
            max_price: 0.0,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl ItemFilter {
    pub fn for_seller(seller_id: Uuid) -> Self {
        Self {
            seller_ids: vec![seller_id],
            limit: 1000,
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        (self.brand_ids.is_empty() || self.brand_ids.contains(&item.brand_id))
            && (self.seller_ids.is_empty() || self.seller_ids.contains(&item.seller_id))
            && (self.category_ids.is_empty() || self.category_ids.contains(&item.category_id))
            && (self.material_ids.is_empty() || self.material_ids.contains(&item.material_id))
            && (self.min_price <= 0.0 || item.price >= self.min_price)
            && (self.max_price <= 0.0 || item.price <= self.max_price)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema, IntoParams, Validate)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 1000))]
    pub limit: u64,
    #[serde(default)]
    #[validate(range(max = MAX_OFFSET))]
    pub offset: u64,
}

/// Multipart form accepted by the image upload endpoint
#[derive(ToSchema)]
pub struct ImageForm {
    /// JPEG, PNG, GIF or WebP file
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
}

/// Postgres takes `OFFSET` as a signed 64-bit value.
const MAX_OFFSET: u64 = i64::MAX as u64;

fn default_limit() -> u64 {
    50
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl From<Pagination> for ItemFilter {
    fn from(page: Pagination) -> Self {
        Self {
            limit: page.limit,
            offset: page.offset,
            ..Self::default()
        }
    }
}

impl Item {
    pub fn new(id: i32, seller_id: Uuid, input: CreateItem) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            article: input.article,
            price: input.price,
            price_with_discount: input.price_with_discount,
            quantity: input.quantity,
            length: input.length,
            width: input.width,
            height: input.height,
            weight: input.weight,
            category_id: input.category_id,
            brand_id: input.brand_id,
            material_id: input.material_id,
            seller_id,
            created_at: Utc::now(),
        }
    }

    pub fn apply_update(&mut self, update: UpdateItem) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(article) = update.article {
            self.article = article;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if update.price_with_discount.is_some() {
            self.price_with_discount = update.price_with_discount;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(length) = update.length {
            self.length = length;
        }
        if let Some(width) = update.width {
            self.width = width;
        }
        if let Some(height) = update.height {
            self.height = height;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(brand_id) = update.brand_id {
            self.brand_id = brand_id;
        }
        if let Some(material_id) = update.material_id {
            self.material_id = material_id;
        }
    }
}

impl UpdateItem {
    /// Reference ids this update would point the item at.
    pub fn references(&self) -> Vec<(ReferenceKind, i32)> {
        [
            (ReferenceKind::Category, self.category_id),
            (ReferenceKind::Brand, self.brand_id),
            (ReferenceKind::Material, self.material_id),
        ]
        .into_iter()
        .filter_map(|(kind, id)| id.map(|id| (kind, id)))
        .collect()
    }
}

impl CreateItem {
    pub fn references(&self) -> Vec<(ReferenceKind, i32)> {
        vec![
            (ReferenceKind::Category, self.category_id),
            (ReferenceKind::Brand, self.brand_id),
            (ReferenceKind::Material, self.material_id),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn item(price: f64, brand_id: i32) -> Item {
        Item::new(
            1,
            Uuid::new_v4(),
            CreateItem {
                name: "Drywall sheet".to_string(),
                description: String::new(),
                article: "GKL-12".to_string(),
                price,
                price_with_discount: None,
                quantity: 10,
                length: 2.5,
                width: 1.2,
                height: 0.0125,
                weight: 29.0,
                category_id: 1,
                brand_id,
                material_id: 1,
            },
        )
    }

    #[test]
    fn test_reference_kind_parses_path_segment() {
        assert_eq!(
            ReferenceKind::from_str("categories").unwrap(),
            ReferenceKind::Category
        );
        assert_eq!(ReferenceKind::Brand.to_string(), "brands");
        assert!(ReferenceKind::from_str("colors").is_err());
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        assert!(ItemFilter::default().matches(&item(450.0, 3)));
    }

    #[test]
    fn test_filter_ignores_zero_price_bounds() {
        let filter = ItemFilter {
            brand_ids: vec![3],
            min_price: 0.0,
            max_price: 0.0,
            ..ItemFilter::default()
        };
        assert!(filter.matches(&item(450.0, 3)));
        assert!(!filter.matches(&item(450.0, 4)));
    }

    #[test]
    fn test_filter_price_range_is_inclusive() {
        let filter = ItemFilter {
            min_price: 100.0,
            max_price: 450.0,
            ..ItemFilter::default()
        };
        assert!(filter.matches(&item(100.0, 1)));
        assert!(filter.matches(&item(450.0, 1)));
        assert!(!filter.matches(&item(450.01, 1)));
        assert!(!filter.matches(&item(99.99, 1)));
    }

    #[test]
    fn test_apply_update_keeps_absent_fields() {
        let mut item = item(450.0, 3);
        item.apply_update(UpdateItem {
            price: Some(399.0),
            quantity: Some(0),
            ..UpdateItem::default()
        });

        assert_eq!(item.price, 399.0);
        assert_eq!(item.quantity, 0);
        assert_eq!(item.name, "Drywall sheet");
        assert_eq!(item.brand_id, 3);
    }
}
