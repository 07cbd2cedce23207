use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// One stored cart row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub buyer_id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
}

/// Cart row joined with the item it points at
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub item_id: i32,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Cart {
    pub buyer_id: Uuid,
    pub items: Vec<CartLine>,
    pub total: f64,
}

impl Cart {
    pub fn new(buyer_id: Uuid, items: Vec<CartLine>) -> Self {
        let total = items.iter().map(|line| line.total).sum();
        Self {
            buyer_id,
            items,
            total,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct AddToCart {
    #[validate(range(min = 1))]
    pub item_id: i32,
    #[validate(range(min = 1, max = 10000))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateCartItem {
    #[validate(range(min = 1, max = 10000))]
    pub quantity: i32,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema, Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Processing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub item_id: i32,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i32,
    pub buyer_id: Uuid,
    pub total: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// Priced cart line handed to the repository when an order is placed
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub item_id: i32,
    pub seller_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub total: f64,
}

impl OrderLine {
    pub fn new(item_id: i32, seller_id: Uuid, quantity: i32, unit_price: f64) -> Self {
        Self {
            item_id,
            seller_id,
            quantity,
            unit_price,
            total: unit_price * f64::from(quantity),
        }
    }
}

/// Half-open time window `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Window {
    /// `[now-7d, now)` and `[now-14d, now-7d)`
    pub fn weeks(now: DateTime<Utc>) -> (Self, Self) {
        let week = Duration::days(7);
        let current = Self {
            from: now - week,
            to: now,
        };
        let last = Self {
            from: now - week - week,
            to: now - week,
        };
        (current, last)
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from <= at && at < self.to
    }
}

/// Seller revenue from order items in the rolling current and previous week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Earnings {
    pub seller_id: Uuid,
    pub current_week: f64,
    pub last_week: f64,
}
