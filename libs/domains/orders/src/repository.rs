use async_trait::async_trait;
use chrono::Utc;
use domain_catalog::{InMemoryItemRepository, ItemRepository, UpdateItem};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{CartItem, Order, OrderItem, OrderLine, OrderStatus, Window};

/// Per-buyer cart rows
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Cart rows of a buyer in insertion order
    async fn lines(&self, buyer_id: Uuid) -> OrderResult<Vec<CartItem>>;

    /// Insert a row, or replace the quantity when the item is already in the cart
    async fn put(&self, buyer_id: Uuid, item_id: i32, quantity: i32) -> OrderResult<CartItem>;

    async fn set_quantity(
        &self,
        buyer_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> OrderResult<Option<CartItem>>;

    async fn remove(&self, buyer_id: Uuid, item_id: i32) -> OrderResult<bool>;

    /// Returns the number of removed rows
    async fn clear(&self, buyer_id: Uuid) -> OrderResult<u64>;
}

/// Orders and the bookkeeping that comes with them
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Store the order with status `processing`, take the ordered units out of
    /// stock, credit every seller with their line totals and empty the buyer's
    /// cart. Either all of it happens or none of it.
    async fn place(&self, buyer_id: Uuid, lines: Vec<OrderLine>) -> OrderResult<Order>;

    async fn get(&self, id: i32) -> OrderResult<Option<Order>>;

    /// Orders of a buyer, newest first
    async fn list_for_buyer(&self, buyer_id: Uuid) -> OrderResult<Vec<Order>>;

    /// Sum of the seller's order item totals created inside the window
    async fn seller_revenue(&self, seller_id: Uuid, window: Window) -> OrderResult<f64>;
}

#[derive(Debug, Default)]
struct Checkout {
    cart: Vec<CartItem>,
    orders: BTreeMap<i32, Order>,
    balances: HashMap<Uuid, f64>,
    next_cart_id: i32,
    next_order_id: i32,
    next_order_item_id: i32,
}

/// In-memory cart and order storage (for development/testing).
///
/// Stock lives in the wrapped item repository, so placed orders are visible
/// through the catalog.
#[derive(Clone)]
pub struct InMemoryCheckoutRepository {
    state: Arc<RwLock<Checkout>>,
    items: InMemoryItemRepository,
}

impl InMemoryCheckoutRepository {
    pub fn new(items: InMemoryItemRepository) -> Self {
        Self {
            state: Arc::new(RwLock::new(Checkout::default())),
            items,
        }
    }

    /// Balance credited to a seller by placed orders
    pub async fn balance(&self, seller_id: Uuid) -> f64 {
        let state = self.state.read().await;
        state.balances.get(&seller_id).copied().unwrap_or_default()
    }
}

#[async_trait]
impl CartRepository for InMemoryCheckoutRepository {
    async fn lines(&self, buyer_id: Uuid) -> OrderResult<Vec<CartItem>> {
        let state = self.state.read().await;
        Ok(state
            .cart
            .iter()
            .filter(|row| row.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn put(&self, buyer_id: Uuid, item_id: i32, quantity: i32) -> OrderResult<CartItem> {
        let mut state = self.state.write().await;
        if let Some(row) = state
            .cart
            .iter_mut()
            .find(|row| row.buyer_id == buyer_id && row.item_id == item_id)
        {
            row.quantity = quantity;
            return Ok(row.clone());
        }

        state.next_cart_id += 1;
        let row = CartItem {
            id: state.next_cart_id,
            buyer_id,
            item_id,
            quantity,
        };
        state.cart.push(row.clone());

        tracing::info!(buyer_id = %buyer_id, item_id, "Added item to cart");
        Ok(row)
    }

    async fn set_quantity(
        &self,
        buyer_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> OrderResult<Option<CartItem>> {
        let mut state = self.state.write().await;
        Ok(state
            .cart
            .iter_mut()
            .find(|row| row.buyer_id == buyer_id && row.item_id == item_id)
            .map(|row| {
                row.quantity = quantity;
                row.clone()
            }))
    }

    async fn remove(&self, buyer_id: Uuid, item_id: i32) -> OrderResult<bool> {
        let mut state = self.state.write().await;
        let before = state.cart.len();
        state
            .cart
            .retain(|row| !(row.buyer_id == buyer_id && row.item_id == item_id));
        Ok(state.cart.len() < before)
    }

    async fn clear(&self, buyer_id: Uuid) -> OrderResult<u64> {
        let mut state = self.state.write().await;
        let before = state.cart.len();
        state.cart.retain(|row| row.buyer_id != buyer_id);
        Ok((before - state.cart.len()) as u64)
    }
}

#[async_trait]
impl OrderRepository for InMemoryCheckoutRepository {
    async fn place(&self, buyer_id: Uuid, lines: Vec<OrderLine>) -> OrderResult<Order> {
        let mut state = self.state.write().await;

        // Check everything before touching anything
        let mut remaining = Vec::with_capacity(lines.len());
        for line in &lines {
            let item = self
                .items
                .get_by_id(line.item_id)
                .await?
                .ok_or(OrderError::ItemNotFound(line.item_id))?;
            if item.quantity < line.quantity {
                return Err(OrderError::InsufficientStock {
                    item_id: item.id,
                    requested: line.quantity,
                    available: item.quantity,
                });
            }
            remaining.push((item.id, item.quantity - line.quantity));
        }

        for (item_id, quantity) in remaining {
            self.items
                .update(
                    item_id,
                    UpdateItem {
                        quantity: Some(quantity),
                        ..Default::default()
                    },
                )
                .await?;
        }

        state.next_order_id += 1;
        let order_id = state.next_order_id;
        let created_at = Utc::now();
        let mut items = Vec::with_capacity(lines.len());
        for line in &lines {
            *state.balances.entry(line.seller_id).or_default() += line.total;
            state.next_order_item_id += 1;
            items.push(OrderItem {
                id: state.next_order_item_id,
                order_id,
                item_id: line.item_id,
                seller_id: line.seller_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
                total: line.total,
                created_at,
            });
        }

        let order = Order {
            id: order_id,
            buyer_id,
            total: lines.iter().map(|line| line.total).sum(),
            status: OrderStatus::Processing,
            created_at,
            items,
        };
        state.orders.insert(order.id, order.clone());
        state.cart.retain(|row| row.buyer_id != buyer_id);

        tracing::info!(order_id = order.id, buyer_id = %buyer_id, "Placed order");
        Ok(order)
    }

    async fn get(&self, id: i32) -> OrderResult<Option<Order>> {
        let state = self.state.read().await;
        Ok(state.orders.get(&id).cloned())
    }

    async fn list_for_buyer(&self, buyer_id: Uuid) -> OrderResult<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .rev()
            .filter(|order| order.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn seller_revenue(&self, seller_id: Uuid, window: Window) -> OrderResult<f64> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .values()
            .flat_map(|order| &order.items)
            .filter(|item| item.seller_id == seller_id && window.contains(item.created_at))
            .map(|item| item.total)
            .sum())
    }
}
