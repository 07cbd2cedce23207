use chrono::Utc;
use domain_catalog::ItemRepository;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{
    AddToCart, Cart, CartLine, Earnings, Order, OrderLine, UpdateCartItem, Window,
};
use crate::repository::{CartRepository, OrderRepository};

fn validate(input: &impl Validate) -> OrderResult<()> {
    input
        .validate()
        .map_err(|e| OrderError::Validation(e.to_string()))
}

/// Buyer cart operations
pub struct CartService<C: CartRepository, I: ItemRepository> {
    cart: Arc<C>,
    items: Arc<I>,
}

impl<C: CartRepository, I: ItemRepository> Clone for CartService<C, I> {
    fn clone(&self) -> Self {
        Self {
            cart: Arc::clone(&self.cart),
            items: Arc::clone(&self.items),
        }
    }
}

impl<C: CartRepository, I: ItemRepository> CartService<C, I> {
    pub fn new(cart: C, items: I) -> Self {
        Self {
            cart: Arc::new(cart),
            items: Arc::new(items),
        }
    }

    /// Cart lines priced with the current item prices
    pub async fn get_cart(&self, buyer_id: Uuid) -> OrderResult<Cart> {
        let rows = self.cart.lines(buyer_id).await?;
        let items: HashMap<i32, _> = self
            .items
            .find_by_ids(rows.iter().map(|row| row.item_id).collect())
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();

        let lines = rows
            .into_iter()
            .filter_map(|row| {
                let item = items.get(&row.item_id)?;
                Some(CartLine {
                    item_id: item.id,
                    name: item.name.clone(),
                    price: item.price,
                    quantity: row.quantity,
                    total: item.price * f64::from(row.quantity),
                })
            })
            .collect();

        Ok(Cart::new(buyer_id, lines))
    }

    pub async fn add_item(&self, buyer_id: Uuid, input: AddToCart) -> OrderResult<Cart> {
        validate(&input)?;
        if self.items.get_by_id(input.item_id).await?.is_none() {
            return Err(OrderError::ItemNotFound(input.item_id));
        }

        self.cart
            .put(buyer_id, input.item_id, input.quantity)
            .await?;
        self.get_cart(buyer_id).await
    }

    pub async fn update_item(
        &self,
        buyer_id: Uuid,
        item_id: i32,
        input: UpdateCartItem,
    ) -> OrderResult<Cart> {
        validate(&input)?;
        self.cart
            .set_quantity(buyer_id, item_id, input.quantity)
            .await?
            .ok_or(OrderError::CartItemNotFound(item_id))?;
        self.get_cart(buyer_id).await
    }

    pub async fn remove_item(&self, buyer_id: Uuid, item_id: i32) -> OrderResult<Cart> {
        if !self.cart.remove(buyer_id, item_id).await? {
            return Err(OrderError::CartItemNotFound(item_id));
        }
        self.get_cart(buyer_id).await
    }

    pub async fn clear(&self, buyer_id: Uuid) -> OrderResult<()> {
        let removed = self.cart.clear(buyer_id).await?;
        tracing::debug!(buyer_id = %buyer_id, removed, "Cleared cart");
        Ok(())
    }
}

/// Order placement, order history and seller earnings
pub struct OrderService<C: CartRepository, O: OrderRepository, I: ItemRepository> {
    cart: Arc<C>,
    orders: Arc<O>,
    items: Arc<I>,
}

impl<C: CartRepository, O: OrderRepository, I: ItemRepository> Clone for OrderService<C, O, I> {
    fn clone(&self) -> Self {
        Self {
            cart: Arc::clone(&self.cart),
            orders: Arc::clone(&self.orders),
            items: Arc::clone(&self.items),
        }
    }
}

impl<C: CartRepository, O: OrderRepository, I: ItemRepository> OrderService<C, O, I> {
    pub fn new(cart: C, orders: O, items: I) -> Self {
        Self {
            cart: Arc::new(cart),
            orders: Arc::new(orders),
            items: Arc::new(items),
        }
    }

    /// Turn the buyer's cart into an order.
    ///
    /// Every line is checked against stock before anything is written. The
    /// repository checks stock again while it moves stock, credits sellers and
    /// clears the cart.
    pub async fn place_order(&self, buyer_id: Uuid) -> OrderResult<Order> {
        let rows = self.cart.lines(buyer_id).await?;
        if rows.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let item = self
                .items
                .get_by_id(row.item_id)
                .await?
                .ok_or(OrderError::ItemNotFound(row.item_id))?;
            if item.quantity < row.quantity {
                return Err(OrderError::InsufficientStock {
                    item_id: item.id,
                    requested: row.quantity,
                    available: item.quantity,
                });
            }
            lines.push(OrderLine::new(item.id, item.seller_id, row.quantity, item.price));
        }

        self.orders.place(buyer_id, lines).await
    }

    /// Order of the calling buyer
    pub async fn get_order(&self, buyer_id: Uuid, id: i32) -> OrderResult<Order> {
        let order = self
            .orders
            .get(id)
            .await?
            .ok_or(OrderError::OrderNotFound(id))?;
        if order.buyer_id != buyer_id {
            return Err(OrderError::NotOwner(id));
        }
        Ok(order)
    }

    pub async fn list_orders(&self, buyer_id: Uuid) -> OrderResult<Vec<Order>> {
        self.orders.list_for_buyer(buyer_id).await
    }

    pub async fn earnings(&self, seller_id: Uuid) -> OrderResult<Earnings> {
        let (current, last) = Window::weeks(Utc::now());
        Ok(Earnings {
            seller_id,
            current_week: self.orders.seller_revenue(seller_id, current).await?,
            last_week: self.orders.seller_revenue(seller_id, last).await?,
        })
    }
}
