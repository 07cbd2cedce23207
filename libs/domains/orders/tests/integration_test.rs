//! Integration tests for the orders domain
//!
//! Run against real PostgreSQL via testcontainers with the workspace
//! migrations applied. Docker is required:
//! `cargo test -p domain_orders -- --ignored`

use domain_accounts::{AccountRepository, PgAccountRepository};
use domain_catalog::{ItemRepository, PgItemRepository};
use domain_orders::*;
use test_utils::{TestDatabase, assertions::*};
use uuid::Uuid;

struct Fixture {
    db: TestDatabase,
    cart: PgCartRepository,
    orders: PgOrderRepository,
    items: PgItemRepository,
    accounts: PgAccountRepository,
}

impl Fixture {
    async fn new() -> Self {
        let db = TestDatabase::new().await;
        Self {
            cart: PgCartRepository::new(db.connection()),
            orders: PgOrderRepository::new(db.connection()),
            items: PgItemRepository::new(db.connection()),
            accounts: PgAccountRepository::new(db.connection()),
            db,
        }
    }

    async fn stock(&self, item_id: i32) -> i32 {
        assert_some(self.items.get_by_id(item_id).await.unwrap(), "item").quantity
    }

    async fn balance(&self, seller_id: Uuid) -> f64 {
        assert_some(self.accounts.get_seller(seller_id).await.unwrap(), "seller").balance
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cart_put_replaces_quantity() {
    let fx = Fixture::new().await;
    let seller = fx.db.create_seller(Uuid::new_v4()).await;
    let buyer = fx.db.create_buyer(Uuid::new_v4()).await;
    let item = fx.db.create_item(seller, 10.0, 5).await;

    fx.cart.put(buyer, item, 1).await.unwrap();
    fx.cart.put(buyer, item, 3).await.unwrap();

    let lines = fx.cart.lines(buyer).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 3);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cart_put_unknown_item() {
    let fx = Fixture::new().await;
    let buyer = fx.db.create_buyer(Uuid::new_v4()).await;

    let result = fx.cart.put(buyer, 777, 1).await;
    assert!(matches!(result, Err(OrderError::ItemNotFound(777))));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_place_order_is_atomic() {
    let fx = Fixture::new().await;
    let seller = fx.db.create_seller(Uuid::new_v4()).await;
    let buyer = fx.db.create_buyer(Uuid::new_v4()).await;
    let item = fx.db.create_item(seller, 20.0, 3).await;
    fx.cart.put(buyer, item, 2).await.unwrap();

    let order = fx
        .orders
        .place(buyer, vec![OrderLine::new(item, seller, 2, 20.0)])
        .await
        .unwrap();

    assert_eq!(order.total, 40.0);
    assert_eq!(order.items.len(), 1);
    assert_eq!(fx.stock(item).await, 1);
    assert_eq!(fx.balance(seller).await, 40.0);
    assert!(fx.cart.lines(buyer).await.unwrap().is_empty());

    let stored = assert_some(fx.orders.get(order.id).await.unwrap(), "order");
    assert_eq!(stored, order);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_place_order_rolls_back_on_missing_stock() {
    let fx = Fixture::new().await;
    let seller = fx.db.create_seller(Uuid::new_v4()).await;
    let buyer = fx.db.create_buyer(Uuid::new_v4()).await;
    let plenty = fx.db.create_item(seller, 1.0, 50).await;
    let scarce = fx.db.create_item(seller, 1.0, 1).await;
    fx.cart.put(buyer, plenty, 5).await.unwrap();
    fx.cart.put(buyer, scarce, 2).await.unwrap();

    let result = fx
        .orders
        .place(
            buyer,
            vec![
                OrderLine::new(plenty, seller, 5, 1.0),
                OrderLine::new(scarce, seller, 2, 1.0),
            ],
        )
        .await;

    assert!(matches!(result, Err(OrderError::InsufficientStock { .. })));
    assert_eq!(fx.stock(plenty).await, 50);
    assert_eq!(fx.stock(scarce).await, 1);
    assert_eq!(fx.balance(seller).await, 0.0);
    assert_eq!(fx.cart.lines(buyer).await.unwrap().len(), 2);
    assert!(fx.orders.list_for_buyer(buyer).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seller_revenue_by_week() {
    let fx = Fixture::new().await;
    let seller = fx.db.create_seller(Uuid::new_v4()).await;
    let buyer = fx.db.create_buyer(Uuid::new_v4()).await;
    let item = fx.db.create_item(seller, 15.0, 10).await;

    fx.orders
        .place(buyer, vec![OrderLine::new(item, seller, 2, 15.0)])
        .await
        .unwrap();

    let (current, last) = Window::weeks(chrono::Utc::now() + chrono::Duration::seconds(1));
    assert_eq!(fx.orders.seller_revenue(seller, current).await.unwrap(), 30.0);
    assert_eq!(fx.orders.seller_revenue(seller, last).await.unwrap(), 0.0);
}
