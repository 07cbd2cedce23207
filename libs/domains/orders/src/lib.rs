//! Orders Domain
//!
//! Buyer carts, order placement and seller earnings.
//!
//! Placing an order checks every cart line against stock, stores the order
//! with its priced lines, takes the units out of stock, credits each seller
//! with their line totals and empties the cart. The PostgreSQL repository
//! does the writes in one transaction with the item and seller rows locked.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │  Handlers (cart/orders)  │  ← /cart, /orders
//! └────────────┬─────────────┘
//!              │
//! ┌────────────▼─────────────┐
//! │ CartService/OrderService │  ← Stock checks, pricing, ownership
//! └──────┬────────────┬──────┘
//!        │            │
//! ┌──────▼──────┐ ┌───▼────────────┐
//! │ Cart/Order  │ │ ItemRepository │  ← from domain_catalog
//! │ Repository  │ └────────────────┘
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use models::{
    AddToCart, Cart, CartItem, CartLine, Earnings, Order, OrderItem, OrderLine, OrderStatus,
    UpdateCartItem, Window,
};
pub use postgres::{PgCartRepository, PgOrderRepository};
pub use repository::{CartRepository, InMemoryCheckoutRepository, OrderRepository};
pub use service::{CartService, OrderService};
