pub mod cart;
pub mod orders;

pub const CART_TAG: &str = "cart";
pub const ORDERS_TAG: &str = "orders";
