//! Sea-ORM entities for account tables.

pub mod admin;
pub mod buyer;
pub mod favorite;
pub mod seller;
