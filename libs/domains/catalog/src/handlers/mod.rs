//! HTTP surface of the catalog.
//!
//! - [`references`]: `/catalog/{kind}` for categories, brands and materials
//! - [`items`]: `/items` listing, search, seller CRUD and image upload

pub mod items;
pub mod references;

pub const REFERENCES_TAG: &str = "catalog";
pub const ITEMS_TAG: &str = "items";
