//! Catalog Domain
//!
//! Reference data (categories, brands, materials) and the items sellers list
//! against it, including item images.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← /catalog/{kind}, /items
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Ownership checks, reference validation, uploads
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐      ┌─────────────┐
//! │ Repository  │      │ ImageStore  │  ← Local disk or in-memory
//! └──────┬──────┘      └─────────────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Items, references, filters
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_catalog::{
//!     handlers, InMemoryImageStore, InMemoryItemRepository, InMemoryReferenceRepository,
//!     ItemService, ReferenceService,
//! };
//!
//! let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!").unwrap());
//! let references = InMemoryReferenceRepository::new();
//! let items = InMemoryItemRepository::new(references.clone());
//!
//! let catalog = handlers::references::router(ReferenceService::new(references.clone()), auth.clone());
//! let items = handlers::items::router(
//!     ItemService::new(items, references, InMemoryImageStore::new()),
//!     auth,
//!     5 * 1024 * 1024,
//! );
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod storage;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    CreateItem, CreateReference, Item, ItemDetails, ItemFilter, ItemImage, Pagination, Reference,
    ReferenceKind, UpdateItem,
};
pub use postgres::{PgItemRepository, PgReferenceRepository};
pub use repository::{
    InMemoryItemRepository, InMemoryReferenceRepository, ItemRepository, ReferenceRepository,
};
pub use service::{ImageUpload, ItemService, ReferenceService};
pub use storage::{ImageStore, InMemoryImageStore, LocalImageStore, UploadConfig};
