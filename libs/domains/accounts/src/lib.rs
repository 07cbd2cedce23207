//! Accounts Domain
//!
//! Admins, sellers and buyers: sign-up, sign-in, profiles and the buyer's
//! favorite items.
//!
//! # Features
//!
//! - Password hashing with Argon2
//! - Stateless bearer tokens issued through [`axum_helpers::JwtAuth`]
//! - Seller profiles with their items, buyer profiles with favorites
//! - Optional admin bootstrap from `ADMIN_LOGIN` / `ADMIN_PASSWORD`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │ Handlers / AuthHandlers  │  ← /auth/*, /sellers, /buyers, /admins
//! └────────────┬─────────────┘
//!              │
//! ┌────────────▼─────────────┐
//! │      AccountService      │  ← Hashing, tokens, role-scoped profiles
//! └──────┬────────────┬──────┘
//!        │            │
//! ┌──────▼──────┐ ┌───▼────────────┐
//! │ Account     │ │ ItemRepository │  ← from domain_catalog
//! │ Repository  │ └────────────────┘
//! └─────────────┘
//! ```

pub mod auth_handlers;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use config::AdminBootstrap;
pub use error::{AccountError, AccountResult};
pub use models::{
    Admin, AdminAuth, AdminSignIn, Buyer, BuyerAuth, BuyerChanges, BuyerProfile, BuyerSignUp,
    CreateAdmin, Credentials, NewBuyer, NewSeller, PublicSeller, PublicSellerProfile, Seller,
    SellerAuth, SellerChanges, SellerProfile, SellerSignUp, SignIn, UpdateBuyer, UpdateSeller,
};
pub use postgres::PgAccountRepository;
pub use repository::{AccountRepository, InMemoryAccountRepository};
pub use service::AccountService;
