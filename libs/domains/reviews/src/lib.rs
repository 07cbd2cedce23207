//! Reviews Domain
//!
//! Buyers rate items from 1 to 5 and leave a comment; anyone can read the
//! reviews of an item together with its average rating.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{ReviewError, ReviewResult};
pub use models::{CreateReview, ItemReviews, Review, ReviewQuery};
pub use postgres::PgReviewRepository;
pub use repository::{InMemoryReviewRepository, ReviewRepository};
pub use service::ReviewService;
