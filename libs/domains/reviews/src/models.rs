use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: i32,
    pub item_id: i32,
    pub buyer_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateReview {
    #[validate(range(min = 1))]
    pub item_id: i32,
    #[validate(range(min = 1, max = 5))]
    pub rating: i32,
    #[serde(default)]
    #[validate(length(max = 2000))]
    pub comment: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    /// Item whose reviews to list
    pub item_id: i32,
}

/// Reviews of one item with their mean rating (`null` without reviews)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemReviews {
    pub item_id: i32,
    pub average_rating: Option<f64>,
    pub reviews: Vec<Review>,
}

impl ItemReviews {
    pub fn new(item_id: i32, reviews: Vec<Review>) -> Self {
        let average_rating = (!reviews.is_empty()).then(|| {
            let sum: i32 = reviews.iter().map(|r| r.rating).sum();
            f64::from(sum) / reviews.len() as f64
        });
        Self {
            item_id,
            average_rating,
            reviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32) -> Review {
        Review {
            id: rating,
            item_id: 1,
            buyer_id: Uuid::nil(),
            rating,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_average_rating() {
        let reviews = ItemReviews::new(1, vec![review(5), review(4), review(3)]);
        assert_eq!(reviews.average_rating, Some(4.0));
    }

    #[test]
    fn test_no_reviews_has_no_average() {
        assert_eq!(ItemReviews::new(1, vec![]).average_rating, None);
    }

    #[test]
    fn test_rating_bounds() {
        let input = |rating| CreateReview {
            item_id: 1,
            rating,
            comment: "Solid bricks".to_string(),
        };
        assert!(input(0).validate().is_err());
        assert!(input(1).validate().is_ok());
        assert!(input(5).validate().is_ok());
        assert!(input(6).validate().is_err());
    }
}
