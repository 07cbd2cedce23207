use chrono::{DateTime, Utc};
use domain_catalog::Item;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Admin {
    pub id: Uuid,
    pub login: String,
    pub created_at: DateTime<Utc>,
}

/// Seller as seen by the seller themself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub shop_name: String,
    /// Revenue credited from placed orders
    pub balance: f64,
    pub created_at: DateTime<Utc>,
}

/// Seller as seen by everyone else (no email, no balance)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PublicSeller {
    pub id: Uuid,
    pub name: String,
    pub shop_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Seller> for PublicSeller {
    fn from(seller: Seller) -> Self {
        Self {
            id: seller.id,
            name: seller.name,
            shop_name: seller.shop_name,
            created_at: seller.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerProfile {
    #[serde(flatten)]
    pub seller: Seller,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicSellerProfile {
    #[serde(flatten)]
    pub seller: PublicSeller,
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Buyer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyerProfile {
    #[serde(flatten)]
    pub buyer: Buyer,
    pub favorites: Vec<Item>,
}

/// Account together with its stored password hash (never serialized)
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials<T> {
    pub account: T,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct SellerSignUp {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub shop_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct BuyerSignUp {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct SignIn {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct AdminSignIn {
    #[validate(length(min = 1, max = 50))]
    pub login: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema, Validate)]
pub struct CreateAdmin {
    #[validate(length(min = 3, max = 50))]
    pub login: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Partial update of the caller's seller profile
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateSeller {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
    #[validate(length(max = 100))]
    pub shop_name: Option<String>,
}

/// Partial update of the caller's buyer profile
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct UpdateBuyer {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SellerAuth {
    pub token: String,
    pub seller: Seller,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BuyerAuth {
    pub token: String,
    pub buyer: Buyer,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminAuth {
    pub token: String,
    pub admin: Admin,
}

// Repository inputs: passwords already hashed, emails normalized.

#[derive(Debug, Clone, PartialEq)]
pub struct NewSeller {
    pub name: String,
    pub email: String,
    pub shop_name: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBuyer {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SellerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub shop_name: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyerChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl Seller {
    pub fn new(input: NewSeller) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            shop_name: input.shop_name,
            balance: 0.0,
            created_at: Utc::now(),
        }
    }

    pub fn apply_changes(&mut self, changes: &SellerChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
        if let Some(shop_name) = &changes.shop_name {
            self.shop_name = shop_name.clone();
        }
    }
}

impl Buyer {
    pub fn new(input: NewBuyer) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            email: input.email,
            created_at: Utc::now(),
        }
    }

    pub fn apply_changes(&mut self, changes: &BuyerChanges) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(email) = &changes.email {
            self.email = email.clone();
        }
    }
}

/// Emails are compared case-insensitively.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_seller_hides_balance_and_email() {
        let seller = Seller::new(NewSeller {
            name: "Ivan".to_string(),
            email: "ivan@shop.example".to_string(),
            shop_name: "Ivan's Tools".to_string(),
            password_hash: "hash".to_string(),
        });

        let json = serde_json::to_value(PublicSeller::from(seller)).unwrap();
        assert!(json.get("balance").is_none());
        assert!(json.get("email").is_none());
        assert_eq!(json["shop_name"], "Ivan's Tools");
    }

    #[test]
    fn test_seller_profile_flattens_seller() {
        let seller = Seller::new(NewSeller {
            name: "Ivan".to_string(),
            email: "ivan@shop.example".to_string(),
            shop_name: String::new(),
            password_hash: "hash".to_string(),
        });
        let json = serde_json::to_value(SellerProfile {
            seller,
            items: vec![],
        })
        .unwrap();

        assert_eq!(json["balance"], 0.0);
        assert_eq!(json["items"], serde_json::json!([]));
    }

    #[test]
    fn test_apply_changes_keeps_absent_fields() {
        let mut buyer = Buyer::new(NewBuyer {
            name: "Olga".to_string(),
            email: "olga@example.com".to_string(),
            password_hash: "hash".to_string(),
        });
        buyer.apply_changes(&BuyerChanges {
            name: Some("Olga P.".to_string()),
            ..BuyerChanges::default()
        });

        assert_eq!(buyer.name, "Olga P.");
        assert_eq!(buyer.email, "olga@example.com");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Olga@Example.COM "), "olga@example.com");
    }
}
