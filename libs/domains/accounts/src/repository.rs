use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{AccountError, AccountResult};
use crate::models::{
    Admin, Buyer, BuyerChanges, Credentials, NewBuyer, NewSeller, Seller, SellerChanges,
};

/// Persistence for admins, sellers, buyers and buyer favorites
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn create_admin(&self, login: String, password_hash: String) -> AccountResult<Admin>;

    async fn find_admin(&self, login: &str) -> AccountResult<Option<Credentials<Admin>>>;

    /// Create a seller; fails with `EmailTaken` on a duplicate email
    async fn create_seller(&self, input: NewSeller) -> AccountResult<Seller>;

    async fn find_seller_by_email(
        &self,
        email: &str,
    ) -> AccountResult<Option<Credentials<Seller>>>;

    async fn get_seller(&self, id: Uuid) -> AccountResult<Option<Seller>>;

    async fn update_seller(&self, id: Uuid, changes: SellerChanges) -> AccountResult<Seller>;

    /// Create a buyer; fails with `EmailTaken` on a duplicate email
    async fn create_buyer(&self, input: NewBuyer) -> AccountResult<Buyer>;

    async fn find_buyer_by_email(&self, email: &str) -> AccountResult<Option<Credentials<Buyer>>>;

    async fn get_buyer(&self, id: Uuid) -> AccountResult<Option<Buyer>>;

    async fn update_buyer(&self, id: Uuid, changes: BuyerChanges) -> AccountResult<Buyer>;

    /// Mark an item as favorite; adding it twice is a no-op
    async fn add_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<()>;

    async fn remove_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<bool>;

    /// Favorite item ids in the order they were added
    async fn favorite_item_ids(&self, buyer_id: Uuid) -> AccountResult<Vec<i32>>;
}

#[derive(Debug, Default)]
struct Accounts {
    admins: HashMap<Uuid, Credentials<Admin>>,
    sellers: HashMap<Uuid, Credentials<Seller>>,
    buyers: HashMap<Uuid, Credentials<Buyer>>,
    favorites: Vec<(Uuid, i32)>,
}

/// In-memory implementation of AccountRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<Accounts>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create_admin(&self, login: String, password_hash: String) -> AccountResult<Admin> {
        let mut accounts = self.accounts.write().await;
        if accounts.admins.values().any(|a| a.account.login == login) {
            return Err(AccountError::LoginTaken(login));
        }

        let admin = Admin {
            id: Uuid::now_v7(),
            login,
            created_at: Utc::now(),
        };
        accounts.admins.insert(
            admin.id,
            Credentials {
                account: admin.clone(),
                password_hash,
            },
        );

        tracing::info!(admin_id = %admin.id, "Created admin");
        Ok(admin)
    }

    async fn find_admin(&self, login: &str) -> AccountResult<Option<Credentials<Admin>>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .admins
            .values()
            .find(|a| a.account.login == login)
            .cloned())
    }

    async fn create_seller(&self, input: NewSeller) -> AccountResult<Seller> {
        let mut accounts = self.accounts.write().await;
        if accounts.sellers.values().any(|s| s.account.email == input.email) {
            return Err(AccountError::EmailTaken(input.email));
        }

        let password_hash = input.password_hash.clone();
        let seller = Seller::new(input);
        accounts.sellers.insert(
            seller.id,
            Credentials {
                account: seller.clone(),
                password_hash,
            },
        );

        tracing::info!(seller_id = %seller.id, "Created seller");
        Ok(seller)
    }

    async fn find_seller_by_email(
        &self,
        email: &str,
    ) -> AccountResult<Option<Credentials<Seller>>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .sellers
            .values()
            .find(|s| s.account.email == email)
            .cloned())
    }

    async fn get_seller(&self, id: Uuid) -> AccountResult<Option<Seller>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.sellers.get(&id).map(|s| s.account.clone()))
    }

    async fn update_seller(&self, id: Uuid, changes: SellerChanges) -> AccountResult<Seller> {
        let mut accounts = self.accounts.write().await;
        if let Some(email) = &changes.email {
            let taken = accounts
                .sellers
                .values()
                .any(|s| s.account.id != id && &s.account.email == email);
            if taken {
                return Err(AccountError::EmailTaken(email.clone()));
            }
        }

        let seller = accounts
            .sellers
            .get_mut(&id)
            .ok_or(AccountError::SellerNotFound(id))?;
        seller.account.apply_changes(&changes);
        if let Some(hash) = changes.password_hash {
            seller.password_hash = hash;
        }

        tracing::info!(seller_id = %id, "Updated seller");
        Ok(seller.account.clone())
    }

    async fn create_buyer(&self, input: NewBuyer) -> AccountResult<Buyer> {
        let mut accounts = self.accounts.write().await;
        if accounts.buyers.values().any(|b| b.account.email == input.email) {
            return Err(AccountError::EmailTaken(input.email));
        }

        let password_hash = input.password_hash.clone();
        let buyer = Buyer::new(input);
        accounts.buyers.insert(
            buyer.id,
            Credentials {
                account: buyer.clone(),
                password_hash,
            },
        );

        tracing::info!(buyer_id = %buyer.id, "Created buyer");
        Ok(buyer)
    }

    async fn find_buyer_by_email(&self, email: &str) -> AccountResult<Option<Credentials<Buyer>>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .buyers
            .values()
            .find(|b| b.account.email == email)
            .cloned())
    }

    async fn get_buyer(&self, id: Uuid) -> AccountResult<Option<Buyer>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.buyers.get(&id).map(|b| b.account.clone()))
    }

    async fn update_buyer(&self, id: Uuid, changes: BuyerChanges) -> AccountResult<Buyer> {
        let mut accounts = self.accounts.write().await;
        if let Some(email) = &changes.email {
            let taken = accounts
                .buyers
                .values()
                .any(|b| b.account.id != id && &b.account.email == email);
            if taken {
                return Err(AccountError::EmailTaken(email.clone()));
            }
        }

        let buyer = accounts
            .buyers
            .get_mut(&id)
            .ok_or(AccountError::BuyerNotFound(id))?;
        buyer.account.apply_changes(&changes);
        if let Some(hash) = changes.password_hash {
            buyer.password_hash = hash;
        }

        tracing::info!(buyer_id = %id, "Updated buyer");
        Ok(buyer.account.clone())
    }

    async fn add_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<()> {
        let mut accounts = self.accounts.write().await;
        if !accounts.favorites.contains(&(buyer_id, item_id)) {
            accounts.favorites.push((buyer_id, item_id));
        }
        Ok(())
    }

    async fn remove_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<bool> {
        let mut accounts = self.accounts.write().await;
        let before = accounts.favorites.len();
        accounts
            .favorites
            .retain(|favorite| *favorite != (buyer_id, item_id));
        Ok(accounts.favorites.len() < before)
    }

    async fn favorite_item_ids(&self, buyer_id: Uuid) -> AccountResult<Vec<i32>> {
        let accounts = self.accounts.read().await;
        Ok(accounts
            .favorites
            .iter()
            .filter(|(buyer, _)| *buyer == buyer_id)
            .map(|(_, item)| *item)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_seller(email: &str) -> NewSeller {
        NewSeller {
            name: "Ivan".to_string(),
            email: email.to_string(),
            shop_name: "Tools".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_seller_email() {
        let repo = InMemoryAccountRepository::new();
        repo.create_seller(new_seller("ivan@example.com"))
            .await
            .unwrap();

        let result = repo.create_seller(new_seller("ivan@example.com")).await;
        assert!(matches!(result, Err(AccountError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_update_seller_email_to_taken_one() {
        let repo = InMemoryAccountRepository::new();
        repo.create_seller(new_seller("a@example.com")).await.unwrap();
        let b = repo.create_seller(new_seller("b@example.com")).await.unwrap();

        let result = repo
            .update_seller(
                b.id,
                SellerChanges {
                    email: Some("a@example.com".to_string()),
                    ..SellerChanges::default()
                },
            )
            .await;
        assert!(matches!(result, Err(AccountError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_update_seller_replaces_password_hash() {
        let repo = InMemoryAccountRepository::new();
        let seller = repo.create_seller(new_seller("a@example.com")).await.unwrap();

        repo.update_seller(
            seller.id,
            SellerChanges {
                password_hash: Some("new-hash".to_string()),
                ..SellerChanges::default()
            },
        )
        .await
        .unwrap();

        let stored = repo
            .find_seller_by_email("a@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash, "new-hash");
    }

    #[tokio::test]
    async fn test_favorites_are_idempotent_and_ordered() {
        let repo = InMemoryAccountRepository::new();
        let buyer = Uuid::new_v4();
        repo.add_favorite(buyer, 3).await.unwrap();
        repo.add_favorite(buyer, 1).await.unwrap();
        repo.add_favorite(buyer, 3).await.unwrap();
        repo.add_favorite(Uuid::new_v4(), 9).await.unwrap();

        assert_eq!(repo.favorite_item_ids(buyer).await.unwrap(), vec![3, 1]);
        assert!(repo.remove_favorite(buyer, 3).await.unwrap());
        assert!(!repo.remove_favorite(buyer, 3).await.unwrap());
        assert_eq!(repo.favorite_item_ids(buyer).await.unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn test_duplicate_admin_login() {
        let repo = InMemoryAccountRepository::new();
        repo.create_admin("root".to_string(), "hash".to_string())
            .await
            .unwrap();

        let result = repo
            .create_admin("root".to_string(), "hash".to_string())
            .await;
        assert!(matches!(result, Err(AccountError::LoginTaken(_))));
    }
}
