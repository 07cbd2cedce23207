use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{JwtAuth, Role};
use domain_catalog::{ItemFilter, ItemRepository};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AccountError, AccountResult};
use crate::models::{
    Admin, AdminAuth, AdminSignIn, Buyer, BuyerAuth, BuyerChanges, BuyerProfile, BuyerSignUp,
    CreateAdmin, NewBuyer, NewSeller, PublicSellerProfile, Seller, SellerAuth, SellerChanges,
    SellerProfile, SellerSignUp, SignIn, UpdateBuyer, UpdateSeller, normalize_email,
};
use crate::repository::AccountRepository;

/// Sign-up, sign-in and profile logic for every role
pub struct AccountService<R: AccountRepository, I: ItemRepository> {
    repository: Arc<R>,
    items: Arc<I>,
    auth: JwtAuth,
}

impl<R: AccountRepository, I: ItemRepository> Clone for AccountService<R, I> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            items: Arc::clone(&self.items),
            auth: self.auth.clone(),
        }
    }
}

impl<R: AccountRepository, I: ItemRepository> AccountService<R, I> {
    pub fn new(repository: R, items: I, auth: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            items: Arc::new(items),
            auth,
        }
    }

    fn issue_token(&self, id: Uuid, role: Role) -> AccountResult<String> {
        self.auth
            .issue(id, role)
            .map_err(|e| AccountError::Token(e.to_string()))
    }

    // Sellers

    pub async fn seller_sign_up(&self, mut input: SellerSignUp) -> AccountResult<Seller> {
        input.email = normalize_email(&input.email);
        validate(&input)?;

        self.repository
            .create_seller(NewSeller {
                name: input.name.trim().to_string(),
                email: input.email,
                shop_name: input.shop_name.trim().to_string(),
                password_hash: hash_password(&input.password)?,
            })
            .await
    }

    pub async fn seller_sign_in(&self, mut input: SignIn) -> AccountResult<SellerAuth> {
        input.email = normalize_email(&input.email);
        validate(&input)?;

        let credentials = self
            .repository
            .find_seller_by_email(&input.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(&input.password, &credentials.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let seller = credentials.account;
        Ok(SellerAuth {
            token: self.issue_token(seller.id, Role::Seller)?,
            seller,
        })
    }

    async fn get_seller(&self, id: Uuid) -> AccountResult<Seller> {
        self.repository
            .get_seller(id)
            .await?
            .ok_or(AccountError::SellerNotFound(id))
    }

    /// The seller's own profile: balance and listed items included
    pub async fn seller_profile(&self, id: Uuid) -> AccountResult<SellerProfile> {
        let seller = self.get_seller(id).await?;
        let items = self.items.list(ItemFilter::for_seller(id)).await?;
        Ok(SellerProfile { seller, items })
    }

    /// Profile shown to other users
    pub async fn public_seller(&self, id: Uuid) -> AccountResult<PublicSellerProfile> {
        let seller = self.get_seller(id).await?;
        let items = self.items.list(ItemFilter::for_seller(id)).await?;
        Ok(PublicSellerProfile {
            seller: seller.into(),
            items,
        })
    }

    pub async fn update_seller(&self, id: Uuid, mut input: UpdateSeller) -> AccountResult<Seller> {
        input.email = input.email.as_deref().map(normalize_email);
        validate(&input)?;

        let changes = SellerChanges {
            name: input.name.map(|n| n.trim().to_string()),
            email: input.email,
            shop_name: input.shop_name.map(|n| n.trim().to_string()),
            password_hash: input.password.as_deref().map(hash_password).transpose()?,
        };
        self.repository.update_seller(id, changes).await
    }

    // Buyers

    pub async fn buyer_sign_up(&self, mut input: BuyerSignUp) -> AccountResult<Buyer> {
        input.email = normalize_email(&input.email);
        validate(&input)?;

        self.repository
            .create_buyer(NewBuyer {
                name: input.name.trim().to_string(),
                email: input.email,
                password_hash: hash_password(&input.password)?,
            })
            .await
    }

    pub async fn buyer_sign_in(&self, mut input: SignIn) -> AccountResult<BuyerAuth> {
        input.email = normalize_email(&input.email);
        validate(&input)?;

        let credentials = self
            .repository
            .find_buyer_by_email(&input.email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(&input.password, &credentials.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let buyer = credentials.account;
        Ok(BuyerAuth {
            token: self.issue_token(buyer.id, Role::Buyer)?,
            buyer,
        })
    }

    /// The buyer's own profile with favorite items
    pub async fn buyer_profile(&self, id: Uuid) -> AccountResult<BuyerProfile> {
        let buyer = self
            .repository
            .get_buyer(id)
            .await?
            .ok_or(AccountError::BuyerNotFound(id))?;
        let ids = self.repository.favorite_item_ids(id).await?;
        let mut favorites = self.items.find_by_ids(ids.clone()).await?;
        favorites.sort_by_key(|item| ids.iter().position(|id| *id == item.id));

        Ok(BuyerProfile { buyer, favorites })
    }

    pub async fn update_buyer(&self, id: Uuid, mut input: UpdateBuyer) -> AccountResult<Buyer> {
        input.email = input.email.as_deref().map(normalize_email);
        validate(&input)?;

        let changes = BuyerChanges {
            name: input.name.map(|n| n.trim().to_string()),
            email: input.email,
            password_hash: input.password.as_deref().map(hash_password).transpose()?,
        };
        self.repository.update_buyer(id, changes).await
    }

    pub async fn add_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<()> {
        if self.items.get_by_id(item_id).await?.is_none() {
            return Err(AccountError::ItemNotFound(item_id));
        }
        self.repository.add_favorite(buyer_id, item_id).await
    }

    pub async fn remove_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<()> {
        if !self.repository.remove_favorite(buyer_id, item_id).await? {
            return Err(AccountError::FavoriteNotFound(item_id));
        }
        Ok(())
    }

    // Admins

    pub async fn admin_sign_in(&self, input: AdminSignIn) -> AccountResult<AdminAuth> {
        validate(&input)?;

        let credentials = self
            .repository
            .find_admin(input.login.trim())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;
        if !verify_password(&input.password, &credentials.password_hash)? {
            return Err(AccountError::InvalidCredentials);
        }

        let admin = credentials.account;
        Ok(AdminAuth {
            token: self.issue_token(admin.id, Role::Admin)?,
            admin,
        })
    }

    pub async fn create_admin(&self, mut input: CreateAdmin) -> AccountResult<Admin> {
        input.login = input.login.trim().to_string();
        validate(&input)?;

        self.repository
            .create_admin(input.login, hash_password(&input.password)?)
            .await
    }

    /// Creates the admin unless the login already exists. Returns whether
    /// an account was created.
    pub async fn ensure_admin(&self, login: &str, password: &str) -> AccountResult<bool> {
        let login = login.trim();
        if self.repository.find_admin(login).await?.is_some() {
            return Ok(false);
        }

        self.create_admin(CreateAdmin {
            login: login.to_string(),
            password: password.to_string(),
        })
        .await?;
        Ok(true)
    }
}

fn validate(input: &impl Validate) -> AccountResult<()> {
    input
        .validate()
        .map_err(|e| AccountError::Validation(e.to_string()))
}

// Password helpers

fn hash_password(password: &str) -> AccountResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AccountError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> AccountResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AccountError::PasswordHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
