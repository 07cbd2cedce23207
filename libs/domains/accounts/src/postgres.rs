use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity::{admin, buyer, favorite, seller},
    error::{AccountError, AccountResult},
    models::{
        Admin, Buyer, BuyerChanges, Credentials, NewBuyer, NewSeller, Seller, SellerChanges,
    },
    repository::AccountRepository,
};

#[derive(Clone)]
pub struct PgAccountRepository {
    db: DatabaseConnection,
}

impl PgAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Turns a unique violation into the domain conflict built by `conflict`.
fn conflict_or(err: DbErr, conflict: impl FnOnce() -> AccountError) -> AccountError {
    if is_unique_violation(&err) {
        conflict()
    } else {
        AccountError::Database(err)
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create_admin(&self, login: String, password_hash: String) -> AccountResult<Admin> {
        let model = admin::ActiveModel {
            id: Set(Uuid::now_v7()),
            login: Set(login.clone()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or(e, || AccountError::LoginTaken(login)))?;

        tracing::info!(admin_id = %model.id, "Created admin");
        Ok(Credentials::<Admin>::from(model).account)
    }

    async fn find_admin(&self, login: &str) -> AccountResult<Option<Credentials<Admin>>> {
        let model = admin::Entity::find()
            .filter(admin::Column::Login.eq(login))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn create_seller(&self, input: NewSeller) -> AccountResult<Seller> {
        let email = input.email.clone();
        let model = seller::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            shop_name: Set(input.shop_name),
            balance: Set(0.0),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or(e, || AccountError::EmailTaken(email)))?;

        tracing::info!(seller_id = %model.id, "Created seller");
        Ok(model.into())
    }

    async fn find_seller_by_email(
        &self,
        email: &str,
    ) -> AccountResult<Option<Credentials<Seller>>> {
        let model = seller::Entity::find()
            .filter(seller::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn get_seller(&self, id: Uuid) -> AccountResult<Option<Seller>> {
        let model = seller::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update_seller(&self, id: Uuid, changes: SellerChanges) -> AccountResult<Seller> {
        let model = seller::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::SellerNotFound(id))?;

        let mut active: seller::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(shop_name) = changes.shop_name {
            active.shop_name = Set(shop_name);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        let email = changes.email.clone().unwrap_or_default();
        if let Some(new_email) = changes.email {
            active.email = Set(new_email);
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or(e, || AccountError::EmailTaken(email)))?;

        tracing::info!(seller_id = %id, "Updated seller");
        Ok(model.into())
    }

    async fn create_buyer(&self, input: NewBuyer) -> AccountResult<Buyer> {
        let email = input.email.clone();
        let model = buyer::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(input.name),
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await
        .map_err(|e| conflict_or(e, || AccountError::EmailTaken(email)))?;

        tracing::info!(buyer_id = %model.id, "Created buyer");
        Ok(model.into())
    }

    async fn find_buyer_by_email(&self, email: &str) -> AccountResult<Option<Credentials<Buyer>>> {
        let model = buyer::Entity::find()
            .filter(buyer::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn get_buyer(&self, id: Uuid) -> AccountResult<Option<Buyer>> {
        let model = buyer::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn update_buyer(&self, id: Uuid, changes: BuyerChanges) -> AccountResult<Buyer> {
        let model = buyer::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AccountError::BuyerNotFound(id))?;

        let mut active: buyer::ActiveModel = model.into();
        if let Some(name) = changes.name {
            active.name = Set(name);
        }
        if let Some(hash) = changes.password_hash {
            active.password_hash = Set(hash);
        }
        let email = changes.email.clone().unwrap_or_default();
        if let Some(new_email) = changes.email {
            active.email = Set(new_email);
        }

        let model = active
            .update(&self.db)
            .await
            .map_err(|e| conflict_or(e, || AccountError::EmailTaken(email)))?;

        tracing::info!(buyer_id = %id, "Updated buyer");
        Ok(model.into())
    }

    async fn add_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<()> {
        let result = favorite::ActiveModel {
            buyer_id: Set(buyer_id),
            item_id: Set(item_id),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(buyer_id = %buyer_id, item_id, "Added favorite");
                Ok(())
            }
            Err(e) if is_unique_violation(&e) => Ok(()),
            Err(e) => match e.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(AccountError::ItemNotFound(item_id))
                }
                _ => Err(AccountError::Database(e)),
            },
        }
    }

    async fn remove_favorite(&self, buyer_id: Uuid, item_id: i32) -> AccountResult<bool> {
        let result = favorite::Entity::delete_by_id((buyer_id, item_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn favorite_item_ids(&self, buyer_id: Uuid) -> AccountResult<Vec<i32>> {
        let rows = favorite::Entity::find()
            .filter(favorite::Column::BuyerId.eq(buyer_id))
            .order_by_asc(favorite::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(|row| row.item_id).collect())
    }
}
