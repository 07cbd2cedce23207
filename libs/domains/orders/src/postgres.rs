use async_trait::async_trait;
use chrono::Utc;
use domain_accounts::entity::seller;
use domain_catalog::entity::item;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, SqlErr, TransactionTrait,
};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::{
    entity::{cart_item, order, order_item},
    error::{OrderError, OrderResult},
    models::{CartItem, Order, OrderItem, OrderLine, OrderStatus, Window},
    repository::{CartRepository, OrderRepository},
};

fn item_missing_or(item_id: i32, err: DbErr) -> OrderError {
    match err.sql_err() {
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => OrderError::ItemNotFound(item_id),
        _ => OrderError::Database(err),
    }
}

#[derive(Clone)]
pub struct PgCartRepository {
    db: DatabaseConnection,
}

impl PgCartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn lines(&self, buyer_id: Uuid) -> OrderResult<Vec<CartItem>> {
        let rows = cart_item::Entity::find()
            .filter(cart_item::Column::BuyerId.eq(buyer_id))
            .order_by_asc(cart_item::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn put(&self, buyer_id: Uuid, item_id: i32, quantity: i32) -> OrderResult<CartItem> {
        let row = cart_item::Entity::insert(cart_item::ActiveModel {
            buyer_id: Set(buyer_id),
            item_id: Set(item_id),
            quantity: Set(quantity),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([cart_item::Column::BuyerId, cart_item::Column::ItemId])
                .update_column(cart_item::Column::Quantity)
                .to_owned(),
        )
        .exec_with_returning(&self.db)
        .await
        .map_err(|e| item_missing_or(item_id, e))?;

        tracing::info!(buyer_id = %buyer_id, item_id, quantity, "Put item into cart");
        Ok(row.into())
    }

    async fn set_quantity(
        &self,
        buyer_id: Uuid,
        item_id: i32,
        quantity: i32,
    ) -> OrderResult<Option<CartItem>> {
        let Some(row) = cart_item::Entity::find()
            .filter(cart_item::Column::BuyerId.eq(buyer_id))
            .filter(cart_item::Column::ItemId.eq(item_id))
            .one(&self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: cart_item::ActiveModel = row.into();
        active.quantity = Set(quantity);
        Ok(Some(active.update(&self.db).await?.into()))
    }

    async fn remove(&self, buyer_id: Uuid, item_id: i32) -> OrderResult<bool> {
        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::BuyerId.eq(buyer_id))
            .filter(cart_item::Column::ItemId.eq(item_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self, buyer_id: Uuid) -> OrderResult<u64> {
        let result = cart_item::Entity::delete_many()
            .filter(cart_item::Column::BuyerId.eq(buyer_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[derive(Clone)]
pub struct PgOrderRepository {
    db: DatabaseConnection,
}

impl PgOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn assemble(model: order::Model, mut items: Vec<order_item::Model>) -> Order {
    items.sort_by_key(|row| row.id);
    model.into_order(items.into_iter().map(OrderItem::from).collect())
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn place(&self, buyer_id: Uuid, lines: Vec<OrderLine>) -> OrderResult<Order> {
        let txn = self.db.begin().await?;

        // Rows are locked in id order so concurrent checkouts cannot deadlock
        let item_ids: Vec<i32> = lines.iter().map(|line| line.item_id).collect();
        let stock: HashMap<i32, i32> = item::Entity::find()
            .filter(item::Column::Id.is_in(item_ids))
            .order_by_asc(item::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| (row.id, row.quantity))
            .collect();

        for line in &lines {
            let available = *stock
                .get(&line.item_id)
                .ok_or(OrderError::ItemNotFound(line.item_id))?;
            if available < line.quantity {
                return Err(OrderError::InsufficientStock {
                    item_id: line.item_id,
                    requested: line.quantity,
                    available,
                });
            }
        }

        let mut credits: BTreeMap<Uuid, f64> = BTreeMap::new();
        for line in &lines {
            *credits.entry(line.seller_id).or_default() += line.total;
        }
        let balances: HashMap<Uuid, f64> = seller::Entity::find()
            .filter(seller::Column::Id.is_in(credits.keys().copied()))
            .order_by_asc(seller::Column::Id)
            .lock_exclusive()
            .all(&txn)
            .await?
            .into_iter()
            .map(|row| (row.id, row.balance))
            .collect();

        let created_at = Utc::now();
        let order = order::ActiveModel {
            buyer_id: Set(buyer_id),
            total: Set(lines.iter().map(|line| line.total).sum()),
            status: Set(OrderStatus::Processing.to_string()),
            created_at: Set(created_at.into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let mut rows = Vec::with_capacity(lines.len());
        for line in &lines {
            item::ActiveModel {
                id: Unchanged(line.item_id),
                quantity: Set(stock[&line.item_id] - line.quantity),
                ..Default::default()
            }
            .update(&txn)
            .await?;

            let row = order_item::ActiveModel {
                order_id: Set(order.id),
                item_id: Set(line.item_id),
                seller_id: Set(line.seller_id),
                quantity: Set(line.quantity),
                unit_price: Set(line.unit_price),
                total: Set(line.total),
                created_at: Set(created_at.into()),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
            rows.push(row);
        }

        for (seller_id, credit) in &credits {
            let balance = balances.get(seller_id).copied().unwrap_or_default();
            seller::ActiveModel {
                id: Unchanged(*seller_id),
                balance: Set(balance + credit),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        cart_item::Entity::delete_many()
            .filter(cart_item::Column::BuyerId.eq(buyer_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(order_id = order.id, buyer_id = %buyer_id, "Placed order");
        Ok(assemble(order, rows))
    }

    async fn get(&self, id: i32) -> OrderResult<Option<Order>> {
        let found = order::Entity::find_by_id(id)
            .find_with_related(order_item::Entity)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .next()
            .map(|(model, items)| assemble(model, items)))
    }

    async fn list_for_buyer(&self, buyer_id: Uuid) -> OrderResult<Vec<Order>> {
        let found = order::Entity::find()
            .filter(order::Column::BuyerId.eq(buyer_id))
            .order_by_desc(order::Column::Id)
            .find_with_related(order_item::Entity)
            .all(&self.db)
            .await?;
        Ok(found
            .into_iter()
            .map(|(model, items)| assemble(model, items))
            .collect())
    }

    async fn seller_revenue(&self, seller_id: Uuid, window: Window) -> OrderResult<f64> {
        let totals = order_item::Entity::find()
            .filter(order_item::Column::SellerId.eq(seller_id))
            .filter(order_item::Column::CreatedAt.gte(window.from))
            .filter(order_item::Column::CreatedAt.lt(window.to))
            .select_only()
            .column(order_item::Column::Total)
            .into_tuple::<f64>()
            .all(&self.db)
            .await?;
        Ok(totals.into_iter().sum())
    }
}
