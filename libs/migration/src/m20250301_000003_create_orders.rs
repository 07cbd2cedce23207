use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_accounts::{Buyers, Sellers};
use crate::m20250301_000002_create_catalog::Items;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CartItems::Table)
                    .if_not_exists()
                    .col(pk_auto(CartItems::Id))
                    .col(uuid(CartItems::BuyerId))
                    .col(integer(CartItems::ItemId))
                    .col(integer(CartItems::Quantity).check(Expr::col(CartItems::Quantity).gt(0)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_buyer_id")
                            .from(CartItems::Table, CartItems::BuyerId)
                            .to(Buyers::Table, Buyers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cart_items_item_id")
                            .from(CartItems::Table, CartItems::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_cart_items_buyer_item")
                    .table(CartItems::Table)
                    .col(CartItems::BuyerId)
                    .col(CartItems::ItemId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(pk_auto(Orders::Id))
                    .col(uuid(Orders::BuyerId))
                    .col(double(Orders::Total))
                    .col(string(Orders::Status).default("processing"))
                    .col(
                        timestamp_with_time_zone(Orders::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_buyer_id")
                            .from(Orders::Table, Orders::BuyerId)
                            .to(Buyers::Table, Buyers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_buyer_id")
                    .table(Orders::Table)
                    .col(Orders::BuyerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderItems::Table)
                    .if_not_exists()
                    .col(pk_auto(OrderItems::Id))
                    .col(integer(OrderItems::OrderId))
                    .col(integer(OrderItems::ItemId))
                    .col(uuid(OrderItems::SellerId))
                    .col(integer(OrderItems::Quantity))
                    .col(double(OrderItems::UnitPrice))
                    .col(double(OrderItems::Total))
                    .col(
                        timestamp_with_time_zone(OrderItems::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_order_id")
                            .from(OrderItems::Table, OrderItems::OrderId)
                            .to(Orders::Table, Orders::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_item_id")
                            .from(OrderItems::Table, OrderItems::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_items_seller_id")
                            .from(OrderItems::Table, OrderItems::SellerId)
                            .to(Sellers::Table, Sellers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Earnings queries filter by seller and time window
        manager
            .create_index(
                Index::create()
                    .name("idx_order_items_seller_created")
                    .table(OrderItems::Table)
                    .col(OrderItems::SellerId)
                    .col(OrderItems::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(pk_auto(Reviews::Id))
                    .col(integer(Reviews::ItemId))
                    .col(uuid(Reviews::BuyerId))
                    .col(
                        integer(Reviews::Rating)
                            .check(Expr::col(Reviews::Rating).between(1, 5)),
                    )
                    .col(text(Reviews::Comment).default(""))
                    .col(
                        timestamp_with_time_zone(Reviews::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_item_id")
                            .from(Reviews::Table, Reviews::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_buyer_id")
                            .from(Reviews::Table, Reviews::BuyerId)
                            .to(Buyers::Table, Buyers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_item_id")
                    .table(Reviews::Table)
                    .col(Reviews::ItemId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OrderItems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CartItems::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum CartItems {
    Table,
    Id,
    BuyerId,
    ItemId,
    Quantity,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    BuyerId,
    Total,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OrderItems {
    Table,
    Id,
    OrderId,
    ItemId,
    SellerId,
    Quantity,
    UnitPrice,
    Total,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    ItemId,
    BuyerId,
    Rating,
    Comment,
    CreatedAt,
}
