use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_create_accounts::{Buyers, Sellers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reference tables share one shape
        for table in [Reference::Categories, Reference::Brands, Reference::Materials] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(pk_auto(Reference::Id))
                        .col(string(Reference::Name))
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Items::Table)
                    .if_not_exists()
                    .col(pk_auto(Items::Id))
                    .col(string(Items::Name))
                    .col(text(Items::Description).default(""))
                    .col(string(Items::Article).default(""))
                    .col(double(Items::Price).check(Expr::col(Items::Price).gte(0.0)))
                    .col(double_null(Items::PriceWithDiscount))
                    .col(
                        integer(Items::Quantity)
                            .default(0)
                            .check(Expr::col(Items::Quantity).gte(0)),
                    )
                    .col(double(Items::Length).default(0.0))
                    .col(double(Items::Width).default(0.0))
                    .col(double(Items::Height).default(0.0))
                    .col(double(Items::Weight).default(0.0))
                    .col(integer(Items::CategoryId))
                    .col(integer(Items::BrandId))
                    .col(integer(Items::MaterialId))
                    .col(uuid(Items::SellerId))
                    .col(
                        timestamp_with_time_zone(Items::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_category_id")
                            .from(Items::Table, Items::CategoryId)
                            .to(Reference::Categories, Reference::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_brand_id")
                            .from(Items::Table, Items::BrandId)
                            .to(Reference::Brands, Reference::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_material_id")
                            .from(Items::Table, Items::MaterialId)
                            .to(Reference::Materials, Reference::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_items_seller_id")
                            .from(Items::Table, Items::SellerId)
                            .to(Sellers::Table, Sellers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_items_category_id", Items::CategoryId),
            ("idx_items_brand_id", Items::BrandId),
            ("idx_items_material_id", Items::MaterialId),
            ("idx_items_seller_id", Items::SellerId),
            ("idx_items_price", Items::Price),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Items::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(ItemImages::Table)
                    .if_not_exists()
                    .col(pk_auto(ItemImages::Id))
                    .col(integer(ItemImages::ItemId))
                    .col(string(ItemImages::Url))
                    .col(
                        timestamp_with_time_zone(ItemImages::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_item_images_item_id")
                            .from(ItemImages::Table, ItemImages::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_item_images_item_id")
                    .table(ItemImages::Table)
                    .col(ItemImages::ItemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BuyerFavorites::Table)
                    .if_not_exists()
                    .col(uuid(BuyerFavorites::BuyerId))
                    .col(integer(BuyerFavorites::ItemId))
                    .col(
                        timestamp_with_time_zone(BuyerFavorites::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(BuyerFavorites::BuyerId)
                            .col(BuyerFavorites::ItemId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buyer_favorites_buyer_id")
                            .from(BuyerFavorites::Table, BuyerFavorites::BuyerId)
                            .to(Buyers::Table, Buyers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_buyer_favorites_item_id")
                            .from(BuyerFavorites::Table, BuyerFavorites::ItemId)
                            .to(Items::Table, Items::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BuyerFavorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ItemImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Items::Table).to_owned())
            .await?;
        for table in [Reference::Materials, Reference::Brands, Reference::Categories] {
            manager
                .drop_table(Table::drop().table(table).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
pub enum Reference {
    Categories,
    Brands,
    Materials,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Items {
    Table,
    Id,
    Name,
    Description,
    Article,
    Price,
    PriceWithDiscount,
    Quantity,
    Length,
    Width,
    Height,
    Weight,
    CategoryId,
    BrandId,
    MaterialId,
    SellerId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ItemImages {
    Table,
    Id,
    ItemId,
    Url,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BuyerFavorites {
    Table,
    BuyerId,
    ItemId,
    CreatedAt,
}
