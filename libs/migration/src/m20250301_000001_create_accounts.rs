use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_uuid(Admins::Id))
                    .col(string_uniq(Admins::Login))
                    .col(string(Admins::PasswordHash))
                    .col(
                        timestamp_with_time_zone(Admins::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Sellers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Sellers::Id))
                    .col(string(Sellers::Name))
                    .col(string_uniq(Sellers::Email))
                    .col(string(Sellers::PasswordHash))
                    .col(string(Sellers::ShopName).default(""))
                    .col(
                        double(Sellers::Balance)
                            .default(0.0)
                            .check(Expr::col(Sellers::Balance).gte(0.0)),
                    )
                    .col(
                        timestamp_with_time_zone(Sellers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Buyers::Table)
                    .if_not_exists()
                    .col(pk_uuid(Buyers::Id))
                    .col(string(Buyers::Name))
                    .col(string_uniq(Buyers::Email))
                    .col(string(Buyers::PasswordHash))
                    .col(
                        timestamp_with_time_zone(Buyers::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Buyers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sellers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Admins {
    Table,
    Id,
    Login,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Sellers {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    ShopName,
    Balance,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum Buyers {
    Table,
    Id,
    Name,
    Email,
    PasswordHash,
    CreatedAt,
}
