//! Initial database migration.
//!
//! Creates the `reward_customers` and `reward_transactions` tables.
//!
//! Built with the schema builder rather than raw SQL so the same migration
//! runs on Postgres in production and on SQLite in the integration suite.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RewardCustomers::Table)
                    .col(
                        ColumnDef::new(RewardCustomers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RewardCustomers::Email).string().not_null())
                    .col(ColumnDef::new(RewardCustomers::Shop).string().not_null())
                    .col(ColumnDef::new(RewardCustomers::FirstName).string())
                    .col(ColumnDef::new(RewardCustomers::LastName).string())
                    .col(
                        ColumnDef::new(RewardCustomers::TotalPoints)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(RewardCustomers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardCustomers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The concurrency story for get-or-create rests on this constraint:
        // at most one account per email, enforced by the storage layer.
        manager
            .create_index(
                Index::create()
                    .name("idx_reward_customers_email")
                    .table(RewardCustomers::Table)
                    .col(RewardCustomers::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reward_customers_shop")
                    .table(RewardCustomers::Table)
                    .col(RewardCustomers::Shop)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RewardTransactions::Table)
                    .col(
                        ColumnDef::new(RewardTransactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RewardTransactions::CustomerId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardTransactions::Points)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardTransactions::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RewardTransactions::OrderAmount).decimal_len(12, 2))
                    .col(ColumnDef::new(RewardTransactions::OrderId).string())
                    .col(
                        ColumnDef::new(RewardTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reward_transactions_customer")
                            .from(RewardTransactions::Table, RewardTransactions::CustomerId)
                            .to(RewardCustomers::Table, RewardCustomers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reward_transactions_customer_created")
                    .table(RewardTransactions::Table)
                    .col(RewardTransactions::CustomerId)
                    .col(RewardTransactions::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RewardTransactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RewardCustomers::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum RewardCustomers {
    Table,
    Id,
    Email,
    Shop,
    FirstName,
    LastName,
    TotalPoints,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RewardTransactions {
    Table,
    Id,
    CustomerId,
    Points,
    Description,
    OrderAmount,
    OrderId,
    CreatedAt,
}
