//! Transaction log repository: append-only point-change records.
//!
//! No dedup by `order_id` happens here — that is the ledger's call to make
//! inside its atomic unit.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::reward_transactions;

/// Input for appending a transaction record.
#[derive(Debug, Clone)]
pub struct AppendTransactionInput {
    /// Owning customer.
    pub customer_id: Uuid,
    /// Signed point delta.
    pub points: i64,
    /// Free-text reason.
    pub description: String,
    /// Order total, for order-driven awards.
    pub order_amount: Option<Decimal>,
    /// Originating order identifier, for order-driven awards.
    pub order_id: Option<String>,
}

/// Repository for the append-only transaction log.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction log repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends an immutable transaction record inside the caller's database
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn append(
        &self,
        txn: &DatabaseTransaction,
        input: AppendTransactionInput,
    ) -> Result<reward_transactions::Model, DbErr> {
        let record = reward_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(input.customer_id),
            points: Set(input.points),
            description: Set(input.description),
            order_amount: Set(input.order_amount),
            order_id: Set(input.order_id),
            created_at: Set(Utc::now().into()),
        };

        record.insert(txn).await
    }

    /// Lists a customer's transactions, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<reward_transactions::Model>, DbErr> {
        reward_transactions::Entity::find()
            .filter(reward_transactions::Column::CustomerId.eq(customer_id))
            .order_by_desc(reward_transactions::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Finds a customer's transaction for a given order, inside the
    /// caller's database transaction. Supports the ledger's delivery dedup.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_order(
        &self,
        txn: &DatabaseTransaction,
        customer_id: Uuid,
        order_id: &str,
    ) -> Result<Option<reward_transactions::Model>, DbErr> {
        reward_transactions::Entity::find()
            .filter(reward_transactions::Column::CustomerId.eq(customer_id))
            .filter(reward_transactions::Column::OrderId.eq(order_id))
            .one(txn)
            .await
    }
}
