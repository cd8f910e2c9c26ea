//! The points ledger: atomic balance mutation + transaction append.
//!
//! This is the only state-changing surface for reward balances. Every
//! mutation runs as one database transaction so the balance and its audit
//! trail can never diverge: `total_points` always equals the sum of the
//! customer's transaction deltas, at every observable point in time.
//!
//! The balance is moved with an in-database `UPDATE ... SET total_points =
//! total_points + ?`, never an application-level read-modify-write, so
//! concurrent mutations for the same customer serialize at the storage
//! layer and cannot lose updates.

use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use uuid::Uuid;

use rewards_core::rewards::{RewardError, validate_award, validate_redemption};

use crate::entities::{reward_customers, reward_transactions};
use crate::repositories::customer::{CustomerRepository, UpsertCustomerInput};
use crate::repositories::transaction::{AppendTransactionInput, TransactionRepository};

/// Error types for ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Caller-supplied fields failed validation; nothing was written.
    #[error(transparent)]
    Validation(#[from] RewardError),

    /// Referenced customer does not exist.
    #[error("Customer not found: {0}")]
    CustomerNotFound(Uuid),

    /// Database error; the atomic unit was rolled back.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<LedgerError> for rewards_shared::AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Validation(e) => Self::Validation(e.to_string()),
            LedgerError::CustomerNotFound(id) => Self::NotFound(format!("Customer {id}")),
            LedgerError::Database(e) => Self::Database(e.to_string()),
        }
    }
}

/// Input for awarding points.
#[derive(Debug, Clone)]
pub struct AddPointsInput {
    /// Customer email; resolves or creates the account.
    pub email: String,
    /// Owning merchant domain, used on account creation.
    pub shop: String,
    /// First name passed through to the account record.
    pub first_name: Option<String>,
    /// Last name passed through to the account record.
    pub last_name: Option<String>,
    /// Points to award; must be positive.
    pub points: i64,
    /// Transaction description.
    pub description: String,
    /// Order total, for order-driven awards.
    pub order_amount: Option<Decimal>,
    /// Originating order identifier; awards are deduplicated on it.
    pub order_id: Option<String>,
}

/// A customer with its fully materialized transaction history,
/// most recent first.
#[derive(Debug, Clone)]
pub struct CustomerWithTransactions {
    /// The customer record.
    pub customer: reward_customers::Model,
    /// Transaction history, `created_at` descending.
    pub transactions: Vec<reward_transactions::Model>,
}

/// The ledger service over customers and their transaction log.
#[derive(Debug, Clone)]
pub struct LedgerRepository {
    db: DatabaseConnection,
    customers: CustomerRepository,
    transactions: TransactionRepository,
}

impl LedgerRepository {
    /// Creates a new ledger over the given connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: CustomerRepository::new(db.clone()),
            transactions: TransactionRepository::new(db.clone()),
            db,
        }
    }

    /// Awards points to the customer identified by email, creating the
    /// account if needed.
    ///
    /// As one atomic unit: resolves or creates the account (names passed
    /// through), increments `total_points`, and appends the `+points`
    /// transaction. A crash or conflicting concurrent update can never
    /// leave the balance without its matching record, or vice versa.
    ///
    /// If `order_id` is supplied and the customer already holds a
    /// transaction for that order, the call is an idempotent no-op: a
    /// retried webhook delivery must not double-award.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `points <= 0` or the email is empty (no
    /// mutation performed), or `Database` if the atomic unit fails (fully
    /// rolled back).
    pub async fn add_points(
        &self,
        input: AddPointsInput,
    ) -> Result<CustomerWithTransactions, LedgerError> {
        validate_award(&input.email, input.points)?;

        let txn = self.db.begin().await?;

        let customer = self
            .customers
            .upsert(
                &txn,
                &UpsertCustomerInput {
                    email: input.email.clone(),
                    shop: input.shop.clone(),
                    first_name: input.first_name.clone(),
                    last_name: input.last_name.clone(),
                },
            )
            .await?;

        if let Some(order_id) = input.order_id.as_deref() {
            let replayed = self
                .transactions
                .find_by_order(&txn, customer.id, order_id)
                .await?;
            if replayed.is_some() {
                // Redelivery of an already-awarded order: keep the name
                // refresh from the upsert, award nothing.
                tracing::debug!(
                    customer_id = %customer.id,
                    order_id,
                    "Order already awarded, skipping"
                );
                txn.commit().await?;
                return self.require_customer(customer.id).await;
            }
        }

        self.apply_delta(&txn, customer.id, input.points).await?;

        self.transactions
            .append(
                &txn,
                AppendTransactionInput {
                    customer_id: customer.id,
                    points: input.points,
                    description: input.description,
                    order_amount: input.order_amount,
                    order_id: input.order_id,
                },
            )
            .await?;

        txn.commit().await?;

        self.require_customer(customer.id).await
    }

    /// Removes points from an existing customer.
    ///
    /// Atomically decrements `total_points` and appends the `-points`
    /// transaction. The balance is allowed to go negative: the ledger
    /// records exactly what was asked and the history keeps reconciling.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `points <= 0`, `CustomerNotFound` if the id
    /// does not resolve, or `Database` on storage failure (fully rolled
    /// back).
    pub async fn remove_points(
        &self,
        customer_id: Uuid,
        points: i64,
        description: String,
    ) -> Result<CustomerWithTransactions, LedgerError> {
        validate_redemption(points)?;

        let txn = self.db.begin().await?;

        let updated = self.apply_delta(&txn, customer_id, -points).await?;
        if updated == 0 {
            txn.rollback().await?;
            return Err(LedgerError::CustomerNotFound(customer_id));
        }

        self.transactions
            .append(
                &txn,
                AppendTransactionInput {
                    customer_id,
                    points: -points,
                    description,
                    order_amount: None,
                    order_id: None,
                },
            )
            .await?;

        txn.commit().await?;

        self.require_customer(customer_id).await
    }

    /// Gets a customer with its transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<CustomerWithTransactions>, LedgerError> {
        let Some(customer) = self.customers.find_by_id(customer_id).await? else {
            return Ok(None);
        };
        let transactions = self.transactions.list_by_customer(customer.id).await?;
        Ok(Some(CustomerWithTransactions {
            customer,
            transactions,
        }))
    }

    /// Lists a shop's customers, highest balance first, each with its
    /// transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_customers(
        &self,
        shop: &str,
    ) -> Result<Vec<CustomerWithTransactions>, LedgerError> {
        let customers = self.customers.list_by_shop(shop).await?;

        let mut results = Vec::with_capacity(customers.len());
        for customer in customers {
            let transactions = self.transactions.list_by_customer(customer.id).await?;
            results.push(CustomerWithTransactions {
                customer,
                transactions,
            });
        }

        Ok(results)
    }

    /// Moves the balance in-place inside the caller's database transaction.
    ///
    /// Returns the number of rows touched (0 = no such customer).
    async fn apply_delta(
        &self,
        txn: &DatabaseTransaction,
        customer_id: Uuid,
        delta: i64,
    ) -> Result<u64, LedgerError> {
        let result = reward_customers::Entity::update_many()
            .col_expr(
                reward_customers::Column::TotalPoints,
                Expr::col(reward_customers::Column::TotalPoints).add(delta),
            )
            .col_expr(
                reward_customers::Column::UpdatedAt,
                Expr::value(sea_orm::prelude::DateTimeWithTimeZone::from(
                    chrono::Utc::now(),
                )),
            )
            .filter(reward_customers::Column::Id.eq(customer_id))
            .exec(txn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Loads a customer that is known to exist.
    async fn require_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<CustomerWithTransactions, LedgerError> {
        self.get_customer(customer_id)
            .await?
            .ok_or(LedgerError::CustomerNotFound(customer_id))
    }
}
