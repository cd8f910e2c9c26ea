//! Customer repository for reward account database operations.

use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::reward_customers;

/// Input for the get-or-create upsert.
#[derive(Debug, Clone)]
pub struct UpsertCustomerInput {
    /// Identity key; globally unique.
    pub email: String,
    /// Owning merchant domain, written only on creation.
    pub shop: String,
    /// First name; overwrites the stored value, including with `None`.
    pub first_name: Option<String>,
    /// Last name; overwrites the stored value, including with `None`.
    pub last_name: Option<String>,
}

/// Customer repository for account lookup and creation.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    db: DatabaseConnection,
}

impl CustomerRepository {
    /// Creates a new customer repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a customer by email (exact match).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<reward_customers::Model>, DbErr> {
        reward_customers::Entity::find()
            .filter(reward_customers::Column::Email.eq(email))
            .one(&self.db)
            .await
    }

    /// Finds a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<reward_customers::Model>, DbErr> {
        reward_customers::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists customers for a shop, highest balance first.
    ///
    /// Ties are broken by `created_at` ascending so the listing is stable
    /// across reads.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_shop(&self, shop: &str) -> Result<Vec<reward_customers::Model>, DbErr> {
        reward_customers::Entity::find()
            .filter(reward_customers::Column::Shop.eq(shop))
            .order_by_desc(reward_customers::Column::TotalPoints)
            .order_by_asc(reward_customers::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Gets or creates the customer for an email, inside the caller's
    /// database transaction.
    ///
    /// Expressed as a conditional insert riding on the unique email index:
    /// on conflict the name fields are updated to the supplied values and
    /// `shop` and `total_points` are left untouched. Safe under concurrent
    /// invocation with the same email — the storage layer guarantees at most
    /// one account per email, no application-level locking involved.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn upsert(
        &self,
        txn: &DatabaseTransaction,
        input: &UpsertCustomerInput,
    ) -> Result<reward_customers::Model, DbErr> {
        let now = Utc::now().into();

        let candidate = reward_customers::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            shop: Set(input.shop.clone()),
            first_name: Set(input.first_name.clone()),
            last_name: Set(input.last_name.clone()),
            total_points: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        reward_customers::Entity::insert(candidate)
            .on_conflict(
                OnConflict::column(reward_customers::Column::Email)
                    .update_columns([
                        reward_customers::Column::FirstName,
                        reward_customers::Column::LastName,
                        reward_customers::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(txn)
            .await?;

        reward_customers::Entity::find()
            .filter(reward_customers::Column::Email.eq(&input.email))
            .one(txn)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("upserted customer vanished: {}", input.email))
            })
    }
}
