//! `SeaORM` Entity for the `reward_transactions` table.
//!
//! Rows are append-only: created by the ledger, never mutated or deleted.
//! They form the immutable audit trail backing each customer balance.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reward_transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Signed point delta: positive for awards, negative for redemptions.
    pub points: i64,
    pub description: String,
    /// Present only for order-driven awards.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub order_amount: Option<Decimal>,
    /// Originating order identifier, when order-driven.
    pub order_id: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reward_customers::Entity",
        from = "Column::CustomerId",
        to = "super::reward_customers::Column::Id",
        on_delete = "Cascade"
    )]
    RewardCustomers,
}

impl Related<super::reward_customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RewardCustomers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
