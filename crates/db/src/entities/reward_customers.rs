//! `SeaORM` Entity for the `reward_customers` table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "reward_customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Globally unique identity key; the upsert target.
    #[sea_orm(unique)]
    pub email: String,
    /// Owning merchant domain. Stored, not part of the uniqueness key.
    pub shop: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_points: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reward_transactions::Entity")]
    RewardTransactions,
}

impl Related<super::reward_transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RewardTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
