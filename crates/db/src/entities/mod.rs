//! `SeaORM` entity definitions.

pub mod reward_customers;
pub mod reward_transactions;
