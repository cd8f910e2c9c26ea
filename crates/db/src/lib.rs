//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the points ledger
//! - Repository abstractions for data access
//! - The atomic ledger unit (balance mutation + transaction append)
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{CustomerRepository, LedgerRepository, TransactionRepository};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use rewards_shared::config::DatabaseConfig;

/// Establishes a pooled connection to the database using the configured
/// pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.as_str());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections);

    Database::connect(options).await
}
