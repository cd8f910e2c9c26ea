//! Repository abstractions for data access.

pub mod customer;
pub mod ledger;
pub mod transaction;

pub use customer::CustomerRepository;
pub use ledger::{AddPointsInput, CustomerWithTransactions, LedgerError, LedgerRepository};
pub use transaction::TransactionRepository;
