//! Error types for reward operations.

use rewards_shared::AppError;
use thiserror::Error;

/// Validation errors for reward operations.
///
/// These are raised before any storage call; a rejected input never reaches
/// the ledger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RewardError {
    /// Customer email is missing or empty.
    #[error("Customer email must not be empty")]
    EmptyEmail,

    /// Point delta is zero or negative.
    #[error("Points must be a positive integer, got {0}")]
    NonPositivePoints(i64),
}

impl From<RewardError> for AppError {
    fn from(err: RewardError) -> Self {
        Self::Validation(err.to_string())
    }
}
