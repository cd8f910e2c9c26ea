//! Loyalty point domain logic.
//!
//! This module implements the pure half of the points ledger:
//! - Order event payload types
//! - Point accrual derivation from completed orders
//! - Input validation for award and redemption requests

pub mod accrual;
pub mod error;
pub mod event;
pub mod validation;

#[cfg(test)]
mod props;

pub use accrual::{OrderAccrual, accrual_for_order, points_for_amount};
pub use error::RewardError;
pub use event::{OrderCreatedEvent, OrderCustomer, OrderId};
pub use validation::{validate_award, validate_redemption};
