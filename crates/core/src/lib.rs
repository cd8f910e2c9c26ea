//! Core business logic for Rewards.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and the point-accrual
//! calculation live here.
//!
//! # Modules
//!
//! - `rewards` - Point accrual, order events, and input validation

pub mod rewards;
