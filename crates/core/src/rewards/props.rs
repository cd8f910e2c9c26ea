//! Property-based tests for point accrual.
//!
//! - Accrued points never exceed the order amount
//! - Accrued points match the floor of the amount exactly
//! - Validation accepts exactly the positive deltas

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::accrual::{parse_order_amount, points_for_amount};
use super::validation::validate_redemption;

/// Strategy to generate non-negative amounts with cent precision
/// (0.00 to 10,000,000.00).
fn amount_cents() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* non-negative amount, the accrued points never exceed the
    /// amount and undershoot it by less than one whole unit.
    #[test]
    fn prop_points_bracket_the_amount(amount in amount_cents()) {
        let points = points_for_amount(amount);
        prop_assert!(Decimal::from(points) <= amount);
        prop_assert!(Decimal::from(points + 1) > amount);
    }

    /// *For any* whole-unit amount, the accrued points equal the amount.
    #[test]
    fn prop_whole_amounts_accrue_exactly(units in 0i64..10_000_000) {
        prop_assert_eq!(points_for_amount(Decimal::from(units)), units);
    }

    /// *For any* amount, parsing its wire representation accrues the same
    /// points as the amount itself.
    #[test]
    fn prop_parse_is_faithful(amount in amount_cents()) {
        let parsed = parse_order_amount(Some(&amount.to_string()));
        prop_assert_eq!(points_for_amount(parsed), points_for_amount(amount));
    }

    /// *For any* delta, validation accepts it iff it is positive.
    #[test]
    fn prop_validation_accepts_exactly_positive(points in any::<i64>()) {
        prop_assert_eq!(validate_redemption(points).is_ok(), points > 0);
    }
}
