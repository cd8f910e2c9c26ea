//! Point accrual derivation from completed orders.
//!
//! The accrual rule is one point per whole currency unit spent, rounded
//! down. Orders below one currency unit, orders without a linked customer,
//! and orders whose total cannot be parsed are legitimately point-less:
//! they derive no accrual and are not errors.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use super::event::OrderCreatedEvent;

/// A fully derived accrual, ready to be applied to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAccrual {
    /// Customer email the points belong to.
    pub email: String,
    /// Customer first name, passed through to the account record.
    pub first_name: Option<String>,
    /// Customer last name, passed through to the account record.
    pub last_name: Option<String>,
    /// Points to award; always positive.
    pub points: i64,
    /// Order total the points were derived from.
    pub order_amount: Decimal,
    /// Originating order identifier, used for delivery dedup.
    pub order_id: String,
    /// Ledger transaction description.
    pub description: String,
}

/// Derives the point award for an order amount: one point per whole
/// currency unit, rounded down.
#[must_use]
pub fn points_for_amount(amount: Decimal) -> i64 {
    amount.floor().to_i64().unwrap_or(0)
}

/// Parses an order total as carried on the wire. Unparsable or missing
/// totals derive a zero amount rather than an error.
#[must_use]
pub fn parse_order_amount(raw: Option<&str>) -> Decimal {
    raw.and_then(|s| Decimal::from_str(s.trim()).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Derives the accrual for an order event, if the event earns one.
///
/// Returns `None` when the event carries no customer, no email, or a total
/// below one currency unit. The caller acknowledges such events without
/// touching the ledger.
#[must_use]
pub fn accrual_for_order(event: &OrderCreatedEvent) -> Option<OrderAccrual> {
    let customer = event.customer.as_ref()?;
    let email = customer.email.as_deref()?.trim();
    if email.is_empty() {
        return None;
    }

    let amount = parse_order_amount(event.total_price.as_deref());
    let points = points_for_amount(amount);
    if points <= 0 {
        return None;
    }

    Some(OrderAccrual {
        email: email.to_string(),
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        points,
        order_amount: amount,
        order_id: event.id.to_string(),
        description: format!("Order #{} - {:.2} spent", event.order_number, amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewards::event::{OrderCustomer, OrderId};
    use rust_decimal_macros::dec;

    fn order(customer: Option<OrderCustomer>, total_price: Option<&str>) -> OrderCreatedEvent {
        OrderCreatedEvent {
            customer,
            total_price: total_price.map(String::from),
            order_number: 100,
            id: OrderId::Number(5150),
        }
    }

    fn customer(email: Option<&str>) -> OrderCustomer {
        OrderCustomer {
            email: email.map(String::from),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
        }
    }

    #[test]
    fn test_points_round_down() {
        assert_eq!(points_for_amount(dec!(23.99)), 23);
        assert_eq!(points_for_amount(dec!(23.00)), 23);
        assert_eq!(points_for_amount(dec!(0.50)), 0);
        assert_eq!(points_for_amount(dec!(0)), 0);
    }

    #[test]
    fn test_parse_order_amount() {
        assert_eq!(parse_order_amount(Some("23.99")), dec!(23.99));
        assert_eq!(parse_order_amount(Some(" 12.40 ")), dec!(12.40));
        assert_eq!(parse_order_amount(Some("not-a-number")), Decimal::ZERO);
        assert_eq!(parse_order_amount(None), Decimal::ZERO);
    }

    #[test]
    fn test_accrual_for_paid_order() {
        let event = order(Some(customer(Some("a@x.com"))), Some("23.99"));
        let accrual = accrual_for_order(&event).unwrap();

        assert_eq!(accrual.email, "a@x.com");
        assert_eq!(accrual.points, 23);
        assert_eq!(accrual.order_amount, dec!(23.99));
        assert_eq!(accrual.order_id, "5150");
        assert_eq!(accrual.description, "Order #100 - 23.99 spent");
    }

    #[test]
    fn test_description_pads_to_two_decimals() {
        let event = order(Some(customer(Some("a@x.com"))), Some("12.4"));
        let accrual = accrual_for_order(&event).unwrap();
        assert_eq!(accrual.description, "Order #100 - 12.40 spent");
    }

    #[test]
    fn test_sub_unit_order_earns_nothing() {
        let event = order(Some(customer(Some("a@x.com"))), Some("0.50"));
        assert!(accrual_for_order(&event).is_none());
    }

    #[test]
    fn test_missing_customer_earns_nothing() {
        let event = order(None, Some("23.99"));
        assert!(accrual_for_order(&event).is_none());
    }

    #[test]
    fn test_missing_or_blank_email_earns_nothing() {
        let event = order(Some(customer(None)), Some("23.99"));
        assert!(accrual_for_order(&event).is_none());

        let event = order(Some(customer(Some("   "))), Some("23.99"));
        assert!(accrual_for_order(&event).is_none());
    }

    #[test]
    fn test_unparsable_total_earns_nothing() {
        let event = order(Some(customer(Some("a@x.com"))), Some("free"));
        assert!(accrual_for_order(&event).is_none());
    }
}
