//! Inbound order event payload types.
//!
//! These mirror the `orders/create` webhook payload as delivered by the
//! commerce platform. Only the fields the ledger cares about are modelled;
//! everything else in the payload is ignored by serde.

use serde::Deserialize;
use std::fmt;

/// An `orders/create` webhook payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCreatedEvent {
    /// The purchasing customer, absent for guest checkouts without a
    /// customer record.
    #[serde(default)]
    pub customer: Option<OrderCustomer>,
    /// Order total as a decimal string, e.g. `"23.99"`.
    #[serde(default)]
    pub total_price: Option<String>,
    /// Human-facing order number, e.g. `1001`.
    pub order_number: i64,
    /// Platform order identifier; delivered as a number or a string
    /// depending on the payload version.
    pub id: OrderId,
}

/// Customer fields carried on an order event.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderCustomer {
    /// Customer email; may be absent or empty.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional first name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Optional last name.
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Order identifier, numeric or string on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderId {
    /// Numeric identifier.
    Number(i64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_payload() {
        let json = r#"{
            "customer": { "email": "a@x.com", "first_name": "Ada", "last_name": "Lovelace" },
            "total_price": "23.99",
            "order_number": 1001,
            "id": 5150
        }"#;

        let event: OrderCreatedEvent = serde_json::from_str(json).unwrap();
        let customer = event.customer.unwrap();
        assert_eq!(customer.email.as_deref(), Some("a@x.com"));
        assert_eq!(customer.first_name.as_deref(), Some("Ada"));
        assert_eq!(event.total_price.as_deref(), Some("23.99"));
        assert_eq!(event.order_number, 1001);
        assert_eq!(event.id, OrderId::Number(5150));
    }

    #[test]
    fn test_deserialize_null_customer_and_string_id() {
        let json = r#"{
            "customer": null,
            "total_price": "10.00",
            "order_number": 7,
            "id": "gid://shopify/Order/5150"
        }"#;

        let event: OrderCreatedEvent = serde_json::from_str(json).unwrap();
        assert!(event.customer.is_none());
        assert_eq!(event.id.to_string(), "gid://shopify/Order/5150");
    }

    #[test]
    fn test_missing_total_price_defaults_to_none() {
        let json = r#"{ "order_number": 1, "id": 2 }"#;
        let event: OrderCreatedEvent = serde_json::from_str(json).unwrap();
        assert!(event.total_price.is_none());
    }
}
