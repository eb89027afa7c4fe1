//! Order entities.
//!
//! Orders are created at checkout and immutable afterwards, except for the
//! status field which the admin back-office may move freely between values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::OrderId;
use crate::types::price::Price;
use crate::types::product::Product;
use crate::types::status::OrderStatus;

/// Checkout details captured from the customer.
///
/// All four fields are validated non-empty client-side before an order
/// payload is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub name: String,
    /// Delivery address.
    pub location: String,
    pub phone_number: String,
    pub payment_method: String,
}

impl CustomerDetails {
    /// Whether every required checkout field has been filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.location.trim().is_empty()
            && !self.phone_number.trim().is_empty()
            && !self.payment_method.trim().is_empty()
    }
}

/// A line item inside a placed order.
///
/// The embedded product may be gone if an admin has since deleted it; the
/// price snapshot and quantity survive regardless.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(default)]
    pub product: Option<Product>,
    pub quantity: u32,
    pub price: Price,
}

impl OrderLine {
    /// Line subtotal, computed client-side as price x quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub total_amount: Price,
    pub items: Vec<OrderLine>,
    pub customer_details: CustomerDetails,
}

impl Order {
    /// Recompute the order total from its lines.
    ///
    /// The cached `total_amount` is never trusted once lines are in hand.
    #[must_use]
    pub fn computed_total(&self) -> Price {
        self.items
            .iter()
            .fold(Price::ZERO, |acc, line| acc.plus(line.subtotal()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_customer_details_completeness() {
        let mut details = CustomerDetails {
            name: "Ada".to_owned(),
            location: "12 Mill Lane".to_owned(),
            phone_number: "0700123456".to_owned(),
            payment_method: "Credit Card".to_owned(),
        };
        assert!(details.is_complete());

        details.phone_number = "   ".to_owned();
        assert!(!details.is_complete());
    }

    #[test]
    fn test_computed_total_ignores_cached_amount() {
        let line = OrderLine {
            product: None,
            quantity: 2,
            price: Price::new(Decimal::from(10)).unwrap(),
        };
        let order = Order {
            id: OrderId::new("o1"),
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            // Stale cached total; lines are the truth
            total_amount: Price::new(Decimal::from(99)).unwrap(),
            items: vec![line],
            customer_details: CustomerDetails::default(),
        };
        assert_eq!(order.computed_total().to_string(), "20.00");
    }
}
