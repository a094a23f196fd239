//! Order records.
//!
//! An order is an immutable snapshot of a completed checkout: the cart lines
//! at the time of purchase (decoupled from the live catalog), the customer's
//! contact details, and the monetary totals fixed to two decimal places.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use food_express_core::{Email, MenuItemId, Money, OrderId};

use super::cart::{CartLine, Totals};

/// One purchased line inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub quantity: u32,
}

impl From<&CartLine> for OrderItem {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            name: line.name.clone(),
            price: line.price,
            quantity: line.quantity,
        }
    }
}

impl OrderItem {
    /// Price times quantity for this item.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An order as submitted to the store, before an id has been assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub customer_name: String,
    pub email: Email,
    pub address: String,
    pub items: Vec<OrderItem>,
    /// Fixed to two decimal places, e.g. `"40.00"`.
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    /// Creation timestamp (serialized as ISO-8601).
    pub date: DateTime<Utc>,
}

impl NewOrder {
    /// Build an order snapshot from the cart lines, derived totals and
    /// contact details, stamped with the current time.
    #[must_use]
    pub fn from_cart(
        lines: &[CartLine],
        totals: Totals,
        customer_name: String,
        email: Email,
        address: String,
    ) -> Self {
        Self {
            customer_name,
            email,
            address,
            items: lines.iter().map(OrderItem::from).collect(),
            subtotal: totals.subtotal.fixed2(),
            tax: totals.tax.fixed2(),
            total: totals.total.fixed2(),
            date: Utc::now(),
        }
    }

    /// Attach the store-assigned id, completing the order.
    #[must_use]
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            customer_name: self.customer_name,
            email: self.email,
            address: self.address,
            items: self.items,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            date: self.date,
        }
    }
}

/// A persisted order. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Store-assigned unique identifier.
    pub id: OrderId,
    pub customer_name: String,
    pub email: Email,
    pub address: String,
    pub items: Vec<OrderItem>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub date: DateTime<Utc>,
}
