//! CSV export of order records.
//!
//! Pure formatting: no store interaction. One row per order, with the items
//! flattened into a single semicolon-joined cell.

use crate::models::order::Order;

/// CSV header row.
const HEADER: &str = "Order ID,Customer Name,Email,Address,Items,Subtotal,Tax,Total,Date";

/// Format a sequence of orders as CSV text.
///
/// Free-text fields are quoted with embedded quotes doubled; the monetary
/// totals are already plain two-decimal strings and stay unquoted.
#[must_use]
pub fn export_csv(orders: &[Order]) -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');

    for order in orders {
        let items = order
            .items
            .iter()
            .map(|item| format!("{}x {} (${})", item.quantity, item.name, item.price))
            .collect::<Vec<_>>()
            .join("; ");

        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{}\n",
            quote(&order.id.to_string()),
            quote(&order.customer_name),
            quote(order.email.as_str()),
            quote(&order.address),
            quote(&items),
            order.subtotal,
            order.tax,
            order.total,
            quote(&order.date.to_rfc3339()),
        ));
    }

    csv
}

/// Quote a CSV field, doubling embedded quotes.
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
