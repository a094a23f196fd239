//! Checkout: convert the live cart plus contact details into a persisted
//! order.
//!
//! Validation happens before anything is written. On a store failure the
//! cart is left exactly as it was so the user can retry; the caller only
//! clears the cart after this service returns `Ok`.

use thiserror::Error;

use food_express_core::{Email, EmailError};

use crate::db::OrderStoreError;
use crate::db::orders::OrdersRepo;
use crate::models::cart::Cart;
use crate::models::order::{NewOrder, Order};

/// Contact fields as submitted by the checkout form, untrimmed.
#[derive(Debug, Clone)]
pub struct ContactDetails {
    pub name: String,
    pub address: String,
    pub email: String,
}

/// A checkout form rejection. Blocks submission; no state changes.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("please enter your full name")]
    MissingName,
    #[error("please enter a delivery address")]
    MissingAddress,
    #[error("please enter a valid email address")]
    InvalidEmail(#[source] EmailError),
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The contact fields failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Checkout was attempted with an empty cart.
    #[error("your cart is empty")]
    EmptyCart,

    /// The order store rejected the write. The cart is left intact and the
    /// user is asked to resubmit.
    #[error(transparent)]
    Store(#[from] OrderStoreError),
}

/// Validated contact details.
struct ValidContact {
    name: String,
    address: String,
    email: Email,
}

/// Trim and validate the submitted contact fields.
fn validate(contact: &ContactDetails) -> Result<ValidContact, ValidationError> {
    let name = contact.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let address = contact.address.trim();
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }

    let email = Email::parse(contact.email.trim()).map_err(ValidationError::InvalidEmail)?;

    Ok(ValidContact {
        name: name.to_owned(),
        address: address.to_owned(),
        email,
    })
}

/// Place an order from the current cart and contact details.
///
/// Builds the order snapshot (current lines, derived totals, timestamp),
/// submits it to the order repository and returns the completed order with
/// its store-assigned id.
///
/// # Errors
///
/// - `CheckoutError::Validation` if a contact field is missing or invalid
/// - `CheckoutError::EmptyCart` if the cart has no lines
/// - `CheckoutError::Store` if the repository rejects the insert
pub async fn place_order(
    orders: &OrdersRepo,
    cart: &Cart,
    contact: &ContactDetails,
) -> Result<Order, CheckoutError> {
    let contact = validate(contact)?;

    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let new_order = NewOrder::from_cart(
        cart.lines(),
        cart.totals(),
        contact.name,
        contact.email,
        contact.address,
    );

    let id = orders.add(&new_order).await?;
    Ok(new_order.into_order(id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MenuItem};
    use crate::db::orders::{OrderStore, SessionOrders};
    use food_express_core::{MenuItemId, Money, OrderId};

    fn catalog() -> Catalog {
        Catalog::from_items(vec![MenuItem {
            id: MenuItemId::new(1),
            name: "Cake Pop".to_owned(),
            description: String::new(),
            price: Money::from_units(20),
            category: "Dessert".to_owned(),
            image: "/static/img/cake-pop.jpg".to_owned(),
        }])
        .unwrap()
    }

    fn full_cart() -> Cart {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(1));
        cart
    }

    fn contact(name: &str, address: &str, email: &str) -> ContactDetails {
        ContactDetails {
            name: name.to_owned(),
            address: address.to_owned(),
            email: email.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_place_order_happy_path() {
        let orders = OrdersRepo::Session(SessionOrders::new());
        let cart = full_cart();

        let order = place_order(
            &orders,
            &cart,
            &contact("Ada Lovelace", "1 Analytical Way", "ada@example.com"),
        )
        .await
        .unwrap();

        assert_eq!(order.id, OrderId::new(1));
        assert_eq!(order.customer_name, "Ada Lovelace");
        assert_eq!(order.subtotal, "40.00");
        assert_eq!(order.tax, "3.20");
        assert_eq!(order.total, "43.20");
        assert_eq!(orders.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_contact_fields_are_trimmed() {
        let orders = OrdersRepo::Session(SessionOrders::new());
        let cart = full_cart();

        let order = place_order(
            &orders,
            &cart,
            &contact("  Ada Lovelace  ", " 1 Analytical Way ", " ada@example.com "),
        )
        .await
        .unwrap();

        assert_eq!(order.customer_name, "Ada Lovelace");
        assert_eq!(order.address, "1 Analytical Way");
        assert_eq!(order.email.as_str(), "ada@example.com");
    }

    #[tokio::test]
    async fn test_empty_address_rejected_and_no_order_created() {
        let orders = OrdersRepo::Session(SessionOrders::new());
        let cart = full_cart();

        let result = place_order(
            &orders,
            &cart,
            &contact("Ada Lovelace", "   ", "ada@example.com"),
        )
        .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(ValidationError::MissingAddress))
        ));
        assert!(orders.get_all().await.unwrap().is_empty());
        // Cart untouched
        assert_eq!(cart.lines().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_email_rejected() {
        let orders = OrdersRepo::Session(SessionOrders::new());
        let cart = full_cart();

        let result = place_order(
            &orders,
            &cart,
            &contact("Ada Lovelace", "1 Analytical Way", "not-an-email"),
        )
        .await;

        assert!(matches!(
            result,
            Err(CheckoutError::Validation(ValidationError::InvalidEmail(_)))
        ));
        assert!(orders.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_rejected() {
        let orders = OrdersRepo::Session(SessionOrders::new());
        let cart = Cart::new();

        let result = place_order(
            &orders,
            &cart,
            &contact("Ada Lovelace", "1 Analytical Way", "ada@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_store_write_failure_leaves_cart_intact() {
        // A closed store rejects every write, simulating engine rejection.
        let path =
            std::env::temp_dir().join(format!("foodexpress-test-{}.db", uuid::Uuid::new_v4()));
        let store = OrderStore::open(&path).await.unwrap();
        store.close().await;
        let orders = OrdersRepo::Store(store);

        let cart = full_cart();
        let result = place_order(
            &orders,
            &cart,
            &contact("Ada Lovelace", "1 Analytical Way", "ada@example.com"),
        )
        .await;

        assert!(matches!(result, Err(CheckoutError::Store(_))));
        // The cart keeps its pre-checkout lines; no order was returned.
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 2);

        let _ = std::fs::remove_file(&path);
    }
}
