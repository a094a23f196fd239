//! Checkout route handlers.
//!
//! The cart is only cleared after the order store accepts the write; any
//! rejection re-renders the form with the cart intact so the customer can
//! resubmit.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::models::order::Order;
use crate::routes::cart::{CartView, mirror_to_backup};
use crate::services::checkout::{CheckoutError, ContactDetails, place_order};
use crate::state::AppState;

/// Order item display data for receipt templates.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_total: String,
}

/// Order display data for receipt templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub customer_name: String,
    pub email: String,
    pub address: String,
    pub items: Vec<OrderItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub date: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            customer_name: order.customer_name.clone(),
            email: order.email.to_string(),
            address: order.address.clone(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price.fixed2(),
                    line_total: item.line_total().fixed2(),
                })
                .collect(),
            subtotal: order.subtotal.clone(),
            tax: order.tax.clone(),
            total: order.total.clone(),
            date: order.date.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Checkout form data.
#[derive(Deserialize)]
pub struct CheckoutForm {
    pub fullname: String,
    pub address: String,
    pub email: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub error: String,
    pub cart_count: u32,
}

/// Receipt page template, shown after a successful checkout and from the
/// admin dashboard's receipt view.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/receipt.html")]
pub struct ReceiptTemplate {
    pub order: OrderView,
    pub cart_count: u32,
}

/// Display the checkout form with the current cart summary.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CheckoutTemplate {
    let cart = state.cart().lock().await;

    CheckoutTemplate {
        cart: CartView::from_cart(&cart),
        error: String::new(),
        cart_count: cart.item_count(),
    }
}

/// Place the order.
///
/// On success the cart is cleared, the backup mirrors the empty cart, and
/// the receipt is rendered. On any failure the cart is left untouched.
#[instrument(skip(state, form))]
pub async fn place(State(state): State<AppState>, Form(form): Form<CheckoutForm>) -> Response {
    let contact = ContactDetails {
        name: form.fullname,
        address: form.address,
        email: form.email,
    };

    let mut cart = state.cart().lock().await;

    match place_order(state.orders(), &cart, &contact).await {
        Ok(order) => {
            cart.clear();
            mirror_to_backup(&state, &cart).await;

            ReceiptTemplate {
                order: OrderView::from(&order),
                cart_count: cart.item_count(),
            }
            .into_response()
        }
        Err(e @ (CheckoutError::Validation(_) | CheckoutError::EmptyCart)) => CheckoutTemplate {
            cart: CartView::from_cart(&cart),
            error: e.to_string(),
            cart_count: cart.item_count(),
        }
        .into_response(),
        Err(CheckoutError::Store(e)) => {
            tracing::error!("failed to save order: {e}");
            CheckoutTemplate {
                cart: CartView::from_cart(&cart),
                error: "There was an error processing your order. Please try again.".to_owned(),
                cart_count: cart.item_count(),
            }
            .into_response()
        }
    }
}
