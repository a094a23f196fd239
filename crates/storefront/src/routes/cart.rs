//! Cart route handlers.
//!
//! Every mutation mirrors the full cart to the backup file before
//! redirecting, so a restart at any point restores the latest state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use food_express_core::MenuItemId;

use crate::filters;
use crate::models::cart::Cart;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub line_total: String,
    pub image: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

impl CartView {
    /// Build the display data from the live cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let totals = cart.totals();
        Self {
            lines: cart
                .lines()
                .iter()
                .map(|line| CartLineView {
                    id: line.id.as_i64(),
                    name: line.name.clone(),
                    price: line.price.fixed2(),
                    line_total: line.line_total().fixed2(),
                    image: line.image.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            subtotal: totals.subtotal.fixed2(),
            tax: totals.tax.fixed2(),
            total: totals.total.fixed2(),
        }
    }
}

/// Mirror the cart to the backup file.
///
/// A failed write is logged and otherwise ignored; the in-memory cart stays
/// authoritative for this session.
pub(crate) async fn mirror_to_backup(state: &AppState, cart: &Cart) {
    if let Err(e) = state.backup().save(cart).await {
        tracing::error!("failed to mirror cart to backup: {e}");
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub item_id: i64,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub item_id: i64,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub item_id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub cart_count: u32,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> CartShowTemplate {
    let cart = state.cart().lock().await;

    CartShowTemplate {
        cart: CartView::from_cart(&cart),
        cart_count: cart.item_count(),
    }
}

/// Add one unit of an item to the cart.
///
/// Unknown item ids are silently ignored, matching the catalog lookup
/// contract. Redirects back to the menu so the customer keeps browsing.
#[instrument(skip(state))]
pub async fn add(State(state): State<AppState>, Form(form): Form<AddToCartForm>) -> Redirect {
    let mut cart = state.cart().lock().await;
    cart.add(state.catalog(), MenuItemId::new(form.item_id));
    mirror_to_backup(&state, &cart).await;

    Redirect::to("/")
}

/// Set a line's quantity exactly; zero removes the line.
#[instrument(skip(state))]
pub async fn update(State(state): State<AppState>, Form(form): Form<UpdateCartForm>) -> Redirect {
    let mut cart = state.cart().lock().await;
    cart.set_quantity(MenuItemId::new(form.item_id), form.quantity);
    mirror_to_backup(&state, &cart).await;

    Redirect::to("/cart")
}

/// Remove a line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Redirect {
    let mut cart = state.cart().lock().await;
    cart.remove(MenuItemId::new(form.item_id));
    mirror_to_backup(&state, &cart).await;

    Redirect::to("/cart")
}
