//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Menu page (with search/category/price filters)
//! GET  /health                   - Health check
//!
//! # Cart
//! GET  /cart                     - Cart page
//! POST /cart/add                 - Add one unit of an item
//! POST /cart/update              - Set a line's quantity (0 removes)
//! POST /cart/remove              - Remove a line
//!
//! # Checkout
//! GET  /checkout                 - Checkout form
//! POST /checkout                 - Place the order, show the receipt
//!
//! # Admin
//! GET  /admin                    - Orders dashboard (?q= searches)
//! GET  /admin/login              - Login page
//! POST /admin/login              - Login action
//! POST /admin/logout             - Logout action
//! GET  /admin/orders/export.csv  - CSV download of all orders
//! GET  /admin/orders/{id}/receipt - Receipt for a past order
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod menu;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/orders/export.csv", get(admin::export_csv))
        .route("/orders/{id}/receipt", get(admin::receipt))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Menu page
        .route("/", get(menu::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::place))
        // Admin section
        .nest("/admin", admin_routes())
}
