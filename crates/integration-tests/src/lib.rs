//! Integration tests for FoodExpress.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront with a throwaway data directory
//! FOODEXPRESS_DATA_DIR=$(mktemp -d) cargo run -p food-express-storefront
//!
//! # Run integration tests against it
//! cargo test -p food-express-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `storefront_cart` - Menu, cart and checkout flow tests
//! - `admin_orders` - Admin login, dashboard, search and export tests
//!
//! All tests are `#[ignore]`d by default because they require a running
//! storefront; the base URL is read from `STOREFRONT_BASE_URL`
//! (default `http://localhost:3000`).

/// Base URL of the storefront under test (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned())
}

/// Create an HTTP client with a cookie store, so the admin session survives
/// across requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
