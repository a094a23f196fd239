//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::db::orders::OrdersRepo;
use crate::models::backup::CartBackup;
use crate::models::cart::Cart;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, the order repository, the active cart and its backup file.
///
/// The cart and the order store are independent state machines: cart
/// mutations are serialized by the mutex, store operations by the engine's
/// own transactions, and nothing synchronizes the two.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    orders: OrdersRepo,
    cart: Mutex<Cart>,
    backup: CartBackup,
}

impl AppState {
    /// Assemble the application state from its already-initialized parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        orders: OrdersRepo,
        cart: Cart,
        backup: CartBackup,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                orders,
                cart: Mutex::new(cart),
                backup,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the menu catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order repository.
    #[must_use]
    pub fn orders(&self) -> &OrdersRepo {
        &self.inner.orders
    }

    /// Get a reference to the active cart.
    #[must_use]
    pub fn cart(&self) -> &Mutex<Cart> {
        &self.inner.cart
    }

    /// Get a reference to the cart backup file.
    #[must_use]
    pub fn backup(&self) -> &CartBackup {
        &self.inner.backup
    }
}
