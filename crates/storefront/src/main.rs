//! FoodExpress Storefront - menu, cart, checkout and admin dashboard.
//!
//! This binary serves the whole storefront on port 3000.
//!
//! # Architecture
//!
//! - Axum web framework with Askama templates for server-side rendering
//! - A static catalog loaded once at startup (built-in or from a JSON file)
//! - An in-memory cart, mirrored to a JSON backup file on every mutation
//! - An embedded SQLite order store; if it cannot be opened the storefront
//!   degrades to a session-only order list and keeps running
//! - In-memory sessions gating the `/admin` section

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use food_express_storefront::catalog::Catalog;
use food_express_storefront::config::StorefrontConfig;
use food_express_storefront::db::orders::OrdersRepo;
use food_express_storefront::middleware::create_session_layer;
use food_express_storefront::models::backup::CartBackup;
use food_express_storefront::routes;
use food_express_storefront::state::AppState;

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "food_express_storefront=info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // The data directory holds both the order database and the cart backup
    std::fs::create_dir_all(&config.data_dir).expect("Failed to create data directory");

    // Load the catalog (static for the lifetime of the process)
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path).expect("Failed to load catalog file"),
        None => Catalog::builtin().expect("Failed to load built-in catalog"),
    };
    tracing::info!("catalog loaded with {} items", catalog.items().len());

    // Open the order store, degrading to a session-only list on failure
    let orders = OrdersRepo::open(&config.orders_db_path()).await;

    // Restore the cart from its backup file (fails open to an empty cart)
    let backup = CartBackup::new(config.cart_backup_path());
    let cart = backup.load().await;
    if !cart.is_empty() {
        tracing::info!("restored cart with {} items from backup", cart.item_count());
    }

    // Build application state
    let addr = config.socket_addr();
    let state = AppState::new(config, catalog, orders, cart, backup);

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(create_session_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
