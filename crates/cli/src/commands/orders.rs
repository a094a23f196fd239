//! Order inspection and export commands.
//!
//! Both commands open the same order database the storefront uses, resolved
//! through the same `FOODEXPRESS_*` environment variables.

// Command output belongs on stdout
#![allow(clippy::print_stdout)]

use std::path::Path;

use food_express_storefront::config::StorefrontConfig;
use food_express_storefront::db::orders::OrderStore;
use food_express_storefront::services::export::export_csv;

/// List stored orders, optionally filtered by a search query.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the store cannot be
/// opened or read.
pub async fn list(search: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;

    let orders = match search {
        Some(query) => store.search(query).await?,
        None => store.get_all().await?,
    };

    if orders.is_empty() {
        println!("No orders found");
        return Ok(());
    }

    for order in &orders {
        let items = order
            .items
            .iter()
            .map(|item| format!("{}x {}", item.quantity, item.name))
            .collect::<Vec<_>>()
            .join(", ");

        println!(
            "#{} | {} | {} | {} | ${} | {}",
            order.id,
            order.customer_name,
            order.email,
            items,
            order.total,
            order.date.to_rfc3339(),
        );
    }
    println!("{} order(s)", orders.len());

    Ok(())
}

/// Export all stored orders as CSV, to stdout or a file.
///
/// # Errors
///
/// Returns an error if the store cannot be read or the output file cannot be
/// written.
pub async fn export(output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store().await?;
    let orders = store.get_all().await?;
    let csv = export_csv(&orders);

    match output {
        Some(path) => {
            tokio::fs::write(path, &csv).await?;
            tracing::info!(orders = orders.len(), path = %path.display(), "CSV written");
        }
        None => print!("{csv}"),
    }

    Ok(())
}

/// Open the order store from the environment configuration.
async fn open_store() -> Result<OrderStore, Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;
    let store = OrderStore::open(&config.orders_db_path()).await?;
    Ok(store)
}
