//! Catalog inspection command.

// Command output belongs on stdout
#![allow(clippy::print_stdout)]

use food_express_storefront::catalog::Catalog;
use food_express_storefront::config::StorefrontConfig;

/// Show the active menu catalog (built-in or the configured file).
///
/// # Errors
///
/// Returns an error if the configuration or catalog file is invalid.
pub fn show() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };

    for item in catalog.items() {
        println!(
            "{:>3}  {:<24} {:>8}  {}",
            item.id,
            item.name,
            format!("${}", item.price),
            item.category,
        );
    }
    println!("{} item(s)", catalog.items().len());

    Ok(())
}
