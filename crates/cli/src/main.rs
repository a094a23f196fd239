//! FoodExpress CLI - Order inspection and export tools.
//!
//! # Usage
//!
//! ```bash
//! # List all stored orders
//! fx-cli orders list
//!
//! # Search orders by customer name or email
//! fx-cli orders list --search ada
//!
//! # Export orders as CSV (stdout by default)
//! fx-cli orders export --output orders.csv
//!
//! # Show the active menu catalog
//! fx-cli catalog show
//! ```
//!
//! # Commands
//!
//! - `orders list` - List stored orders, optionally filtered
//! - `orders export` - Export orders as CSV
//! - `catalog show` - Show the active menu catalog

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "fx-cli")]
#[command(author, version, about = "FoodExpress CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and export stored orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
    /// Inspect the menu catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List stored orders
    List {
        /// Case-insensitive substring match on customer name or email
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Export orders as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Show the active menu catalog
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Orders { action } => match action {
            OrdersAction::List { search } => commands::orders::list(search.as_deref()).await?,
            OrdersAction::Export { output } => commands::orders::export(output.as_deref()).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Show => commands::catalog::show()?,
        },
    }
    Ok(())
}
