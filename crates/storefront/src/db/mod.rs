//! Database operations for the embedded SQLite order store.
//!
//! # Database: `foodexpress.db`
//!
//! A single `orders` table holds every completed checkout. The store is
//! append-only from the application's perspective: there are no update or
//! delete operations.
//!
//! ## Schema
//!
//! - `orders` - one row per completed checkout, items as a JSON column
//! - indexes on `customer_name`, `email` and `date` (all non-unique)
//!
//! If the database cannot be opened (missing directory permissions, a locked
//! or corrupt file), the storefront degrades to a session-only order list and
//! keeps running; see [`orders::OrdersRepo`].

pub mod orders;

use thiserror::Error;

/// Errors surfaced by the order store.
#[derive(Debug, Error)]
pub enum OrderStoreError {
    /// The store could not be opened. Callers degrade to a session-only
    /// order list rather than failing.
    #[error("order store unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// An operation was attempted before `open` completed (or after the
    /// store was shut down). Treated as an empty result set upstream.
    #[error("order store not initialized")]
    NotInitialized,

    /// An insert was rejected by the engine. Never retried automatically;
    /// the caller leaves the cart untouched and asks the user to resubmit.
    #[error("failed to write order: {0}")]
    Write(#[source] sqlx::Error),

    /// A read query failed.
    #[error("order store query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// A stored row could not be decoded back into an order.
    #[error("corrupt order record: {0}")]
    Corrupt(String),
}
