//! FoodExpress Core - Shared types library.
//!
//! This crate provides common types used across all FoodExpress components:
//! - `storefront` - The ordering site and admin dashboard
//! - `cli` - Command-line tools for order inspection and export
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money amounts, and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
