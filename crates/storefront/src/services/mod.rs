//! Application services: checkout, admin authentication, CSV export.

pub mod auth;
pub mod checkout;
pub mod export;
