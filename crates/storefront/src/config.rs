//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local store out of
//! `./data`.
//!
//! - `FOODEXPRESS_HOST` - Bind address (default: 127.0.0.1)
//! - `FOODEXPRESS_PORT` - Listen port (default: 3000)
//! - `FOODEXPRESS_DATA_DIR` - Directory for the order database and the cart
//!   backup file (default: `./data`)
//! - `FOODEXPRESS_CATALOG` - Path to a JSON catalog file replacing the
//!   built-in menu
//! - `FOODEXPRESS_ADMIN_USERNAME` / `FOODEXPRESS_ADMIN_PASSWORD` - The fixed
//!   admin credential pair checked at `/admin/login`

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// File name of the order database inside the data directory.
const ORDERS_DB_FILE: &str = "foodexpress.db";

/// File name of the cart backup inside the data directory.
const CART_BACKUP_FILE: &str = "foodexpress_cart.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Directory holding the order database and cart backup
    pub data_dir: PathBuf,
    /// Optional catalog file replacing the built-in menu
    pub catalog_path: Option<PathBuf>,
    /// Admin credential pair for the dashboard session gate
    pub admin: AdminCredentials,
}

/// The fixed admin credential pair.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("FOODEXPRESS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODEXPRESS_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("FOODEXPRESS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("FOODEXPRESS_PORT".to_owned(), e.to_string()))?;
        let data_dir = PathBuf::from(get_env_or_default("FOODEXPRESS_DATA_DIR", "data"));
        let catalog_path = get_optional_env("FOODEXPRESS_CATALOG").map(PathBuf::from);
        let admin = AdminCredentials::from_env();

        Ok(Self {
            host,
            port,
            data_dir,
            catalog_path,
            admin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Path of the SQLite order database.
    #[must_use]
    pub fn orders_db_path(&self) -> PathBuf {
        self.data_dir.join(ORDERS_DB_FILE)
    }

    /// Path of the cart backup file.
    #[must_use]
    pub fn cart_backup_path(&self) -> PathBuf {
        self.data_dir.join(CART_BACKUP_FILE)
    }
}

impl AdminCredentials {
    fn from_env() -> Self {
        Self {
            username: get_env_or_default("FOODEXPRESS_ADMIN_USERNAME", "admin@crumbco"),
            password: SecretString::from(get_env_or_default(
                "FOODEXPRESS_ADMIN_PASSWORD",
                "admin@crumbco1234",
            )),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            catalog_path: None,
            admin: AdminCredentials {
                username: "admin@crumbco".to_owned(),
                password: SecretString::from("admin@crumbco1234"),
            },
        }
    }

    #[test]
    fn test_socket_addr() {
        let addr = config().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_data_paths_live_in_data_dir() {
        let config = config();
        assert_eq!(config.orders_db_path(), PathBuf::from("data/foodexpress.db"));
        assert_eq!(
            config.cart_backup_path(),
            PathBuf::from("data/foodexpress_cart.json")
        );
    }

    #[test]
    fn test_admin_credentials_debug_redacts_password() {
        let config = config();
        let debug_output = format!("{:?}", config.admin);

        assert!(debug_output.contains("admin@crumbco"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains(config.admin.password.expose_secret()));
    }
}
