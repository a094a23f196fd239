//! Admin authentication service.
//!
//! Checks submitted credentials against the single fixed pair from the
//! configuration and hands back the session identity on success. The
//! credential check is deliberately behind a service type so a real
//! authentication backend can replace it without touching the routes.

use secrecy::ExposeSecret;

use crate::config::AdminCredentials;
use crate::models::session::CurrentAdmin;

/// Errors that can occur during admin authentication.
#[derive(Debug, thiserror::Error)]
pub enum AdminAuthError {
    /// The submitted username/password pair did not match.
    #[error("invalid username or password")]
    InvalidCredentials,
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    credentials: &'a AdminCredentials,
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(credentials: &'a AdminCredentials) -> Self {
        Self { credentials }
    }

    /// Verify a submitted username/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` unless both fields match
    /// the configured pair exactly.
    pub fn verify(&self, username: &str, password: &str) -> Result<CurrentAdmin, AdminAuthError> {
        if username == self.credentials.username
            && password == self.credentials.password.expose_secret()
        {
            Ok(CurrentAdmin {
                username: username.to_owned(),
            })
        } else {
            Err(AdminAuthError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn credentials() -> AdminCredentials {
        AdminCredentials {
            username: "admin@crumbco".to_owned(),
            password: SecretString::from("admin@crumbco1234"),
        }
    }

    #[test]
    fn test_verify_accepts_exact_match() {
        let credentials = credentials();
        let service = AdminAuthService::new(&credentials);

        let admin = service.verify("admin@crumbco", "admin@crumbco1234").unwrap();
        assert_eq!(admin.username, "admin@crumbco");
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let credentials = credentials();
        let service = AdminAuthService::new(&credentials);

        assert!(matches!(
            service.verify("admin@crumbco", "wrong"),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_rejects_wrong_username() {
        let credentials = credentials();
        let service = AdminAuthService::new(&credentials);

        assert!(matches!(
            service.verify("someone@else", "admin@crumbco1234"),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }
}
