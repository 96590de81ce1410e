//! User Record Entity
//!
//! Read-only view of a stored user, as far as signing in is concerned.
//! Rows are owned by the rest of the application; this crate never writes them.

use std::fmt;

use crate::domain::value_object::email::Email;

/// Stored user record
#[derive(Clone)]
pub struct UserRecord {
    /// Numeric user identifier
    pub id: i64,
    /// Public username (booking page handle), not always set
    pub username: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Login identifier (stored lowercased)
    pub email: Email,
    /// PHC-format password hash; `None` for accounts created via OAuth/SAML
    pub password_hash: Option<String>,
    pub two_factor_enabled: bool,
    /// `<iv hex>:<ciphertext hex>` of the base32 TOTP secret
    pub two_factor_secret: Option<String>,
}

impl UserRecord {
    /// Record with a password and 2FA disabled
    pub fn new(id: i64, email: Email, password_hash: Option<String>) -> Self {
        Self {
            id,
            username: None,
            name: None,
            email,
            password_hash,
            two_factor_enabled: false,
            two_factor_secret: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Enable 2FA with an encrypted secret (or none, for broken rows)
    pub fn with_two_factor(mut self, encrypted_secret: Option<String>) -> Self {
        self.two_factor_enabled = true;
        self.two_factor_secret = encrypted_secret;
        self
    }
}

impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &self.password_hash.as_ref().map(|_| "[REDACTED]"))
            .field("two_factor_enabled", &self.two_factor_enabled)
            .field(
                "two_factor_secret",
                &self.two_factor_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}
