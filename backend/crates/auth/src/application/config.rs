//! Application Configuration
//!
//! Explicit, validated configuration for sign-in and sessions. Built once
//! at startup and threaded into the services that need it.

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// NextAuth default session max age (30 days)
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 3600);

/// Upper bound for a configured session max age (10 years)
pub const MAX_SESSION_MAX_AGE: Duration = Duration::from_secs(10 * 365 * 24 * 3600);

/// Length the symmetric encryption key must have
pub const ENCRYPTION_KEY_LENGTH: usize = platform::crypto::KEY_LENGTH;

pub const ENV_BASE_URL: &str = "NEXTAUTH_URL";
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";
pub const ENV_ENCRYPTION_KEY: &str = "CALENDSO_ENCRYPTION_KEY";
pub const ENV_COOKIE_DOMAIN: &str = "NEXTAUTH_COOKIE_DOMAIN";

/// Configuration errors (startup only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("JWT secret must not be empty")]
    EmptyJwtSecret,

    #[error("Session max age must be between 1 second and {max} seconds, got {actual}")]
    InvalidSessionMaxAge { actual: u64, max: u64 },
}

/// Front-end pages the auth flow redirects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthPages {
    pub sign_in: String,
    pub sign_out: String,
    pub error: String,
}

impl Default for AuthPages {
    fn default() -> Self {
        Self {
            sign_in: "/auth/login".to_string(),
            sign_out: "/auth/logout".to_string(),
            error: "/auth/error".to_string(),
        }
    }
}

impl AuthPages {
    /// Error page URL carrying a rejection code
    pub fn error_url(&self, code: &str) -> String {
        format!("{}?error={}", self.error, code)
    }
}

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Public base URL of the app (decides secure cookies and cookie domain)
    base_url: Url,
    /// HS256 signing secret for session tokens
    jwt_secret: String,
    /// Key for 2FA secrets at rest; only 2FA sign-ins fail without it
    encryption_key: Option<String>,
    /// Overrides the cookie domain derived from `base_url`
    cookie_domain: Option<String>,
    /// Within `1s..=MAX_SESSION_MAX_AGE`
    session_max_age: Duration,
    pub pages: AuthPages,
    /// Credentials provider display name
    pub provider_name: String,
}

impl AuthConfig {
    pub fn new(base_url: &str, jwt_secret: impl Into<String>) -> Result<Self, ConfigError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl(e.to_string()))?;
        if base_url.host_str().is_none() {
            return Err(ConfigError::InvalidBaseUrl(format!(
                "{base_url} has no host"
            )));
        }

        let jwt_secret = jwt_secret.into();
        if jwt_secret.is_empty() {
            return Err(ConfigError::EmptyJwtSecret);
        }

        Ok(Self {
            base_url,
            jwt_secret,
            encryption_key: None,
            cookie_domain: None,
            session_max_age: DEFAULT_SESSION_MAX_AGE,
            pages: AuthPages::default(),
            provider_name: "Cal.com".to_string(),
        })
    }

    pub fn with_encryption_key(mut self, key: impl Into<String>) -> Self {
        self.encryption_key = Some(key.into());
        self
    }

    pub fn with_cookie_domain(mut self, domain: impl Into<String>) -> Self {
        self.cookie_domain = Some(domain.into());
        self
    }

    pub fn with_session_max_age(mut self, max_age: Duration) -> Result<Self, ConfigError> {
        if max_age.as_secs() == 0 || max_age > MAX_SESSION_MAX_AGE {
            return Err(ConfigError::InvalidSessionMaxAge {
                actual: max_age.as_secs(),
                max: MAX_SESSION_MAX_AGE.as_secs(),
            });
        }
        self.session_max_age = max_age;
        Ok(self)
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let base_url = get(ENV_BASE_URL).ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let jwt_secret = get(ENV_JWT_SECRET).ok_or(ConfigError::Missing(ENV_JWT_SECRET))?;
        let mut config = Self::new(&base_url, jwt_secret)?;

        match get(ENV_ENCRYPTION_KEY) {
            Some(key) => {
                if key.chars().count() != ENCRYPTION_KEY_LENGTH {
                    tracing::warn!(
                        expected = ENCRYPTION_KEY_LENGTH,
                        actual = key.chars().count(),
                        "Encryption key has unexpected length, 2FA sign-ins will fail"
                    );
                }
                config.encryption_key = Some(key);
            }
            None => {
                tracing::warn!("{ENV_ENCRYPTION_KEY} is not set, 2FA sign-ins will fail");
            }
        }

        config.cookie_domain = get(ENV_COOKIE_DOMAIN);
        Ok(config)
    }

    /// Local development over plain HTTP, with fixed throwaway secrets
    pub fn development() -> Result<Self, ConfigError> {
        Ok(Self::new("http://localhost:3000", "development-only-jwt-secret")?
            .with_encryption_key("development-only-encryption-key!"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.encryption_key.as_deref()
    }

    pub fn session_max_age(&self) -> Duration {
        self.session_max_age
    }

    /// Session max age in whole seconds, for cookies and token expiry
    pub fn session_max_age_secs(&self) -> i64 {
        i64::try_from(self.session_max_age.as_secs()).unwrap_or(i64::MAX)
    }

    /// Secure cookies iff the app is served over https
    pub fn use_secure_cookies(&self) -> bool {
        self.base_url.scheme() == "https"
    }

    pub fn host_name(&self) -> Option<&str> {
        self.base_url.host_str()
    }

    /// Explicit override, else the base URL host
    pub fn cookie_domain(&self) -> Option<&str> {
        self.cookie_domain.as_deref().or_else(|| self.host_name())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("base_url", &self.base_url.as_str())
            .field("jwt_secret", &"[REDACTED]")
            .field("encryption_key", &self.encryption_key.as_ref().map(|_| "[REDACTED]"))
            .field("cookie_domain", &self.cookie_domain)
            .field("session_max_age", &self.session_max_age)
            .field("pages", &self.pages)
            .field("provider_name", &self.provider_name)
            .finish()
    }
}
