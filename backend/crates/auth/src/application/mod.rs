//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod cookie_policy;
pub mod csrf;
pub mod session;

// Re-exports
pub use authenticate::{CredentialAuthenticator, LoginAttempt};
pub use config::{AuthConfig, AuthPages, ConfigError};
pub use cookie_policy::CookiePolicy;
pub use csrf::CsrfService;
pub use session::{Session, SessionService, SessionToken, SessionUser};
