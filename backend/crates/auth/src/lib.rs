//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User record, session claim, sign-in outcome, collaborator traits
//! - `application/` - Credential authenticator, sessions, CSRF, cookie policy, config
//! - `infra/` - User lookup adapters (PostgreSQL, in-memory)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Sign-in
//! Email + password, plus a TOTP code for accounts with two-factor
//! authentication. The decision is a plain value (`Outcome`); only
//! storage failures are errors.
//!
//! ## Security Model
//! - Passwords verified against Argon2id PHC hashes
//! - TOTP secrets stored AES-256-CBC encrypted, decrypted per attempt
//! - Stateless HS256 JWT sessions in an HttpOnly cookie
//! - Double-submit CSRF token on state-changing endpoints

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, CredentialAuthenticator, LoginAttempt};
pub use domain::{Outcome, Reason, SessionClaim};
pub use error::{AuthError, AuthResult};
pub use infra::{InMemoryUserRepository, PgUserRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
