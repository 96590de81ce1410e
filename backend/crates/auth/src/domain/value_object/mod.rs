//! Value Object Module

pub mod email;
pub mod totp_secret;

pub use email::Email;
pub use totp_secret::{TOTP_SECRET_LENGTH, TotpSecret, TotpSecretError};
