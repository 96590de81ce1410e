//! Shared Kernel - Domain-crossing minimal core
//!
//! Only the vocabulary every crate agrees on lives here:
//! - [`error::app_error::AppError`] and the [`error::app_error::AppResult`] alias
//! - [`error::kind::ErrorKind`] with its HTTP status mapping
//! - conversions from `serde_json`, `sqlx` and into `axum` responses

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
