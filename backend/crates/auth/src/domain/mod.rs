//! Domain Layer
//!
//! Entities, value objects, the sign-in outcome, repository traits and
//! the collaborator traits of the decision procedure.

pub mod entity;
pub mod outcome;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{SessionClaim, UserRecord};
pub use outcome::{Outcome, Reason};
pub use repository::UserRepository;
pub use services::{
    AesCbcCipher, Argon2PasswordVerifier, OneTimeCodeValidator, PasswordVerifier, SecretCipher,
    TotpCodeValidator,
};
