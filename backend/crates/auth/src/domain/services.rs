//! Domain Services
//!
//! Pure collaborators of the sign-in decision. Each one is a trait so the
//! use case can be exercised with fakes; the unit structs are the
//! production implementations.

use platform::crypto::{self, CipherError};
use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::value_object::TotpSecret;

/// Compares a cleartext password with a stored hash
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &ClearTextPassword, stored_hash: &str) -> bool;
}

/// Decrypts secrets stored at rest
pub trait SecretCipher: Send + Sync {
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<Vec<u8>, CipherError>;
}

/// Validates a time-based one-time code
pub trait OneTimeCodeValidator: Send + Sync {
    fn check(&self, code: &str, secret: &TotpSecret) -> bool;
}

/// Argon2id, PHC string format; other schemes (bcrypt) never verify
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordVerifier;

impl PasswordVerifier for Argon2PasswordVerifier {
    fn verify(&self, password: &ClearTextPassword, stored_hash: &str) -> bool {
        match HashedPassword::from_phc_string(stored_hash) {
            Ok(hash) => hash.verify(password),
            Err(e) => {
                tracing::warn!(error = %e, "Stored password hash is not a valid PHC string");
                false
            }
        }
    }
}

/// AES-256-CBC, `<iv hex>:<ciphertext hex>`
#[derive(Debug, Clone, Copy, Default)]
pub struct AesCbcCipher;

impl SecretCipher for AesCbcCipher {
    fn decrypt(&self, ciphertext: &str, key: &str) -> Result<Vec<u8>, CipherError> {
        crypto::symmetric_decrypt(ciphertext, key)
    }
}

/// TOTP with SHA-1, 6 digits, 30 s step, one step of skew
#[derive(Debug, Clone, Copy, Default)]
pub struct TotpCodeValidator;

impl OneTimeCodeValidator for TotpCodeValidator {
    fn check(&self, code: &str, secret: &TotpSecret) -> bool {
        secret.verify(code)
    }
}
