//! TOTP Secret Value Object
//!
//! Shared secret for two-factor authentication, as it looks once the
//! encrypted column has been decrypted: 32 bytes of base32 text.
//! Authenticator-app compatible settings (SHA-1, 6 digits, 30 s step).

use std::fmt;

use thiserror::Error;
use totp_rs::{Algorithm, Secret, TOTP};
use zeroize::Zeroizing;

/// Exact decrypted length of a stored secret (base32 of 20 random bytes)
pub const TOTP_SECRET_LENGTH: usize = 32;

const RAW_SECRET_LENGTH: usize = 20;

const TOTP_DIGITS: usize = 6;
const TOTP_STEP: u64 = 30;
/// Accept one step before/after the current one
const TOTP_SKEW: u8 = 1;
const TOTP_ISSUER: &str = "Cal.com";

/// Why decrypted bytes could not become a secret
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TotpSecretError {
    #[error("Expected a {expected} byte secret but got {actual}")]
    Length { expected: usize, actual: usize },

    #[error("Secret is not valid base32 text")]
    Encoding,
}

/// Decrypted TOTP secret, zeroized on drop
pub struct TotpSecret {
    encoded: Zeroizing<String>,
    raw: Zeroizing<Vec<u8>>,
}

impl TotpSecret {
    /// Accept decrypted bytes, checking the length before anything else
    pub fn from_decrypted(bytes: Vec<u8>) -> Result<Self, TotpSecretError> {
        let bytes = Zeroizing::new(bytes);
        if bytes.len() != TOTP_SECRET_LENGTH {
            return Err(TotpSecretError::Length {
                expected: TOTP_SECRET_LENGTH,
                actual: bytes.len(),
            });
        }

        let encoded = Zeroizing::new(
            std::str::from_utf8(&bytes)
                .map_err(|_| TotpSecretError::Encoding)?
                .to_ascii_uppercase(),
        );
        let raw = Zeroizing::new(
            Secret::Encoded(encoded.to_string())
                .to_bytes()
                .map_err(|_| TotpSecretError::Encoding)?,
        );

        Ok(Self { encoded, raw })
    }

    /// Generate a new random secret (enrolment, fixtures)
    pub fn generate() -> Self {
        let raw = platform::crypto::random_bytes(RAW_SECRET_LENGTH);
        let encoded = Secret::Raw(raw.clone()).to_encoded().to_string();

        Self {
            encoded: Zeroizing::new(encoded),
            raw: Zeroizing::new(raw),
        }
    }

    /// Base32 text, for encrypting into storage
    pub fn as_bytes(&self) -> &[u8] {
        self.encoded.as_bytes()
    }

    fn to_totp(&self) -> Option<TOTP> {
        TOTP::new(
            Algorithm::SHA1,
            TOTP_DIGITS,
            TOTP_SKEW,
            TOTP_STEP,
            self.raw.to_vec(),
            Some(TOTP_ISSUER.to_string()),
            String::new(),
        )
        .ok()
    }

    /// Check a code against the current time step (±1 step)
    pub fn verify(&self, code: &str) -> bool {
        let code = code.trim();
        if code.len() != TOTP_DIGITS || !code.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }

        self.to_totp()
            .and_then(|totp| totp.check_current(code).ok())
            .unwrap_or(false)
    }

    /// Code for an arbitrary unix time (tests, enrolment checks)
    pub fn generate_at(&self, unix_secs: u64) -> Option<String> {
        self.to_totp().map(|totp| totp.generate(unix_secs))
    }

    /// Code for the current time step
    pub fn generate_current(&self) -> Option<String> {
        self.to_totp().and_then(|totp| totp.generate_current().ok())
    }
}

impl fmt::Debug for TotpSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TotpSecret")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_expected_length() {
        let secret = TotpSecret::generate();
        assert_eq!(secret.as_bytes().len(), TOTP_SECRET_LENGTH);
    }

    #[test]
    fn test_verify_current_code() {
        let secret = TotpSecret::generate();
        let code = secret.generate_current().unwrap();
        assert!(secret.verify(&code));
        assert!(secret.verify(&format!(" {code} ")));
    }

    #[test]
    fn test_rejects_malformed_codes() {
        let secret = TotpSecret::generate();
        assert!(!secret.verify(""));
        assert!(!secret.verify("12345"));
        assert!(!secret.verify("abcdef"));
        assert!(!secret.verify("1234567"));
    }

    #[test]
    fn test_code_from_distant_step_is_rejected() {
        let secret = TotpSecret::generate();
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let stale = secret.generate_at(now - 10 * TOTP_STEP).unwrap();
        let current = secret.generate_current().unwrap();
        // Stale code could coincide with the current one by chance
        if stale != current {
            assert!(!secret.verify(&stale));
        }
    }

    #[test]
    fn test_length_is_checked() {
        let result = TotpSecret::from_decrypted(b"JBSWY3DPEHPK3PXP".to_vec());
        assert_eq!(
            result.unwrap_err(),
            TotpSecretError::Length {
                expected: 32,
                actual: 16
            }
        );
    }

    #[test]
    fn test_non_base32_is_rejected() {
        let result = TotpSecret::from_decrypted(vec![b'1'; TOTP_SECRET_LENGTH]);
        assert_eq!(result.unwrap_err(), TotpSecretError::Encoding);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = TotpSecret::generate();
        let debug = format!("{secret:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(std::str::from_utf8(secret.as_bytes()).unwrap()));
    }
}
