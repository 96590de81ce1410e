//! CSRF Double-Submit Tokens
//!
//! Cookie value is `<token>|<sha256 hex of token + secret>`; the same
//! token must come back in the form body.

use platform::crypto::{constant_time_eq, random_hex, sha256_hex};

use crate::error::{AuthError, AuthResult};

const TOKEN_BYTES: usize = 32;

#[derive(Clone)]
pub struct CsrfService {
    secret: String,
}

impl CsrfService {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Fresh token and the cookie value that vouches for it
    pub fn issue(&self) -> (String, String) {
        let token = random_hex(TOKEN_BYTES);
        let cookie = self.cookie_value(&token);
        (token, cookie)
    }

    pub fn cookie_value(&self, token: &str) -> String {
        format!("{token}|{}", self.digest(token))
    }

    /// Token from a cookie value we issued, `None` if tampered
    pub fn token_from_cookie(&self, cookie: &str) -> Option<String> {
        let (token, digest) = cookie.split_once('|')?;
        constant_time_eq(digest.as_bytes(), self.digest(token).as_bytes())
            .then(|| token.to_string())
    }

    /// Cookie and submitted token must agree
    pub fn verify(&self, cookie: Option<&str>, submitted: Option<&str>) -> AuthResult<()> {
        let expected = cookie
            .and_then(|cookie| self.token_from_cookie(cookie))
            .ok_or(AuthError::CsrfTokenMismatch)?;
        let submitted = submitted.ok_or(AuthError::CsrfTokenMismatch)?;

        if constant_time_eq(expected.as_bytes(), submitted.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::CsrfTokenMismatch)
        }
    }

    fn digest(&self, token: &str) -> String {
        sha256_hex(format!("{token}{}", self.secret).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_token_verifies() {
        let csrf = CsrfService::new("secret");
        let (token, cookie) = csrf.issue();

        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert_eq!(csrf.token_from_cookie(&cookie).as_deref(), Some(token.as_str()));
        assert!(csrf.verify(Some(&cookie), Some(&token)).is_ok());
    }

    #[test]
    fn test_cookie_format_matches_digest() {
        let csrf = CsrfService::new("s");
        assert_eq!(
            csrf.cookie_value("abc"),
            format!("abc|{}", sha256_hex(b"abcs"))
        );
    }

    #[test]
    fn test_mismatch_and_missing() {
        let csrf = CsrfService::new("secret");
        let (_, cookie) = csrf.issue();

        assert!(matches!(
            csrf.verify(Some(&cookie), Some("other")),
            Err(AuthError::CsrfTokenMismatch)
        ));
        assert!(csrf.verify(None, Some("x")).is_err());
        assert!(csrf.verify(Some(&cookie), None).is_err());
    }

    #[test]
    fn test_forged_cookie_is_rejected() {
        let csrf = CsrfService::new("secret");
        let forged = CsrfService::new("other").cookie_value("token");

        assert!(csrf.token_from_cookie(&forged).is_none());
        assert!(csrf.verify(Some(&forged), Some("token")).is_err());
        assert!(csrf.token_from_cookie("no-separator").is_none());
    }
}
