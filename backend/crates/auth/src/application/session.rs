//! Session Service
//!
//! Stateless JWT sessions (HS256). The token carries the session claim,
//! the session view is rebuilt from it on every request.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::SessionClaim;
use crate::error::{AuthError, AuthResult};

/// JWT claims of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    /// User id as string
    pub sub: String,
    pub id: i64,
    pub username: Option<String>,
    pub email: String,
    pub name: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

/// User part of the session view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: Option<String>,
    pub email: String,
    pub name: Option<String>,
}

/// Session as returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: SessionUser,
    /// RFC 3339 expiry
    pub expires: String,
}

impl From<&SessionToken> for Session {
    fn from(token: &SessionToken) -> Self {
        let expires = DateTime::<Utc>::from_timestamp(token.exp, 0)
            .map(|at| at.to_rfc3339())
            .unwrap_or_default();

        Self {
            user: SessionUser {
                id: token.id,
                username: token.username.clone(),
                email: token.email.clone(),
                name: token.name.clone(),
            },
            expires,
        }
    }
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    max_age: Duration,
}

impl SessionService {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            max_age: Duration::try_seconds(config.session_max_age_secs())
                .unwrap_or(Duration::MAX),
        }
    }

    /// Sign a token for an accepted claim
    pub fn issue(&self, claim: &SessionClaim) -> AuthResult<String> {
        self.issue_at(claim, Utc::now())
    }

    fn issue_at(&self, claim: &SessionClaim, now: DateTime<Utc>) -> AuthResult<String> {
        let expires = now
            .checked_add_signed(self.max_age)
            .ok_or_else(|| AuthError::Internal("session expiry out of range".to_string()))?;
        let token = SessionToken {
            sub: claim.user_id().to_string(),
            id: claim.user_id(),
            username: claim.username().map(str::to_string),
            email: claim.email().to_string(),
            name: claim.display_name().map(str::to_string),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };

        Ok(encode(&Header::default(), &token, &self.encoding_key)?)
    }

    /// Verify signature and expiry
    pub fn decode(&self, token: &str) -> AuthResult<SessionToken> {
        decode::<SessionToken>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected session token");
                AuthError::SessionInvalid
            })
    }

    /// Session view for a token
    pub fn session(&self, token: &str) -> AuthResult<Session> {
        self.decode(token).map(|token| Session::from(&token))
    }
}
